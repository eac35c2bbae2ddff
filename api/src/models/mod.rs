mod post;
mod profile;

pub use post::{Post, Reply};
pub use profile::{ProfileDocument, ProfilePatch, ProfileUpdate};
