mod health;
mod post;
mod profile;
mod user;

pub use health::health_check;
pub use post::{
    add_reply, create_post, delete_post, get_post, get_posts, set_reply_draft, toggle_like,
    toggle_repost,
};
pub use profile::{delete_profile, get_profile, save_profile, upload_photo};
pub use user::get_current_user;
