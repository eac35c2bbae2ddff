mod requests;
mod responses;

pub use requests::{CreatePostRequest, ReplyDraftRequest, ReplyRequest};
pub use responses::{MeResponse, PaginatedResponse, PaginationParams};
