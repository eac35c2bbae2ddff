use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

/// Reply body. Without `text` the stored draft for the post is used.
#[derive(Debug, Default, Deserialize)]
pub struct ReplyRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyDraftRequest {
    pub text: String,
}
