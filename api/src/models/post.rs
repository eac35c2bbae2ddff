use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: String,
    /// Stable key of the creator, when one was signed in. Ownership checks
    /// still compare `author`.
    pub author_id: Option<Uuid>,
    pub text: String,
    pub liked: bool,
    pub reposted: bool,
    pub replies: Vec<Reply>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    pub text: String,
}
