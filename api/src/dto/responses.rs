use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who the caller is, and the name the UI greets them with.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: Option<Uuid>,
    pub display_name: Option<String>,
    pub greeting: String,
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}
fn default_limit() -> usize {
    10
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}
