use serde::Serialize;

/// Response for bulk worker creation
#[derive(Debug, Serialize)]
pub struct BulkWorkersResponse {
    pub message: String,
}

impl BulkWorkersResponse {
    pub fn new(count: u64) -> Self {
        BulkWorkersResponse {
            message: format!("{} workers created successfully", count),
        }
    }
}
