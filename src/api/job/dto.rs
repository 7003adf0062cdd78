use serde::Serialize;

/// Response for bulk job creation
#[derive(Debug, Serialize)]
pub struct BulkJobsResponse {
    pub message: String,
}

impl BulkJobsResponse {
    pub fn new(count: u64) -> Self {
        BulkJobsResponse {
            message: format!("{} jobs created successfully", count),
        }
    }
}
