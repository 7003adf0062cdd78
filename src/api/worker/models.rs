use serde::{Deserialize, Serialize};
use validator::Validate;

/// Candidate worker as submitted by the client. Name and role are optional
/// on the wire; the service rejects missing values before anything is
/// persisted. jobId is genuinely optional and, when present, must reference
/// an existing job.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "Role must be at most 50 characters"))]
    pub role: Option<String>,
    pub job_id: Option<i32>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    100
}

/// Query parameters for the worker listing endpoint. No sort control is
/// offered for workers.
#[derive(Debug, Deserialize)]
pub struct WorkerListQuery {
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "jobId")]
    pub job_id: Option<i32>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_body_accepts_camel_case_job_id() {
        let worker: Worker =
            serde_json::from_str(r#"{"name":"Jo","role":"Foreman","jobId":4}"#).unwrap();
        assert_eq!(worker.name.as_deref(), Some("Jo"));
        assert_eq!(worker.job_id, Some(4));
    }

    #[test]
    fn job_id_is_optional() {
        let worker: Worker = serde_json::from_str(r#"{"name":"Jo","role":"Foreman"}"#).unwrap();
        assert_eq!(worker.job_id, None);
    }
}
