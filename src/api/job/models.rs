use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Job status enum representing the state of a job.
/// Wire values are the variant names verbatim.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Completed,
}

impl JobStatus {
    /// The stored text form, identical to the wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
        }
    }
}

/// Candidate job as submitted by the client. Every field is optional on the
/// wire; the service rejects missing name/customer before anything is
/// persisted.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "Customer must be at most 50 characters"))]
    pub customer: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<JobStatus>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    100
}

fn default_sort_by() -> String {
    "startDate".to_string()
}

fn default_sort_order() -> String {
    "asc".to_string()
}

/// Query parameters for the job listing endpoint.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub name: Option<String>,
    pub customer: Option<String>,
    #[serde(rename = "startAfter")]
    pub start_after: Option<NaiveDate>,
    #[serde(rename = "endBefore")]
    pub end_before: Option<NaiveDate>,
    pub status: Option<JobStatus>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_match_variant_names() {
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"InProgress\""
        );
        let parsed: JobStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, JobStatus::Completed);
        assert!(serde_json::from_str::<JobStatus>("\"inprogress\"").is_err());
    }

    #[test]
    fn job_body_accepts_camel_case_dates() {
        let job: Job = serde_json::from_str(
            r#"{"name":"Roof A","customer":"Acme","startDate":"2024-01-01","endDate":"2024-02-01","status":"InProgress"}"#,
        )
        .unwrap();
        assert_eq!(job.name.as_deref(), Some("Roof A"));
        assert_eq!(
            job.start_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(job.status, Some(JobStatus::InProgress));
    }

    #[test]
    fn list_query_defaults() {
        let q: JobListQuery = query_from_pairs("");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 100);
        assert_eq!(q.sort_by, "startDate");
        assert_eq!(q.sort_order, "asc");
    }

    #[test]
    fn list_query_parses_wire_names() {
        let q: JobListQuery =
            query_from_pairs("customer=Acme&startAfter=2024-01-01&sort_order=desc");
        assert_eq!(q.customer.as_deref(), Some("Acme"));
        assert_eq!(
            q.start_after,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(q.sort_order, "desc");
    }

    // String-valued deserialization, matching what the urlencoded layer
    // hands serde at runtime.
    fn query_from_pairs(query: &str) -> JobListQuery {
        let mut map = serde_json::Map::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap();
            map.insert(k.to_string(), serde_json::Value::String(v.to_string()));
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
