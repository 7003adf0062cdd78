use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job with all fields
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub name: String,
    pub customer: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Database representation of a worker with all fields
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRow {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub job_id: Option<i32>,
}

/// Insert payload for a job, produced by the service layer after validation.
/// Required fields are plain `String` here so repositories never see
/// half-validated input.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub name: String,
    pub customer: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Insert payload for a worker, produced by the service layer after
/// validation.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: String,
    pub role: String,
    pub job_id: Option<i32>,
}

/// Page window for listing queries, already converted from the wire's
/// page/limit pair into a LIMIT/OFFSET pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page window from a 1-based page number and a page size.
    /// Out-of-range values are clamped rather than rejected so a negative
    /// offset can never reach the database.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.max(1);
        let limit = limit.clamp(1, 1000);
        Page {
            limit,
            offset: (page - 1) * limit,
        }
    }
}
