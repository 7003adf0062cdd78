use sqlx::{Pool, Postgres};
use tracing::info;
use validator::Validate;

use super::models::{Job, JobListQuery};
use crate::api::error::ServiceError;
use crate::api::validation::validation_detail;
use crate::db::job_repository::{JobFilter, JobRepository, SortKey, SortOrder};
use crate::db::models::{JobRow, NewJob, Page};

/// Job service containing business logic
pub struct JobService {
    pool: Pool<Postgres>,
}

impl JobService {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a single job
    ///
    /// Rejects the request before any mutation when name or customer is
    /// missing or empty, or a field exceeds its length bound.
    pub async fn create_job(&self, job: &Job) -> Result<JobRow, ServiceError> {
        let new_job = validate(job)?;

        let row = JobRepository::create(&self.pool, &new_job).await?;
        info!("Job created: id={}, name={}", row.id, row.name);
        Ok(row)
    }

    /// Bulk create jobs
    ///
    /// Every element is validated before any insert is issued; the first
    /// invalid element aborts the whole request and nothing is persisted.
    pub async fn bulk_create_jobs(&self, jobs: &[Job]) -> Result<u64, ServiceError> {
        info!("Validating {} candidate jobs for bulk create", jobs.len());

        let mut new_jobs = Vec::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            let new_job = validate(job).map_err(|e| e.at_index("Job", i))?;
            new_jobs.push(new_job);
        }

        let created = JobRepository::bulk_create(&self.pool, &new_jobs).await?;
        info!("Bulk job creation completed: {} jobs created", created);
        Ok(created)
    }

    /// List jobs with optional filters, sorting, and pagination
    pub async fn list_jobs(&self, query: &JobListQuery) -> Result<Vec<JobRow>, ServiceError> {
        check_date_range(query)?;
        let (sort, order) = parse_sort(query)?;

        let filter = JobFilter {
            name: query.name.clone(),
            customer: query.customer.clone(),
            start_after: query.start_after,
            end_before: query.end_before,
            status: query.status.map(|s| s.as_str().to_string()),
        };
        let page = Page::new(query.page, query.limit);

        let rows = JobRepository::search(&self.pool, &filter, sort, order, page).await?;
        Ok(rows)
    }

    /// Delete a job by id, returning the removed record
    pub async fn delete_job(&self, id: i32) -> Result<JobRow, ServiceError> {
        match JobRepository::delete(&self.pool, id).await? {
            Some(row) => {
                info!("Job deleted: id={}", id);
                Ok(row)
            }
            None => Err(ServiceError::NotFound("Job not found".to_string())),
        }
    }
}

/// Check required fields and length bounds, producing the insert payload.
fn validate(job: &Job) -> Result<NewJob, ServiceError> {
    if let Err(errors) = job.validate() {
        return Err(ServiceError::Validation(validation_detail(&errors)));
    }

    let name = match job.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ServiceError::Validation("Name field required".to_string())),
    };
    let customer = match job.customer.as_deref() {
        Some(customer) if !customer.is_empty() => customer.to_string(),
        _ => {
            return Err(ServiceError::Validation(
                "Customer field required".to_string(),
            ))
        }
    };

    Ok(NewJob {
        name,
        customer,
        start_date: job.start_date,
        end_date: job.end_date,
        status: job.status.map(|s| s.as_str().to_string()),
    })
}

/// Reject a date window where the lower bound is not strictly before the
/// upper bound. Single-ended windows are always fine.
fn check_date_range(query: &JobListQuery) -> Result<(), ServiceError> {
    if let (Some(start_after), Some(end_before)) = (query.start_after, query.end_before) {
        if start_after >= end_before {
            return Err(ServiceError::Validation(
                "startAfter must be before endBefore".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_sort(query: &JobListQuery) -> Result<(SortKey, SortOrder), ServiceError> {
    let sort = SortKey::parse(&query.sort_by)
        .ok_or_else(|| ServiceError::Validation("Invalid sort field".to_string()))?;
    let order = SortOrder::parse(&query.sort_order).ok_or_else(|| {
        ServiceError::Validation("Invalid sort order. Use 'asc' or 'desc'.".to_string())
    })?;
    Ok((sort, order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn job(name: Option<&str>, customer: Option<&str>) -> Job {
        Job {
            name: name.map(String::from),
            customer: customer.map(String::from),
            start_date: None,
            end_date: None,
            status: None,
        }
    }

    fn query() -> JobListQuery {
        JobListQuery {
            name: None,
            customer: None,
            start_after: None,
            end_before: None,
            status: None,
            page: 1,
            limit: 100,
            sort_by: "startDate".to_string(),
            sort_order: "asc".to_string(),
        }
    }

    fn detail(err: ServiceError) -> String {
        match err {
            ServiceError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn missing_or_empty_name_is_rejected() {
        let err = validate(&job(None, Some("Acme"))).unwrap_err();
        assert_eq!(detail(err), "Name field required");
        let err = validate(&job(Some(""), Some("Acme"))).unwrap_err();
        assert_eq!(detail(err), "Name field required");
    }

    #[test]
    fn missing_customer_is_rejected() {
        let err = validate(&job(Some("Roof A"), None)).unwrap_err();
        assert_eq!(detail(err), "Customer field required");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let long = "x".repeat(51);
        let err = validate(&job(Some(&long), Some("Acme"))).unwrap_err();
        assert!(detail(err).contains("at most 50"));
    }

    #[test]
    fn valid_job_becomes_insert_payload() {
        let mut candidate = job(Some("Roof A"), Some("Acme"));
        candidate.status = Some(crate::api::job::models::JobStatus::InProgress);
        let new_job = validate(&candidate).unwrap();
        assert_eq!(new_job.name, "Roof A");
        assert_eq!(new_job.status.as_deref(), Some("InProgress"));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let mut q = query();
        q.start_after = NaiveDate::from_ymd_opt(2024, 2, 1);
        q.end_before = NaiveDate::from_ymd_opt(2024, 1, 1);
        let err = check_date_range(&q).unwrap_err();
        assert_eq!(detail(err), "startAfter must be before endBefore");

        // Equal bounds are also invalid: the window is empty.
        let mut q = query();
        q.start_after = NaiveDate::from_ymd_opt(2024, 1, 1);
        q.end_before = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(check_date_range(&q).is_err());
    }

    #[test]
    fn single_ended_date_range_is_accepted() {
        let mut q = query();
        q.start_after = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(check_date_range(&q).is_ok());
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let mut q = query();
        q.sort_by = "id".to_string();
        let err = parse_sort(&q).unwrap_err();
        assert_eq!(detail(err), "Invalid sort field");
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        let mut q = query();
        q.sort_order = "descending".to_string();
        let err = parse_sort(&q).unwrap_err();
        assert_eq!(detail(err), "Invalid sort order. Use 'asc' or 'desc'.");
    }

    #[test]
    fn bulk_errors_name_the_element() {
        let err =
            ServiceError::Validation("Name field required".to_string()).at_index("Job", 2);
        assert_eq!(detail(err), "Job at index 2: Name field required");
    }
}
