use sqlx::{Pool, Postgres};
use tracing::info;
use validator::Validate;

use super::models::{Worker, WorkerListQuery};
use crate::api::error::ServiceError;
use crate::api::validation::validation_detail;
use crate::db::job_repository::JobRepository;
use crate::db::models::{NewWorker, Page, WorkerRow};
use crate::db::worker_repository::{WorkerFilter, WorkerRepository};

/// Worker service containing business logic
pub struct WorkerService {
    pool: Pool<Postgres>,
}

impl WorkerService {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a single worker
    ///
    /// Rejects the request before any mutation when name or role is missing
    /// or empty, or when the supplied jobId references no existing job.
    pub async fn create_worker(&self, worker: &Worker) -> Result<WorkerRow, ServiceError> {
        let new_worker = validate(worker)?;
        self.check_job_reference(new_worker.job_id).await?;

        let row = WorkerRepository::create(&self.pool, &new_worker).await?;
        info!("Worker created: id={}, name={}", row.id, row.name);
        Ok(row)
    }

    /// Bulk create workers
    ///
    /// Every element is validated (including its job reference) before any
    /// insert is issued; the first invalid element aborts the whole request
    /// and nothing is persisted.
    pub async fn bulk_create_workers(&self, workers: &[Worker]) -> Result<u64, ServiceError> {
        info!(
            "Validating {} candidate workers for bulk create",
            workers.len()
        );

        let mut new_workers = Vec::with_capacity(workers.len());
        for (i, worker) in workers.iter().enumerate() {
            let new_worker = validate(worker).map_err(|e| e.at_index("Worker", i))?;
            self.check_job_reference(new_worker.job_id)
                .await
                .map_err(|e| e.at_index("Worker", i))?;
            new_workers.push(new_worker);
        }

        let created = WorkerRepository::bulk_create(&self.pool, &new_workers).await?;
        info!("Bulk worker creation completed: {} workers created", created);
        Ok(created)
    }

    /// List workers with optional filters and pagination
    pub async fn list_workers(
        &self,
        query: &WorkerListQuery,
    ) -> Result<Vec<WorkerRow>, ServiceError> {
        self.check_job_reference(query.job_id).await?;

        let filter = WorkerFilter {
            name: query.name.clone(),
            role: query.role.clone(),
            job_id: query.job_id,
        };
        let page = Page::new(query.page, query.limit);

        let rows = WorkerRepository::search(&self.pool, &filter, page).await?;
        Ok(rows)
    }

    /// Validate an optional job reference against the jobs table.
    async fn check_job_reference(&self, job_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(job_id) = job_id else {
            return Ok(());
        };
        if JobRepository::exists(&self.pool, job_id).await? {
            Ok(())
        } else {
            Err(ServiceError::Validation(format!(
                "Job with id {} does not exist",
                job_id
            )))
        }
    }
}

/// Check required fields and length bounds, producing the insert payload.
/// The job reference is checked separately since it needs the database.
fn validate(worker: &Worker) -> Result<NewWorker, ServiceError> {
    if let Err(errors) = worker.validate() {
        return Err(ServiceError::Validation(validation_detail(&errors)));
    }

    let name = match worker.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ServiceError::Validation("Name field required".to_string())),
    };
    let role = match worker.role.as_deref() {
        Some(role) if !role.is_empty() => role.to_string(),
        _ => return Err(ServiceError::Validation("Role field required".to_string())),
    };

    Ok(NewWorker {
        name,
        role,
        job_id: worker.job_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(name: Option<&str>, role: Option<&str>) -> Worker {
        Worker {
            name: name.map(String::from),
            role: role.map(String::from),
            job_id: None,
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
        let err = validate(&worker(None, Some("Foreman"))).unwrap_err();
        assert_eq!(detail(err), "Name field required");
        let err = validate(&worker(Some(""), Some("Foreman"))).unwrap_err();
        assert_eq!(detail(err), "Name field required");
    }

    #[test]
    fn missing_role_is_rejected() {
        let err = validate(&worker(Some("Jo"), None)).unwrap_err();
        assert_eq!(detail(err), "Role field required");
    }

    #[test]
    fn overlong_role_is_rejected() {
        let long = "x".repeat(51);
        let err = validate(&worker(Some("Jo"), Some(&long))).unwrap_err();
        assert!(detail(err).contains("at most 50"));
    }

    #[test]
    fn valid_worker_keeps_job_reference() {
        let mut candidate = worker(Some("Jo"), Some("Foreman"));
        candidate.job_id = Some(4);
        let new_worker = validate(&candidate).unwrap();
        assert_eq!(new_worker.name, "Jo");
        assert_eq!(new_worker.job_id, Some(4));
    }
}
