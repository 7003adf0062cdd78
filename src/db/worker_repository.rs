use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{NewWorker, Page, WorkerRow};

const WORKER_COLUMNS: &str = "id, name, role, job_id";

/// Optional exact-match filters for the worker listing query.
#[derive(Debug, Default)]
pub struct WorkerFilter {
    pub name: Option<String>,
    pub role: Option<String>,
    pub job_id: Option<i32>,
}

/// Build the listing SQL for the given filter combination. Placeholders are
/// numbered in field order (name, role, job_id) with LIMIT and OFFSET last;
/// `search` binds values in the same order. Workers have no caller-facing
/// sort control; ordering by id keeps pagination stable.
fn build_search_sql(filter: &WorkerFilter) -> String {
    let mut sql = format!("SELECT {} FROM workers", WORKER_COLUMNS);
    let mut clauses: Vec<String> = Vec::new();
    let mut n = 0;

    if filter.name.is_some() {
        n += 1;
        clauses.push(format!("name = ${}", n));
    }
    if filter.role.is_some() {
        n += 1;
        clauses.push(format!("role = ${}", n));
    }
    if filter.job_id.is_some() {
        n += 1;
        clauses.push(format!("job_id = ${}", n));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(&format!(" ORDER BY id ASC LIMIT ${} OFFSET ${}", n + 1, n + 2));
    sql
}

/// Repository for Worker database operations
pub struct WorkerRepository;

impl WorkerRepository {
    /// Create a new worker in the database and return the full worker record
    pub async fn create(
        pool: &Pool<Postgres>,
        worker: &NewWorker,
    ) -> Result<WorkerRow, sqlx::Error> {
        debug!("Creating worker: name={}, role={}", worker.name, worker.role);

        let sql = format!(
            "INSERT INTO workers (name, role, job_id) VALUES ($1, $2, $3) RETURNING {}",
            WORKER_COLUMNS
        );
        let row = sqlx::query_as::<_, WorkerRow>(&sql)
            .bind(&worker.name)
            .bind(&worker.role)
            .bind(worker.job_id)
            .fetch_one(pool)
            .await?;

        debug!("Worker created with id={}", row.id);
        Ok(row)
    }

    /// Bulk insert multiple workers as a single multi-row INSERT.
    /// Returns the number of rows inserted.
    pub async fn bulk_create(
        pool: &Pool<Postgres>,
        workers: &[NewWorker],
    ) -> Result<u64, sqlx::Error> {
        if workers.is_empty() {
            debug!("Bulk create called with empty worker list");
            return Ok(0);
        }

        debug!("Starting bulk insert of {} workers", workers.len());

        let mut sql = String::from("INSERT INTO workers (name, role, job_id) VALUES ");
        for i in 0..workers.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            let base = i * 3;
            sql.push_str(&format!("(${}, ${}, ${})", base + 1, base + 2, base + 3));
        }

        let mut query = sqlx::query(&sql);
        for worker in workers {
            query = query
                .bind(&worker.name)
                .bind(&worker.role)
                .bind(worker.job_id);
        }

        let result = query.execute(pool).await?;
        let rows_affected = result.rows_affected();
        debug!("Bulk insert completed: {} rows inserted", rows_affected);

        Ok(rows_affected)
    }

    /// List workers matching the filter, ordered by id, windowed by the
    /// given page.
    pub async fn search(
        pool: &Pool<Postgres>,
        filter: &WorkerFilter,
        page: Page,
    ) -> Result<Vec<WorkerRow>, sqlx::Error> {
        let sql = build_search_sql(filter);
        debug!("Searching workers: {}", sql);

        let mut query = sqlx::query_as::<_, WorkerRow>(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(role) = &filter.role {
            query = query.bind(role);
        }
        if let Some(job_id) = filter.job_id {
            query = query.bind(job_id);
        }
        query = query.bind(page.limit).bind(page.offset);

        query.fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_sql_without_filters_orders_by_id() {
        let sql = build_search_sql(&WorkerFilter::default());
        assert_eq!(
            sql,
            "SELECT id, name, role, job_id FROM workers ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn search_sql_numbers_placeholders_in_field_order() {
        let filter = WorkerFilter {
            name: Some("Jo".into()),
            role: Some("Foreman".into()),
            job_id: Some(4),
        };
        assert_eq!(
            build_search_sql(&filter),
            "SELECT id, name, role, job_id FROM workers \
             WHERE name = $1 AND role = $2 AND job_id = $3 \
             ORDER BY id ASC LIMIT $4 OFFSET $5"
        );
    }

    #[test]
    fn search_sql_skips_absent_filters() {
        let filter = WorkerFilter {
            job_id: Some(4),
            ..WorkerFilter::default()
        };
        assert_eq!(
            build_search_sql(&filter),
            "SELECT id, name, role, job_id FROM workers \
             WHERE job_id = $1 ORDER BY id ASC LIMIT $2 OFFSET $3"
        );
    }
}
