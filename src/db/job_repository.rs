use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{JobRow, NewJob, Page};

const JOB_COLUMNS: &str = "id, name, customer, start_date, end_date, status";

/// Optional filters for the job listing query. Present filters combine
/// conjunctively.
#[derive(Debug, Default)]
pub struct JobFilter {
    pub name: Option<String>,
    pub customer: Option<String>,
    /// Lower bound on start_date (inclusive).
    pub start_after: Option<NaiveDate>,
    /// Upper bound on end_date (inclusive).
    pub end_before: Option<NaiveDate>,
    pub status: Option<String>,
}

/// The closed set of sortable job fields, each tied to a fixed column name.
/// Requested sort fields resolve through this enum, never through raw
/// caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Customer,
    StartDate,
    EndDate,
    Status,
}

impl SortKey {
    /// Parse the wire-level field name. Returns `None` for anything outside
    /// the allowed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortKey::Name),
            "customer" => Some(SortKey::Customer),
            "startDate" => Some(SortKey::StartDate),
            "endDate" => Some(SortKey::EndDate),
            "status" => Some(SortKey::Status),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Customer => "customer",
            SortKey::StartDate => "start_date",
            SortKey::EndDate => "end_date",
            SortKey::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Build the listing SQL for the given filter combination. Placeholders are
/// numbered in field order (name, customer, start_after, end_before, status)
/// with LIMIT and OFFSET last; `search` binds values in the same order.
fn build_search_sql(filter: &JobFilter, sort: SortKey, order: SortOrder) -> String {
    let mut sql = format!("SELECT {} FROM jobs", JOB_COLUMNS);
    let mut clauses: Vec<String> = Vec::new();
    let mut n = 0;

    if filter.name.is_some() {
        n += 1;
        clauses.push(format!("name = ${}", n));
    }
    if filter.customer.is_some() {
        n += 1;
        clauses.push(format!("customer = ${}", n));
    }
    if filter.start_after.is_some() {
        n += 1;
        clauses.push(format!("start_date >= ${}", n));
    }
    if filter.end_before.is_some() {
        n += 1;
        clauses.push(format!("end_date <= ${}", n));
    }
    if filter.status.is_some() {
        n += 1;
        clauses.push(format!("status = ${}", n));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(&format!(
        " ORDER BY {} {} LIMIT ${} OFFSET ${}",
        sort.column(),
        order.sql(),
        n + 1,
        n + 2
    ));
    sql
}

/// Repository for Job database operations
pub struct JobRepository;

impl JobRepository {
    /// Create a new job in the database and return the full job record
    pub async fn create(pool: &Pool<Postgres>, job: &NewJob) -> Result<JobRow, sqlx::Error> {
        debug!("Creating job: name={}, customer={}", job.name, job.customer);

        let sql = format!(
            "INSERT INTO jobs (name, customer, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            JOB_COLUMNS
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&job.name)
            .bind(&job.customer)
            .bind(job.start_date)
            .bind(job.end_date)
            .bind(&job.status)
            .fetch_one(pool)
            .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    /// Bulk insert multiple jobs as a single multi-row INSERT.
    /// Returns the number of rows inserted.
    pub async fn bulk_create(pool: &Pool<Postgres>, jobs: &[NewJob]) -> Result<u64, sqlx::Error> {
        if jobs.is_empty() {
            debug!("Bulk create called with empty job list");
            return Ok(0);
        }

        debug!("Starting bulk insert of {} jobs", jobs.len());

        // Build dynamic SQL for bulk insert
        let mut sql = String::from("INSERT INTO jobs (name, customer, start_date, end_date, status) VALUES ");
        for i in 0..jobs.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            let base = i * 5;
            sql.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${})",
                base + 1,
                base + 2,
                base + 3,
                base + 4,
                base + 5
            ));
        }

        let mut query = sqlx::query(&sql);
        for job in jobs {
            query = query
                .bind(&job.name)
                .bind(&job.customer)
                .bind(job.start_date)
                .bind(job.end_date)
                .bind(&job.status);
        }

        let result = query.execute(pool).await?;
        let rows_affected = result.rows_affected();
        debug!("Bulk insert completed: {} rows inserted", rows_affected);

        Ok(rows_affected)
    }

    /// List jobs matching the filter, ordered by the given key, windowed by
    /// the given page.
    pub async fn search(
        pool: &Pool<Postgres>,
        filter: &JobFilter,
        sort: SortKey,
        order: SortOrder,
        page: Page,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        let sql = build_search_sql(filter, sort, order);
        debug!("Searching jobs: {}", sql);

        // Bind order must mirror the placeholder order in build_search_sql.
        let mut query = sqlx::query_as::<_, JobRow>(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(customer) = &filter.customer {
            query = query.bind(customer);
        }
        if let Some(start_after) = filter.start_after {
            query = query.bind(start_after);
        }
        if let Some(end_before) = filter.end_before {
            query = query.bind(end_before);
        }
        if let Some(status) = &filter.status {
            query = query.bind(status);
        }
        query = query.bind(page.limit).bind(page.offset);

        query.fetch_all(pool).await
    }

    /// Whether a job with the given id exists.
    pub async fn exists(pool: &Pool<Postgres>, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a job by id, returning the removed row, or `None` if no such
    /// job exists.
    ///
    /// Workers assigned to the job have their job_id nulled out in the same
    /// transaction, so a successful delete never leaves a dangling reference.
    pub async fn delete(pool: &Pool<Postgres>, id: i32) -> Result<Option<JobRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query("UPDATE workers SET job_id = NULL WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Job {} deleted", id);
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_allowed_fields_only() {
        assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("startDate"), Some(SortKey::StartDate));
        assert_eq!(SortKey::parse("endDate"), Some(SortKey::EndDate));
        assert_eq!(SortKey::parse("id"), None);
        assert_eq!(SortKey::parse("start_date"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn sort_order_parses_asc_desc_only() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("ASC"), None);
        assert_eq!(SortOrder::parse("ascending"), None);
    }

    #[test]
    fn search_sql_without_filters_has_no_where() {
        let sql = build_search_sql(&JobFilter::default(), SortKey::StartDate, SortOrder::Asc);
        assert_eq!(
            sql,
            "SELECT id, name, customer, start_date, end_date, status FROM jobs \
             ORDER BY start_date ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn search_sql_numbers_placeholders_in_field_order() {
        let filter = JobFilter {
            name: Some("Roof A".into()),
            customer: Some("Acme".into()),
            start_after: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end_before: Some(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            status: Some("InProgress".into()),
        };
        let sql = build_search_sql(&filter, SortKey::Name, SortOrder::Desc);
        assert_eq!(
            sql,
            "SELECT id, name, customer, start_date, end_date, status FROM jobs \
             WHERE name = $1 AND customer = $2 AND start_date >= $3 \
             AND end_date <= $4 AND status = $5 \
             ORDER BY name DESC LIMIT $6 OFFSET $7"
        );
    }

    #[test]
    fn search_sql_skips_absent_filters() {
        let filter = JobFilter {
            customer: Some("Acme".into()),
            status: Some("Completed".into()),
            ..JobFilter::default()
        };
        let sql = build_search_sql(&filter, SortKey::EndDate, SortOrder::Asc);
        assert_eq!(
            sql,
            "SELECT id, name, customer, start_date, end_date, status FROM jobs \
             WHERE customer = $1 AND status = $2 \
             ORDER BY end_date ASC LIMIT $3 OFFSET $4"
        );
    }
}
