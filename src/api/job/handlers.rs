use actix_web::{
    HttpResponse, delete, get, post,
    web::{self, Data, ServiceConfig, scope},
};
use actix_web_validator::Json;

use super::dto::BulkJobsResponse;
use super::models::{Job, JobListQuery};
use super::service::JobService;
use crate::api::error::ServiceError;

#[post("/")]
async fn create_job(
    service: Data<JobService>,
    job: Json<Job>,
) -> Result<HttpResponse, ServiceError> {
    let row = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(row))
}

#[post("/bulk/")]
async fn bulk_create_jobs(
    service: Data<JobService>,
    jobs: web::Json<Vec<Job>>,
) -> Result<HttpResponse, ServiceError> {
    let created = service.bulk_create_jobs(&jobs).await?;
    Ok(HttpResponse::Created().json(BulkJobsResponse::new(created)))
}

#[get("/")]
async fn list_jobs(
    service: Data<JobService>,
    query: web::Query<JobListQuery>,
) -> Result<HttpResponse, ServiceError> {
    let rows = service.list_jobs(&query).await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[delete("/{job_id}")]
async fn delete_job(
    service: Data<JobService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let row = service.delete_job(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/jobs")
            .service(create_job)
            .service(bulk_create_jobs)
            .service(list_jobs)
            .service(delete_job),
    );
}
