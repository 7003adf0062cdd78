use actix_web::{
    HttpResponse, get, post,
    web::{self, Data, ServiceConfig, scope},
};
use actix_web_validator::Json;

use super::dto::BulkWorkersResponse;
use super::models::{Worker, WorkerListQuery};
use super::service::WorkerService;
use crate::api::error::ServiceError;

#[post("/")]
async fn create_worker(
    service: Data<WorkerService>,
    worker: Json<Worker>,
) -> Result<HttpResponse, ServiceError> {
    let row = service.create_worker(&worker).await?;
    Ok(HttpResponse::Created().json(row))
}

#[post("/bulk/")]
async fn bulk_create_workers(
    service: Data<WorkerService>,
    workers: web::Json<Vec<Worker>>,
) -> Result<HttpResponse, ServiceError> {
    let created = service.bulk_create_workers(&workers).await?;
    Ok(HttpResponse::Created().json(BulkWorkersResponse::new(created)))
}

#[get("/")]
async fn list_workers(
    service: Data<WorkerService>,
    query: web::Query<WorkerListQuery>,
) -> Result<HttpResponse, ServiceError> {
    let rows = service.list_workers(&query).await?;
    Ok(HttpResponse::Ok().json(rows))
}

// Batch reassignment (move a list of workers onto one job) is drafted but
// disabled until the semantics for workers already assigned elsewhere are
// decided:
//
// #[post("/assign/{job_id}")]
// async fn assign_workers(
//     service: Data<WorkerService>,
//     path: web::Path<i32>,
//     worker_ids: web::Json<Vec<i32>>,
// ) -> Result<HttpResponse, ServiceError> {
//     let reassigned = service
//         .assign_workers(path.into_inner(), &worker_ids)
//         .await?;
//     Ok(HttpResponse::Ok().json(reassigned))
// }

pub fn worker_config(config: &mut ServiceConfig) {
    config.service(
        scope("/workers")
            .service(create_worker)
            .service(bulk_create_workers)
            // .service(assign_workers)
            .service(list_workers),
    );
}
