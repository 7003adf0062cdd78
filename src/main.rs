use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_subscriber::{Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod db;
mod shutdown;

use crate::api::{
    health::health_config,
    job::{JobService, handlers::job_config},
    validation,
    worker::{WorkerService, handlers::worker_config},
};
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from environment
    let config = config::Config::from_env().expect("Failed to load configuration");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&config.log_dir).expect("Failed to create logs directory");

    // File-based logging with daily rotation, console output alongside.
    // Log files are created as: logs/info.2024-12-22.log, logs/error.2024-12-22.log
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&config.log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&config.log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    // Get database connection pool
    let pool = db::connection::get_connection(&config.database_url(), config.max_db_connections)
        .await
        .expect("Failed to connect to database");

    info!("Starting job-registry application");
    info!("Configuration loaded successfully:");
    info!("  - Bind address: {}", config.bind_addr);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("Database connection pool established");

    // Run migrations on startup so the jobs and workers tables exist
    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Clone pool for HTTP server (original will be used for shutdown)
    let server_pool = pool.clone();
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        let job_service = web::Data::new(JobService::new(server_pool.clone()));
        let worker_service = web::Data::new(WorkerService::new(server_pool.clone()));

        // Configure payload size limits globally
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(web::Data::new(server_pool.clone())) // Share DB pool across workers
            .app_data(job_service)
            .app_data(worker_service)
            .app_data(payload_config)
            .app_data(validation::json_config()) // Validated JSON bodies
            .app_data(validation::body_config()) // Plain JSON bodies (bulk arrays)
            .app_data(validation::query_config()) // Query-string extraction
            .configure(health_config)
            .configure(job_config)
            .configure(worker_config)
    });

    info!("Server starting on http://{}", config.bind_addr);

    // Bind and start the server
    let server = server.bind(config.bind_addr.as_str())?.run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();

    // Spawn server in background
    let server_task = tokio::spawn(server);

    // Create shutdown coordinator and wait for shutdown signal
    let coordinator = ShutdownCoordinator::new(server_handle, server_task, pool);

    coordinator.wait_for_shutdown().await
}
