pub mod config;
pub mod handlers;
pub mod models;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Mutex;
use tracing::info;

use crate::api::config::ApiConfig;
use crate::tasks::TaskStore;

/// Starts the task API server and blocks until it shuts down.
///
/// Routes:
/// * `GET /` - list all tasks
/// * `POST /tasks` - create a task
/// * `PUT /tasks/{id}/status` - update a task's status
/// * `GET /health` - service health probe
///
/// # Arguments
/// * `host` - Address to bind to
/// * `port` - Port to bind to
/// * `config` - Optional API configuration (defaults apply when None)
pub async fn start_server(host: &str, port: u16, config: Option<ApiConfig>) -> Result<()> {
    let config = config.unwrap_or_default();
    info!("Starting task API on {}:{} (db: {})", host, port, config.database_path);

    let store = TaskStore::open(&config.database_path)
        .with_context(|| format!("Failed to open task store at {}", config.database_path))?;
    let store = web::Data::new(Mutex::new(store));
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(config_data.clone())
            .route("/", web::get().to(handlers::list_tasks))
            .route("/tasks", web::post().to(handlers::create_task))
            .route("/tasks/{id}/status", web::put().to(handlers::update_task_status))
            .route("/health", web::get().to(handlers::health_check))
    })
    .bind((host, port))
    .with_context(|| format!("Failed to bind {host}:{port}"))?
    .run()
    .await
    .context("Task API server terminated unexpectedly")?;

    Ok(())
}
