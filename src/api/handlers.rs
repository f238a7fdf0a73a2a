use actix_web::{web, HttpResponse, Responder};
use std::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::api::config::ApiConfig;
use crate::api::models::{CreateTaskRequest, ErrorResponse, HealthStatus, TaskListResponse, UpdateStatusRequest};
use crate::tasks::{TaskStore, TaskStoreError};

/// Lists every task in the table.
#[instrument(skip(store))]
pub async fn list_tasks(store: web::Data<Mutex<TaskStore>>) -> impl Responder {
    debug!("Listing tasks");
    let store = match store.lock() {
        Ok(store) => store,
        Err(_) => return store_poisoned(),
    };
    match store.list() {
        Ok(tasks) => {
            let count = tasks.len();
            HttpResponse::Ok().json(TaskListResponse { tasks, count })
        }
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Creates a new task.
///
/// # Arguments
/// * `request` - JSON body with the task text and an optional initial status
/// * `config` - API configuration supplying the default status
/// * `store` - Shared task store
///
/// # Returns
/// * 201 with the created row, or an error response
#[instrument(skip(config, store))]
pub async fn create_task(
    request: web::Json<CreateTaskRequest>,
    config: web::Data<ApiConfig>,
    store: web::Data<Mutex<TaskStore>>,
) -> impl Responder {
    if request.task.trim().is_empty() {
        warn!("Rejected task with empty description");
        return HttpResponse::BadRequest().json(ErrorResponse::new("Task cannot be empty"));
    }

    let status = request
        .status
        .clone()
        .unwrap_or_else(|| config.default_status.clone());

    let store = match store.lock() {
        Ok(store) => store,
        Err(_) => return store_poisoned(),
    };
    match store.add(request.task.trim(), &status) {
        Ok(task) => {
            info!("Created task {}", task.id);
            HttpResponse::Created().json(task)
        }
        Err(e) => {
            error!("Failed to create task: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Updates the status of an existing task.
#[instrument(skip(store))]
pub async fn update_task_status(
    path: web::Path<i64>,
    request: web::Json<UpdateStatusRequest>,
    store: web::Data<Mutex<TaskStore>>,
) -> impl Responder {
    let id = path.into_inner();
    let store = match store.lock() {
        Ok(store) => store,
        Err(_) => return store_poisoned(),
    };
    match store.update_status(id, &request.status) {
        Ok(task) => {
            info!("Task {} moved to status {}", id, task.status);
            HttpResponse::Ok().json(task)
        }
        Err(TaskStoreError::NotFound(_)) => {
            warn!("Status update for unknown task {}", id);
            HttpResponse::NotFound().json(ErrorResponse::new(format!("Task {id} not found")))
        }
        Err(e) => {
            error!("Failed to update task {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Health check endpoint for monitoring service status.
#[instrument(skip(store))]
pub async fn health_check(store: web::Data<Mutex<TaskStore>>) -> impl Responder {
    debug!("Processing health check request");
    let store = match store.lock() {
        Ok(store) => store,
        Err(_) => return store_poisoned(),
    };
    match store.count() {
        Ok(task_count) => HttpResponse::Ok().json(HealthStatus {
            status: "healthy".to_string(),
            task_count,
        }),
        Err(e) => {
            error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(HealthStatus {
                status: "unhealthy".to_string(),
                task_count: 0,
            })
        }
    }
}

fn store_poisoned() -> HttpResponse {
    error!("Task store mutex poisoned");
    HttpResponse::InternalServerError().json(ErrorResponse::new("Task store unavailable"))
}
