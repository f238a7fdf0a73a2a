use serde::{Deserialize, Serialize};

/// Request to create a task
#[derive(Debug, Deserialize, Clone)]
pub struct CreateTaskRequest {
    /// Description of the task
    pub task: String,

    /// Initial status; the configured default applies when omitted
    pub status: Option<String>,
}

/// Request to change the status of an existing task
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Response for the task listing endpoint
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<crate::tasks::Task>,
    pub count: usize,
}

/// Response for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// healthy or unhealthy
    pub status: String,

    /// Number of rows currently in the task table
    pub task_count: usize,
}

/// Standard error response format for the API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: String,

    /// Detailed error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
