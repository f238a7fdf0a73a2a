use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the task store. `NotFound` is the only interesting case; the
/// rest is whatever sqlite reported.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("Task {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// One row of the task table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task: String,
    pub status: String,
}

/// Single-table task list over sqlite. The schema is bootstrapped once when
/// the store opens; there are no durability promises beyond the table
/// existing.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// task table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TaskStoreError> {
        let conn = Connection::open(path.as_ref())?;
        Self::init(&conn)?;
        info!("Task store ready at {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// In-memory store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self, TaskStoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    fn init(conn: &Connection) -> Result<(), TaskStoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS task (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                status TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Inserts a task and returns it with its assigned id.
    pub fn add(&self, task: &str, status: &str) -> Result<Task, TaskStoreError> {
        self.conn.execute(
            "INSERT INTO task (task, status) VALUES (?1, ?2)",
            params![task, status],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Added task {}: {}", id, task);
        Ok(Task {
            id,
            task: task.to_string(),
            status: status.to_string(),
        })
    }

    /// All tasks in insertion order.
    pub fn list(&self) -> Result<Vec<Task>, TaskStoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, task, status FROM task ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                task: row.get(1)?,
                status: row.get(2)?,
            })
        })?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Task, TaskStoreError> {
        let task = self
            .conn
            .query_row(
                "SELECT id, task, status FROM task WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Task {
                        id: row.get(0)?,
                        task: row.get(1)?,
                        status: row.get(2)?,
                    })
                },
            )
            .optional()?;
        task.ok_or(TaskStoreError::NotFound(id))
    }

    /// Updates the status of an existing task and returns the new row.
    pub fn update_status(&self, id: i64, status: &str) -> Result<Task, TaskStoreError> {
        let updated = self.conn.execute(
            "UPDATE task SET status = ?1 WHERE id = ?2",
            params![status, id],
        )?;
        if updated == 0 {
            return Err(TaskStoreError::NotFound(id));
        }
        self.get(id)
    }

    pub fn count(&self) -> Result<usize, TaskStoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM task", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
