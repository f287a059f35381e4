use std::path::PathBuf;
use thiserror::Error;

/// Every way a single task operation can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Invalid task id value. Id must be a positive integer.")]
    InvalidId,
    #[error("Task priority must be low, medium, or high.")]
    InvalidPriority,
    #[error("Invalid date. Date must be in the format YYYY-MM-DD.")]
    InvalidDate,
    #[error("Task with the same id already exists.")]
    DuplicateId(u32),
    #[error("Task is not found.")]
    NotFound,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not load {record} (line {line}) - {source}")]
    InvalidRecord {
        line: usize,
        record: String,
        #[source]
        source: TaskError,
    },
    #[error("Path {} does not exist or is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("File {} does not exist.", .0.display())]
    NotAFile(PathBuf),
}
