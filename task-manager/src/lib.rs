//! In-memory task store with validated operations, line-delimited JSON
//! persistence and an interactive numbered menu.
pub mod config;
pub mod error;
pub mod menu;
pub mod storage;
pub mod store;
pub mod task;
pub mod validation;

pub use error::{StorageError, TaskError};
pub use store::{Summary, TaskStore};
pub use task::{Deadline, NewTask, Priority, Task, TaskUpdate};
