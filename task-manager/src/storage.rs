//! Line-delimited JSON persistence for a [`TaskStore`].
use crate::error::StorageError;
use crate::store::TaskStore;
use crate::task::NewTask;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const FILE_EXTENSION: &str = "txt";

/// A persisted id is accepted either as a JSON number or as a string and is
/// validated the same way as typed input. Whole floats such as `1.0` count as
/// integers; any other float fails id validation.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StoredId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Display for StoredId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredId::Integer(id) => write!(f, "{id}"),
            StoredId::Float(id) if id.fract() == 0.0 && id.abs() <= i64::MAX as f64 => {
                write!(f, "{}", *id as i64)
            }
            StoredId::Float(id) => write!(f, "{id}"),
            StoredId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Deserialize, Debug)]
struct StoredTask {
    id: StoredId,
    #[serde(default)]
    description: String,
    priority: String,
    deadline: String,
    #[serde(default)]
    completed: bool,
}

/// Writes every task in `store` to a new timestamp-named file inside `dir`.
///
/// Returns the path of the written file.
#[tracing::instrument(skip(store))]
pub fn save_to_dir(store: &TaskStore, dir: &Path) -> Result<PathBuf, StorageError> {
    if !dir.is_dir() {
        return Err(StorageError::NotADirectory(dir.to_path_buf()));
    }

    let mut contents = String::new();
    for task in store {
        let line = serde_json::to_string(task).map_err(std::io::Error::from)?;
        contents.push_str(&line);
        contents.push('\n');
    }

    let path = dir.join(timestamped_file_name());
    fs::write(&path, contents)?;
    info!(path = %path.display(), count = store.count(), "tasks saved");
    Ok(path)
}

/// Reads a file written by [`save_to_dir`] into a fresh store.
///
/// Every record goes through the same validation as an interactive add. The
/// first record that fails aborts the whole load.
#[tracing::instrument]
pub fn load_from_file(path: &Path) -> Result<TaskStore, StorageError> {
    if !path.is_file() {
        return Err(StorageError::NotAFile(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let mut store = TaskStore::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let stored: StoredTask =
            serde_json::from_str(raw).map_err(|source| StorageError::Json { line, source })?;
        let completed = stored.completed;
        let new_task = NewTask::new(
            stored.id.to_string(),
            stored.description,
            stored.priority,
            stored.deadline,
        );

        let id = match store.add(new_task) {
            Ok(task) => task.id().to_string(),
            Err(source) => {
                warn!(line, record = raw, "discarding load");
                return Err(StorageError::InvalidRecord {
                    line,
                    record: raw.to_string(),
                    source,
                });
            }
        };
        if completed {
            store
                .mark_completed(&id)
                .map_err(|source| StorageError::InvalidRecord {
                    line,
                    record: raw.to_string(),
                    source,
                })?;
        }
    }

    info!(count = store.count(), "tasks loaded");
    Ok(store)
}

fn timestamped_file_name() -> String {
    let now = chrono::Utc::now();
    format!("{}.{}", now.format("%s%.6f"), FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::task::Priority;
    use tempfile::TempDir;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store
            .add(NewTask::new("1", "write spec", "HIGH", "2024-03-01"))
            .unwrap();
        store
            .add(NewTask::new("2", "review \"quotes\"", "low", "2024-02-29"))
            .unwrap();
        store.mark_completed("2").unwrap();
        store
    }

    fn write_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("tasks.txt");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn saved_tasks_load_back_unchanged() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let store = sample_store();

        // Act
        let path = save_to_dir(&store, dir.path()).unwrap();
        let loaded = load_from_file(&path).unwrap();

        // Assert
        assert_eq!(loaded, store);
    }

    #[test]
    fn saves_one_json_object_per_line() {
        let dir = TempDir::new().unwrap();

        let path = save_to_dir(&sample_store(), dir.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"id":1,"description":"write spec","priority":"high","deadline":"2024-03-01","completed":false}"#
        );
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("txt"));
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn save_requires_existing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let result = save_to_dir(&sample_store(), &missing);

        assert!(matches!(result, Err(StorageError::NotADirectory(_))));
    }

    #[test]
    fn load_accepts_string_ids_and_missing_completed_flag() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            concat!(
                r#"{"id": "5", "description": "a", "priority": "Medium", "deadline": "2024-01-01"}"#,
                "\n\n"
            ),
        );

        let store = load_from_file(&path).unwrap();

        let task = store.get("5").unwrap();
        assert_eq!(task.priority(), Priority::Medium);
        assert!(!task.is_completed());
    }

    #[test]
    fn load_accepts_whole_float_ids() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            r#"{"id": 3.0, "description": "a", "priority": "low", "deadline": "2024-01-01"}"#,
        );

        let store = load_from_file(&path).unwrap();

        assert_eq!(store.get("3").unwrap().id(), 3);
    }

    #[test]
    fn fractional_ids_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            r#"{"id": 1.5, "description": "a", "priority": "low", "deadline": "2024-01-01"}"#,
        );

        let result = load_from_file(&path);

        assert!(matches!(
            result,
            Err(StorageError::InvalidRecord {
                source: TaskError::InvalidId,
                ..
            })
        ));
    }

    #[test]
    fn one_invalid_record_discards_the_whole_load() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            concat!(
                r#"{"id": 1, "description": "a", "priority": "low", "deadline": "2024-01-01", "completed": false}"#,
                "\n",
                r#"{"id": 2, "description": "b", "priority": "urgent", "deadline": "2024-01-01", "completed": false}"#,
                "\n",
            ),
        );

        // Act
        let result = load_from_file(&path);

        // Assert
        match result {
            Err(StorageError::InvalidRecord { line, record, source }) => {
                assert_eq!(line, 2);
                assert!(record.contains("urgent"));
                assert_eq!(source, TaskError::InvalidPriority);
            }
            other => panic!("expected an invalid record error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_in_file_are_rejected() {
        let dir = TempDir::new().unwrap();
        let record =
            r#"{"id": 1, "description": "a", "priority": "low", "deadline": "2024-01-01"}"#;
        let path = write_file(&dir, &format!("{record}\n{record}\n"));

        let result = load_from_file(&path);

        assert!(matches!(
            result,
            Err(StorageError::InvalidRecord {
                source: TaskError::DuplicateId(1),
                ..
            })
        ));
    }

    #[test]
    fn malformed_json_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "not json\n");

        let result = load_from_file(&path);

        assert!(matches!(result, Err(StorageError::Json { line: 1, .. })));
    }

    #[test]
    fn load_requires_existing_file() {
        let dir = TempDir::new().unwrap();

        let result = load_from_file(dir.path());

        assert!(matches!(result, Err(StorageError::NotAFile(_))));
    }
}
