use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn task_manager(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-manager").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TASK_MANAGER_SAVE_DIR")
        .env_remove("TASK_MANAGER_LOG_LEVEL");
    cmd
}

#[test]
fn exits_cleanly_on_exit_choice() {
    let dir = TempDir::new().unwrap();

    task_manager(&dir)
        .write_stdin("21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task Manager Menu:"))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn adds_and_gets_a_task() {
    let dir = TempDir::new().unwrap();

    task_manager(&dir)
        .write_stdin("1\n1\nwrite spec\nHIGH\n2024-03-01\n4\n1\n21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully."))
        .stdout(predicate::str::contains(
            "Task details: #1 [high] write spec (due 2024-03-01, pending)",
        ));
}

#[test]
fn duplicate_id_is_reported() {
    let dir = TempDir::new().unwrap();

    task_manager(&dir)
        .write_stdin("1\n1\na\nlow\n2024-01-01\n1\n1\nb\nlow\n2024-01-01\n13\n21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task with the same id already exists."))
        .stdout(predicate::str::contains("Total number of tasks: 1"));
}

#[test]
fn saves_to_configured_directory_when_path_is_blank() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("saves")).unwrap();
    fs::write(dir.path().join("task-manager.toml"), "save_dir = \"saves\"\n").unwrap();

    // Act
    task_manager(&dir)
        .write_stdin("1\n7\nplan trip\nmedium\n2024-07-01\n17\n\n21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks saved to file"));

    // Assert
    let saved: Vec<_> = fs::read_dir(dir.path().join("saves"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(saved.len(), 1);
    let contents = fs::read_to_string(&saved[0]).unwrap();
    assert!(contents.contains(r#""priority":"medium""#));
}

#[test]
fn preloads_tasks_from_file() {
    let dir = TempDir::new().unwrap();
    let tasks = dir.path().join("tasks.txt");
    fs::write(
        &tasks,
        concat!(
            r#"{"id": 1, "description": "a", "priority": "low", "deadline": "2024-05-01", "completed": true}"#,
            "\n",
            r#"{"id": 2, "description": "b", "priority": "high", "deadline": "2024-04-01", "completed": false}"#,
            "\n",
        ),
    )
    .unwrap();

    task_manager(&dir)
        .arg("--load")
        .arg(&tasks)
        .write_stdin("16\n21\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"Task Summary: {"total": 2, "completed": 1, "pending": 1}"#,
        ));
}

#[test]
fn invalid_preload_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let tasks = dir.path().join("tasks.txt");
    fs::write(
        &tasks,
        r#"{"id": 1, "description": "a", "priority": "low", "deadline": "2024-02-30"}"#,
    )
    .unwrap();

    task_manager(&dir)
        .arg("--load")
        .arg(&tasks)
        .write_stdin("21\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load"));
}
