//! Interactive numbered menu over a [`TaskStore`].
use crate::error::TaskError;
use crate::storage;
use crate::store::TaskStore;
use crate::task::{NewTask, Task, TaskUpdate};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MENU: &str = "
Task Manager Menu:
1. Add Task
2. Remove Task
3. Update Task
4. Get Task
5. Set Task Priority
6. Set Task Deadline
7. Mark Task as Completed
8. Set Task Description
9. Search Tasks by Keyword
10. Filter Tasks by Priority
11. Filter Tasks by Status
12. Filter Tasks by Deadline
13. Count Tasks
14. Count Completed Tasks
15. Count Pending Tasks
16. Generate Task Summary
17. Save Tasks to File
18. Load Tasks from File
19. Sort Tasks by Deadline
20. Sort Tasks by Priority
21. Exit
";

const TASKS_NOT_FOUND: &str = "No tasks were found.";
const INVALID_STATUS: &str = "Status must be completed or pending.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Update,
    Get,
    SetPriority,
    SetDeadline,
    MarkCompleted,
    SetDescription,
    SearchByKeyword,
    FilterByPriority,
    FilterByStatus,
    FilterByDeadline,
    Count,
    CountCompleted,
    CountPending,
    Summary,
    Save,
    Load,
    SortByDeadline,
    SortByPriority,
    Exit,
}

impl TryFrom<&str> for MenuChoice {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let choice = match value.trim() {
            "1" => MenuChoice::Add,
            "2" => MenuChoice::Remove,
            "3" => MenuChoice::Update,
            "4" => MenuChoice::Get,
            "5" => MenuChoice::SetPriority,
            "6" => MenuChoice::SetDeadline,
            "7" => MenuChoice::MarkCompleted,
            "8" => MenuChoice::SetDescription,
            "9" => MenuChoice::SearchByKeyword,
            "10" => MenuChoice::FilterByPriority,
            "11" => MenuChoice::FilterByStatus,
            "12" => MenuChoice::FilterByDeadline,
            "13" => MenuChoice::Count,
            "14" => MenuChoice::CountCompleted,
            "15" => MenuChoice::CountPending,
            "16" => MenuChoice::Summary,
            "17" => MenuChoice::Save,
            "18" => MenuChoice::Load,
            "19" => MenuChoice::SortByDeadline,
            "20" => MenuChoice::SortByPriority,
            "21" => MenuChoice::Exit,
            _ => return Err(()),
        };
        Ok(choice)
    }
}

/// Whether the loop should keep going after handling a choice.
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R: BufRead, W: Write> {
    input: R,
    output: W,
    store: TaskStore,
    save_dir: PathBuf,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, store: TaskStore, save_dir: PathBuf) -> Self {
        Self {
            input,
            output,
            store,
            save_dir,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    /// Runs until the user picks Exit or the input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };
            let flow = match MenuChoice::try_from(line.as_str()) {
                Ok(choice) => {
                    debug!(?choice, "menu choice");
                    self.handle(choice)?
                }
                Err(()) => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        writeln!(self.output, "Exiting...")?;
        self.output.flush()
    }

    fn handle(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        // Every prompt yields `None` once input runs out, which ends the session.
        let handled = match choice {
            MenuChoice::Add => self.add()?,
            MenuChoice::Remove => self.remove()?,
            MenuChoice::Update => self.update()?,
            MenuChoice::Get => self.get()?,
            MenuChoice::SetPriority => self.set_priority()?,
            MenuChoice::SetDeadline => self.set_deadline()?,
            MenuChoice::MarkCompleted => self.mark_completed()?,
            MenuChoice::SetDescription => self.set_description()?,
            MenuChoice::SearchByKeyword => self.search_by_keyword()?,
            MenuChoice::FilterByPriority => self.filter_by_priority()?,
            MenuChoice::FilterByStatus => self.filter_by_status()?,
            MenuChoice::FilterByDeadline => self.filter_by_deadline()?,
            MenuChoice::Count => {
                writeln!(self.output, "Total number of tasks: {}", self.store.count())?;
                Some(())
            }
            MenuChoice::CountCompleted => {
                writeln!(
                    self.output,
                    "Number of completed tasks: {}",
                    self.store.count_completed()
                )?;
                Some(())
            }
            MenuChoice::CountPending => {
                writeln!(
                    self.output,
                    "Number of pending tasks: {}",
                    self.store.count_pending()
                )?;
                Some(())
            }
            MenuChoice::Summary => {
                writeln!(self.output, "Task Summary: {}", self.store.summary())?;
                Some(())
            }
            MenuChoice::Save => self.save()?,
            MenuChoice::Load => self.load()?,
            MenuChoice::SortByDeadline => {
                let sorted = self.store.sort_by_deadline();
                self.print_tasks("Tasks sorted by deadline:", sorted.iter())?;
                Some(())
            }
            MenuChoice::SortByPriority => {
                let sorted = self.store.sort_by_priority();
                self.print_tasks("Tasks sorted by priority:", sorted.iter())?;
                Some(())
            }
            MenuChoice::Exit => return Ok(Flow::Exit),
        };
        Ok(match handled {
            Some(()) => Flow::Continue,
            None => Flow::Exit,
        })
    }

    fn add(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID: ")? else {
            return Ok(None);
        };
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(None);
        };
        let Some(priority) = self.prompt("Enter task priority (low, medium, high): ")? else {
            return Ok(None);
        };
        let Some(deadline) = self.prompt("Enter task deadline (YYYY-MM-DD): ")? else {
            return Ok(None);
        };

        let result = self
            .store
            .add(NewTask::new(id, description, priority, deadline))
            .map(|_| ());
        self.report(result, "Task added successfully.")?;
        Ok(Some(()))
    }

    fn remove(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to remove: ")? else {
            return Ok(None);
        };
        let result = self.store.remove(&id).map(|_| ());
        self.report(result, "Task removed successfully.")?;
        Ok(Some(()))
    }

    fn update(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to update: ")? else {
            return Ok(None);
        };
        let Some(description) = self.prompt("Enter new task description: ")? else {
            return Ok(None);
        };
        let Some(priority) = self.prompt("Enter new task priority (low, medium, high): ")? else {
            return Ok(None);
        };
        let Some(deadline) = self.prompt("Enter new task deadline (YYYY-MM-DD): ")? else {
            return Ok(None);
        };

        let update = TaskUpdate {
            description,
            priority,
            deadline,
        };
        let result = self.store.update(&id, update).map(|_| ());
        self.report(result, "Task updated successfully.")?;
        Ok(Some(()))
    }

    fn get(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to get: ")? else {
            return Ok(None);
        };
        match self.store.get(&id) {
            Ok(task) => writeln!(self.output, "Task details: {task}")?,
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(Some(()))
    }

    fn set_priority(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to set priority: ")? else {
            return Ok(None);
        };
        let Some(priority) = self.prompt("Enter new priority (low, medium, high): ")? else {
            return Ok(None);
        };
        let result = self.store.set_priority(&id, &priority).map(|_| ());
        self.report(result, "Task priority set successfully.")?;
        Ok(Some(()))
    }

    fn set_deadline(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to set deadline: ")? else {
            return Ok(None);
        };
        let Some(deadline) = self.prompt("Enter new deadline (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let result = self.store.set_deadline(&id, &deadline).map(|_| ());
        self.report(result, "Task deadline set successfully.")?;
        Ok(Some(()))
    }

    fn mark_completed(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to mark as completed: ")? else {
            return Ok(None);
        };
        let result = self.store.mark_completed(&id).map(|_| ());
        self.report(result, "Task marked as completed.")?;
        Ok(Some(()))
    }

    fn set_description(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt("Enter task ID to set description: ")? else {
            return Ok(None);
        };
        let Some(description) = self.prompt("Enter new description: ")? else {
            return Ok(None);
        };
        let result = self.store.set_description(&id, description).map(|_| ());
        self.report(result, "Task description set successfully.")?;
        Ok(Some(()))
    }

    fn search_by_keyword(&mut self) -> io::Result<Option<()>> {
        let Some(keyword) = self.prompt("Enter keyword to search: ")? else {
            return Ok(None);
        };
        let found = self.store.search_by_keyword(&keyword);
        if found.is_empty() {
            writeln!(self.output, "{TASKS_NOT_FOUND}")?;
        } else {
            let count = found.len();
            print_tasks(&mut self.output, "Tasks found:", found)?;
            writeln!(self.output, "Total count: {count}")?;
        }
        Ok(Some(()))
    }

    fn filter_by_priority(&mut self) -> io::Result<Option<()>> {
        let Some(priority) = self.prompt("Enter priority to filter by (low, medium, high): ")?
        else {
            return Ok(None);
        };
        match self.store.filter_by_priority(&priority) {
            Ok(tasks) if tasks.is_empty() => writeln!(
                self.output,
                "There are no tasks with {} priority.",
                priority.trim().to_lowercase()
            )?,
            Ok(tasks) => print_tasks(&mut self.output, "Filtered tasks:", tasks)?,
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(Some(()))
    }

    fn filter_by_status(&mut self) -> io::Result<Option<()>> {
        let Some(status) = self.prompt("Enter status to filter by (completed/pending): ")? else {
            return Ok(None);
        };
        let completed = match status.trim().to_lowercase().as_str() {
            "completed" => true,
            "pending" => false,
            _ => {
                writeln!(self.output, "{INVALID_STATUS}")?;
                return Ok(Some(()));
            }
        };
        let tasks = self.store.filter_by_status(completed);
        if tasks.is_empty() {
            let label = if completed { "completed" } else { "pending" };
            writeln!(self.output, "There are no tasks with '{label}' status.")?;
        } else {
            print_tasks(&mut self.output, "Filtered tasks:", tasks)?;
        }
        Ok(Some(()))
    }

    fn filter_by_deadline(&mut self) -> io::Result<Option<()>> {
        let Some(deadline) = self.prompt("Enter deadline to filter by (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        match self.store.filter_by_deadline(&deadline) {
            Ok(tasks) if tasks.is_empty() => {
                writeln!(self.output, "There are no tasks with deadline {deadline}.")?
            }
            Ok(tasks) => print_tasks(&mut self.output, "Filtered tasks:", tasks)?,
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(Some(()))
    }

    fn save(&mut self) -> io::Result<Option<()>> {
        let prompt = format!(
            "Enter file path to save tasks (blank for {}): ",
            self.save_dir.display()
        );
        let Some(path) = self.prompt(&prompt)? else {
            return Ok(None);
        };
        let dir = if path.trim().is_empty() {
            self.save_dir.clone()
        } else {
            PathBuf::from(path.trim())
        };
        match storage::save_to_dir(&self.store, &dir) {
            Ok(file) => writeln!(self.output, "Tasks saved to file {}.", file.display())?,
            Err(error) => {
                warn!(%error, "save failed");
                writeln!(self.output, "{error}")?
            }
        }
        Ok(Some(()))
    }

    fn load(&mut self) -> io::Result<Option<()>> {
        let Some(path) = self.prompt("Enter file path to load tasks from: ")? else {
            return Ok(None);
        };
        match storage::load_from_file(Path::new(path.trim())) {
            Ok(store) => {
                self.store = store;
                writeln!(
                    self.output,
                    "Tasks loaded from file ({} tasks).",
                    self.store.count()
                )?;
            }
            Err(error) => {
                warn!(%error, "load failed");
                writeln!(self.output, "{error}")?;
            }
        }
        Ok(Some(()))
    }

    fn report(&mut self, result: Result<(), TaskError>, success: &str) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "{success}"),
            Err(error) => self.print_error(&error),
        }
    }

    fn print_error(&mut self, error: &TaskError) -> io::Result<()> {
        debug!(%error, "operation rejected");
        writeln!(self.output, "{error}")
    }

    fn print_tasks<'a>(
        &mut self,
        heading: &str,
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> io::Result<()> {
        print_tasks(&mut self.output, heading, tasks)
    }

    /// Writes `message`, then reads one line without its trailing newline.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn print_tasks<'a>(
    output: &mut impl Write,
    heading: &str,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> io::Result<()> {
    writeln!(output, "{heading}")?;
    for task in tasks {
        writeln!(output, "  {task}")?;
    }
    Ok(())
}
