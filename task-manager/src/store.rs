use crate::error::TaskError;
use crate::task::{NewTask, Priority, Task, TaskUpdate};
use crate::validation::{validate_deadline, validate_new_task, validate_priority, validate_task_id};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{debug, info};

/// Totals over the tasks currently held by a [`TaskStore`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{\"total\": {}, \"completed\": {}, \"pending\": {}}}",
            self.total, self.completed, self.pending
        )
    }
}

/// Insertion-ordered, in-memory collection of tasks with unique ids.
///
/// Every mutating operation validates its input before touching any task, so
/// a failed call leaves the store exactly as it was.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { tasks: vec![] }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validates `new_task` and appends it.
    ///
    /// # Errors
    ///
    /// `InvalidId`, `InvalidPriority` or `InvalidDate` for a malformed field,
    /// and `DuplicateId` when a task with the same id is already stored.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, new_task: NewTask) -> Result<&Task, TaskError> {
        let task = validate_new_task(new_task)?;
        if self.position(task.id()).is_some() {
            debug!(id = task.id(), "rejecting duplicate id");
            return Err(TaskError::DuplicateId(task.id()));
        }
        info!(id = task.id(), "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Removes and returns the task with the given id.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Result<Task, TaskError> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);
        info!(id = task.id(), "task removed");
        Ok(task)
    }

    /// Replaces description, priority and deadline of an existing task.
    ///
    /// Priority and deadline are both validated before anything is written.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: &str, update: TaskUpdate) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let priority = validate_priority(&update.priority)?;
        let deadline = validate_deadline(&update.deadline)?;

        let task = &mut self.tasks[index];
        task.set_description(update.description);
        task.set_priority(priority);
        task.set_deadline(deadline);
        info!(id = task.id(), "task updated");
        Ok(task)
    }

    pub fn get(&self, id: &str) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        Ok(&self.tasks[index])
    }

    #[tracing::instrument(skip(self))]
    pub fn set_priority(&mut self, id: &str, priority: &str) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let priority = validate_priority(priority)?;
        let task = &mut self.tasks[index];
        task.set_priority(priority);
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    pub fn set_deadline(&mut self, id: &str, deadline: &str) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let deadline = validate_deadline(deadline)?;
        let task = &mut self.tasks[index];
        task.set_deadline(deadline);
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    pub fn set_description(&mut self, id: &str, description: String) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        task.set_description(description);
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    pub fn mark_completed(&mut self, id: &str) -> Result<&Task, TaskError> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        task.mark_completed();
        Ok(task)
    }

    /// Tasks whose description contains `keyword`, matched case-sensitively.
    pub fn search_by_keyword(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .collect()
    }

    /// Tasks with the given priority. An unknown priority is an error rather
    /// than an empty result.
    pub fn filter_by_priority(&self, priority: &str) -> Result<Vec<&Task>, TaskError> {
        let priority = validate_priority(priority)?;
        Ok(self.with_priority(priority).collect())
    }

    pub fn filter_by_deadline(&self, deadline: &str) -> Result<Vec<&Task>, TaskError> {
        let deadline = validate_deadline(deadline)?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| *task.deadline() == deadline)
            .collect())
    }

    pub fn filter_by_status(&self, completed: bool) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed() == completed)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }

    pub fn count_pending(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_completed()).count()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.count(),
            completed: self.count_completed(),
            pending: self.count_pending(),
        }
    }

    /// A copy of the tasks ordered by deadline; ties keep insertion order.
    pub fn sort_by_deadline(&self) -> Vec<Task> {
        let mut sorted = self.tasks.clone();
        sorted.sort_by(|a, b| a.deadline().cmp(b.deadline()));
        sorted
    }

    /// A copy of the tasks grouped high, then medium, then low. Each group
    /// keeps insertion order.
    pub fn sort_by_priority(&self) -> Vec<Task> {
        [Priority::High, Priority::Medium, Priority::Low]
            .into_iter()
            .flat_map(|priority| self.with_priority(priority).cloned())
            .collect()
    }

    fn with_priority(&self, priority: Priority) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.priority() == priority)
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn index_of(&self, id: &str) -> Result<usize, TaskError> {
        let id = validate_task_id(id)?;
        self.position(id).ok_or(TaskError::NotFound)
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
