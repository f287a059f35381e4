use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Eq, PartialEq, Serialize, Clone)]
pub struct Task {
    id: u32,
    description: String,
    priority: Priority,
    deadline: Deadline,
    completed: bool,
}

impl Task {
    pub(crate) fn new(
        id: u32,
        description: String,
        priority: Priority,
        deadline: Deadline,
    ) -> Self {
        Self {
            id,
            description,
            priority,
            deadline,
            completed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub(crate) fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = deadline;
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.completed { "completed" } else { "pending" };
        write!(
            f,
            "#{} [{}] {} (due {}, {})",
            self.id, self.priority, self.description, self.deadline, status
        )
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deadline that has already been checked to name a real calendar date.
///
/// Always held as zero-padded `YYYY-MM-DD`, so comparing the text gives
/// chronological order.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Deadline(String);

impl Deadline {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw user input for a task that has not been validated yet.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct NewTask {
    pub id: String,
    pub description: String,
    pub priority: String,
    pub deadline: String,
}

impl NewTask {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            priority: priority.into(),
            deadline: deadline.into(),
        }
    }
}

/// Replacement values for the mutable fields of an existing task.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TaskUpdate {
    pub description: String,
    pub priority: String,
    pub deadline: String,
}
