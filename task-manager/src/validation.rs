//! Field validators shared by every operation that accepts raw input.
use crate::error::TaskError;
use crate::task::{Deadline, NewTask, Priority, Task};
use chrono::NaiveDate;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a task id, which must be a base-10 integer greater than zero.
pub fn validate_task_id(value: &str) -> Result<u32, TaskError> {
    let id: i64 = value.trim().parse().map_err(|_| TaskError::InvalidId)?;
    if id <= 0 {
        return Err(TaskError::InvalidId);
    }
    u32::try_from(id).map_err(|_| TaskError::InvalidId)
}

/// Parses `low`, `medium` or `high`, ignoring case.
pub fn validate_priority(value: &str) -> Result<Priority, TaskError> {
    match value.trim().to_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        _ => Err(TaskError::InvalidPriority),
    }
}

/// Checks that `value` is three dash-separated integers forming a real date.
///
/// The returned [`Deadline`] is always zero-padded `YYYY-MM-DD`, whatever
/// padding or surrounding whitespace the input used.
pub fn validate_deadline(value: &str) -> Result<Deadline, TaskError> {
    let parts = value
        .split('-')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| TaskError::InvalidDate)?;

    let &[year, month, day] = parts.as_slice() else {
        return Err(TaskError::InvalidDate);
    };

    let year = i32::try_from(year).map_err(|_| TaskError::InvalidDate)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TaskError::InvalidDate);
    }
    let month = u32::try_from(month).map_err(|_| TaskError::InvalidDate)?;
    let day = u32::try_from(day).map_err(|_| TaskError::InvalidDate)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(TaskError::InvalidDate)?;
    Ok(Deadline::new(date.format(DATE_FORMAT).to_string()))
}

/// Validates id, priority and deadline, in that order.
pub fn validate_new_task(new_task: NewTask) -> Result<Task, TaskError> {
    let id = validate_task_id(&new_task.id)?;
    let priority = validate_priority(&new_task.priority)?;
    let deadline = validate_deadline(&new_task.deadline)?;
    Ok(Task::new(id, new_task.description, priority, deadline))
}
