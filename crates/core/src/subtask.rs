//! Embedded subtask values and their completion semantics.
//!
//! Subtasks are checklist entries stored inline on their parent task. They
//! have no identity of their own: callers address them by positional index
//! within the task's subtask list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single checklist entry embedded in a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    /// Build a new, not-yet-completed subtask.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Append a subtask with the given title. The title must be non-empty.
pub fn add_subtask(subtasks: &mut Vec<Subtask>, title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Subtask title is required".into()));
    }
    subtasks.push(Subtask::new(title));
    Ok(())
}

/// Flip the completion flag of the subtask at `index`.
pub fn toggle_subtask(subtasks: &mut [Subtask], index: usize) -> Result<(), CoreError> {
    let len = subtasks.len();
    let subtask = subtasks
        .get_mut(index)
        .ok_or_else(|| index_out_of_range(index, len))?;
    subtask.completed = !subtask.completed;
    Ok(())
}

/// Remove and return the subtask at `index`.
pub fn remove_subtask(subtasks: &mut Vec<Subtask>, index: usize) -> Result<Subtask, CoreError> {
    if index >= subtasks.len() {
        return Err(index_out_of_range(index, subtasks.len()));
    }
    Ok(subtasks.remove(index))
}

/// Completion percentage of a subtask list: `round(100 * done / total)`.
///
/// Defined as 0 when the list is empty.
pub fn completion_percent(subtasks: &[Subtask]) -> u8 {
    if subtasks.is_empty() {
        return 0;
    }
    let done = subtasks.iter().filter(|s| s.completed).count();
    let percent = (100.0 * done as f64 / subtasks.len() as f64).round();
    percent as u8
}

fn index_out_of_range(index: usize, len: usize) -> CoreError {
    CoreError::Validation(format!(
        "Subtask index {index} is out of range (task has {len} subtasks)"
    ))
}
