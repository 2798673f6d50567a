//! Task and divider domain model.
//!
//! # Responsibility
//! - Define the canonical record for tasks grouped under user-named dividers.
//! - Pin the JSON wire shape of the persisted document.
//!
//! # Invariants
//! - Divider and task ids are unique within their respective scopes.
//! - A task belongs to exactly one divider.
//! - `completed` stays `false` for every task held in the store; completion
//!   removes the task instead of flagging it. The field is kept on the wire
//!   for document compatibility.

use serde::{Deserialize, Serialize};

/// Creation-time-derived identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Creation-time-derived identifier for a divider.
pub type DividerId = i64;

/// Optional classification label carried by a task.
///
/// Serialized in camelCase (`"doLater"`) to match the persisted document
/// shape. An untagged task serializes its tag as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskTag {
    /// Needs attention before anything else.
    Priority,
    /// Expected to take a long stretch of time.
    Lengthy,
    /// Can be knocked out in a few minutes.
    Quick,
    /// Deliberately deferred.
    DoLater,
}

/// One actionable item inside a divider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the owning divider's scope.
    pub id: TaskId,
    /// Display name, stored verbatim as entered.
    pub name: String,
    /// At most one tag; `None` serializes as `null`.
    pub tag: Option<TaskTag>,
    /// Always `false` while the task is in the store.
    pub completed: bool,
}

impl Task {
    /// Creates an untagged, uncompleted task.
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: None,
            completed: false,
        }
    }
}

/// User-named category grouping an ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divider {
    /// Unique within the store.
    pub id: DividerId,
    /// Display name, stored verbatim as entered.
    pub name: String,
    /// Tasks in insertion order. May be empty.
    pub tasks: Vec<Task>,
}

impl Divider {
    /// Creates a divider with an empty task list.
    pub fn new(id: DividerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Finds a task by id within this divider.
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Finds the position of a task by id within this divider.
    pub fn task_position(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }
}
