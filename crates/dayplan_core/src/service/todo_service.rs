//! To-do list use-case service.
//!
//! # Responsibility
//! - Own the in-memory divider list and apply all mutation rules.
//! - Mirror every effective mutation to the storage slot before returning.
//! - Notify completion listeners ahead of task removal.
//!
//! # Invariants
//! - Blank names and unresolved ids are defined no-ops, never errors.
//! - Persist failures are logged and swallowed; callers are not notified.
//! - Issued ids are strictly increasing, so same-millisecond creations and
//!   reloads never collide.

use crate::clock::{Clock, SystemClock};
use crate::model::todo::{Divider, DividerId, Task, TaskId, TaskTag};
use crate::repo::todo_repo::TodoRepository;
use log::warn;

/// Observer for task completion, supplied by the embedding view.
///
/// Invoked with the completed task and its divider's name before the task is
/// removed from the store. The accomplished-history surface lives on the
/// other side of this seam.
pub trait TaskCompletedListener {
    fn on_task_completed(&self, task: &Task, divider_name: &str);
}

/// Tag selection for the derived filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    /// Every task, unfiltered.
    All,
    /// Only tasks carrying exactly this tag.
    Tag(TaskTag),
}

/// Use-case service owning the divider list and its persistence mirror.
///
/// Single-threaded by design: each operation runs to completion, including
/// the persistence write, before the next one starts.
pub struct TodoService<R: TodoRepository> {
    repo: R,
    dividers: Vec<Divider>,
    clock: Box<dyn Clock>,
    listeners: Vec<Box<dyn TaskCompletedListener>>,
    last_issued_id: i64,
}

impl<R: TodoRepository> TodoService<R> {
    /// Loads the persisted document once and builds the service around it.
    ///
    /// # Contract
    /// - Missing or malformed persisted data yields an empty store; the
    ///   failure is logged but never surfaced.
    pub fn load(repo: R) -> Self {
        Self::load_with_clock(repo, Box::new(SystemClock))
    }

    /// Loads with a caller-provided clock for deterministic id generation.
    pub fn load_with_clock(repo: R, clock: Box<dyn Clock>) -> Self {
        let dividers = match repo.load() {
            Ok(Some(dividers)) => dividers,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=document_load module=service status=fallback outcome=empty_store error={}",
                    err
                );
                Vec::new()
            }
        };

        let last_issued_id = highest_id(&dividers);

        Self {
            repo,
            dividers,
            clock,
            listeners: Vec::new(),
            last_issued_id,
        }
    }

    /// Registers a completion listener.
    pub fn add_listener(&mut self, listener: Box<dyn TaskCompletedListener>) {
        self.listeners.push(listener);
    }

    /// Read access to the full divider list in insertion order.
    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    /// Appends a new divider with an empty task list.
    ///
    /// # Contract
    /// - No-op returning `None` when `name` trims to empty.
    /// - The stored name keeps its surrounding whitespace verbatim.
    pub fn add_divider(&mut self, name: impl Into<String>) -> Option<DividerId> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }

        let id = self.next_id();
        self.dividers.push(Divider::new(id, name));
        self.persist_snapshot();
        Some(id)
    }

    /// Appends a new untagged task to the given divider.
    ///
    /// # Contract
    /// - No-op returning `None` when `name` trims to empty or `divider_id`
    ///   does not resolve.
    pub fn add_task(&mut self, divider_id: DividerId, name: impl Into<String>) -> Option<TaskId> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        let divider_index = self.divider_position(divider_id)?;

        let id = self.next_id();
        self.dividers[divider_index].tasks.push(Task::new(id, name));
        self.persist_snapshot();
        Some(id)
    }

    /// Toggles a tag on a task: sets `tag`, or clears it when the task
    /// already carries that exact tag.
    ///
    /// Returns `false` without persisting when either id does not resolve.
    pub fn toggle_tag(&mut self, divider_id: DividerId, task_id: TaskId, tag: TaskTag) -> bool {
        let divider_index = match self.divider_position(divider_id) {
            Some(index) => index,
            None => return false,
        };
        let task_index = match self.dividers[divider_index].task_position(task_id) {
            Some(index) => index,
            None => return false,
        };

        let task = &mut self.dividers[divider_index].tasks[task_index];
        task.tag = if task.tag == Some(tag) { None } else { Some(tag) };
        self.persist_snapshot();
        true
    }

    /// Completes a task: notifies every listener with the task and its
    /// divider's name, then removes the task permanently.
    ///
    /// Returns `false` without notifying when either id does not resolve.
    pub fn complete_task(&mut self, divider_id: DividerId, task_id: TaskId) -> bool {
        let divider_index = match self.divider_position(divider_id) {
            Some(index) => index,
            None => return false,
        };
        let task_index = match self.dividers[divider_index].task_position(task_id) {
            Some(index) => index,
            None => return false,
        };

        {
            let divider = &self.dividers[divider_index];
            let task = &divider.tasks[task_index];
            for listener in &self.listeners {
                listener.on_task_completed(task, &divider.name);
            }
        }

        self.dividers[divider_index].tasks.remove(task_index);
        self.persist_snapshot();
        true
    }

    /// Removes a task permanently with no completion notification.
    ///
    /// Returns `false` when either id does not resolve.
    pub fn delete_task(&mut self, divider_id: DividerId, task_id: TaskId) -> bool {
        let divider_index = match self.divider_position(divider_id) {
            Some(index) => index,
            None => return false,
        };
        let task_index = match self.dividers[divider_index].task_position(task_id) {
            Some(index) => index,
            None => return false,
        };

        self.dividers[divider_index].tasks.remove(task_index);
        self.persist_snapshot();
        true
    }

    /// Derived view: each divider with its task list narrowed to `filter`.
    ///
    /// Dividers are retained even when the narrowed list is empty. The
    /// underlying store is not mutated.
    pub fn filtered(&self, filter: TagFilter) -> Vec<Divider> {
        match filter {
            TagFilter::All => self.dividers.clone(),
            TagFilter::Tag(tag) => self
                .dividers
                .iter()
                .map(|divider| Divider {
                    id: divider.id,
                    name: divider.name.clone(),
                    tasks: divider
                        .tasks
                        .iter()
                        .filter(|task| task.tag == Some(tag))
                        .cloned()
                        .collect(),
                })
                .collect(),
        }
    }

    fn divider_position(&self, divider_id: DividerId) -> Option<usize> {
        self.dividers
            .iter()
            .position(|divider| divider.id == divider_id)
    }

    /// Issues the next creation-time-derived id.
    ///
    /// Clamped above the last issued id so bursts within one millisecond and
    /// clock steps backwards still produce unique, increasing ids.
    fn next_id(&mut self) -> i64 {
        let candidate = self.clock.now_epoch_ms();
        self.last_issued_id = candidate.max(self.last_issued_id + 1);
        self.last_issued_id
    }

    fn persist_snapshot(&self) {
        if let Err(err) = self.repo.persist(&self.dividers) {
            warn!(
                "event=document_persist module=service status=swallowed error={}",
                err
            );
        }
    }
}

fn highest_id(dividers: &[Divider]) -> i64 {
    dividers
        .iter()
        .flat_map(|divider| {
            std::iter::once(divider.id).chain(divider.tasks.iter().map(|task| task.id))
        })
        .max()
        .unwrap_or(0)
}
