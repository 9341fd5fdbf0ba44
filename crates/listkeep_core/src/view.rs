//! Read-time display ordering helpers.
//!
//! Ordering here is presentation only; storage order is never changed by
//! these functions.

use crate::model::todo_list::{Task, TodoList};

/// Lists ordered newest first (`id` descending).
pub fn lists_for_display(lists: &[TodoList]) -> Vec<TodoList> {
    let mut sorted = lists.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}

/// Splits tasks into `(starred, unstarred)`, keeping relative order.
pub fn partition_tasks(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|task| task.starred)
}

/// Per-list progress summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub starred: usize,
}

impl TaskCounts {
    pub fn of(list: &TodoList) -> Self {
        list.todos.iter().fold(Self::default(), |mut counts, task| {
            counts.total += 1;
            counts.completed += usize::from(task.completed);
            counts.starred += usize::from(task.starred);
            counts
        })
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}
