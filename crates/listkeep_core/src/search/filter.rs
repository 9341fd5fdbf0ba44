//! Case-insensitive title filter.
//!
//! # Invariants
//! - Output preserves input order.
//! - A blank query matches everything.

use crate::model::todo_list::{Task, TodoList};

/// Anything with a searchable title.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for TodoList {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Task {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Normalized, reusable title query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    needle: String,
}

impl TitleQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, title: &str) -> bool {
        self.is_blank() || title.to_lowercase().contains(&self.needle)
    }

    /// Borrows the matching items, in input order.
    pub fn filter<'a, T: Titled>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.matches(item.title()))
            .collect()
    }
}

/// Lists whose title contains `query`, ignoring case.
pub fn filter_lists<'a>(query: &str, lists: &'a [TodoList]) -> Vec<&'a TodoList> {
    TitleQuery::new(query).filter(lists)
}

/// Tasks whose title contains `query`, ignoring case.
pub fn filter_tasks<'a>(query: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    TitleQuery::new(query).filter(tasks)
}

#[cfg(test)]
mod tests {
    use super::{filter_tasks, TitleQuery};
    use crate::model::todo_list::Task;

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let query = TitleQuery::new("  GROC ");
        assert!(query.matches("Buy groceries"));
        assert!(!query.matches("Send emails"));
    }

    #[test]
    fn blank_query_keeps_everything_in_order() {
        let tasks = vec![Task::new(2, "b"), Task::new(1, "a")];
        let hits = filter_tasks("   ", &tasks);
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn non_ascii_titles_match_case_insensitively() {
        let tasks = vec![Task::new(1, "Ägypten Reise"), Task::new(2, "Other")];
        let hits = filter_tasks("äGYP", &tasks);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}
