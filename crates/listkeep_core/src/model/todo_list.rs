//! List, task and collection records.
//!
//! # Responsibility
//! - Define the persisted shape of lists and tasks.
//! - Normalize and validate titles before they reach any write path.
//!
//! # Invariants
//! - Field names serialize as `id, title, colorId, darkColor, lightColor,
//!   lastEdited, todos` and `id, title, completed, starred`.
//! - `todos` is ordered newest first.
//! - Reads tolerate records written by older clients (British spellings,
//!   integer flags, missing colour fields).

use crate::model::palette::ColorChoice;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a list, unique within the collection.
pub type ListId = i64;

/// Identifier of a task, unique among the tasks of one list.
pub type TaskId = i64;

/// Maximum display length of list and task titles.
pub const MAX_TITLE_CHARS: usize = 30;

/// Title rejected by [`normalize_title`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or whitespace-only.
    Empty,
    /// Title exceeds [`MAX_TITLE_CHARS`] display characters.
    TooLong { chars: usize, max: usize },
}

impl Display for TitleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "title cannot be empty"),
            Self::TooLong { chars, max } => {
                write!(f, "title has {chars} characters; at most {max} are allowed")
            }
        }
    }
}

impl Error for TitleError {}

/// Trims surrounding whitespace and validates title length.
pub fn normalize_title(raw: &str) -> Result<String, TitleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong {
            chars,
            max: MAX_TITLE_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// A titled to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub completed: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub starred: bool,
}

impl Task {
    /// Creates an open, unstarred task.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            starred: false,
        }
    }
}

/// A named, coloured list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: ListId,
    pub title: String,
    #[serde(default, alias = "colourId", deserialize_with = "deserialize_color_id")]
    pub color_id: String,
    #[serde(default, alias = "darkColour", alias = "darkcolour")]
    pub dark_color: String,
    #[serde(default, alias = "lightColour", alias = "lightcolour")]
    pub light_color: String,
    /// Timestamp of the last content or metadata change.
    #[serde(default)]
    pub last_edited: String,
    /// Newest first.
    #[serde(default)]
    pub todos: Vec<Task>,
}

impl TodoList {
    /// Creates an empty list painted with `color`.
    pub fn new(
        id: ListId,
        title: impl Into<String>,
        color: ColorChoice,
        last_edited: impl Into<String>,
    ) -> Self {
        let mut list = Self {
            id,
            title: title.into(),
            color_id: String::new(),
            dark_color: String::new(),
            light_color: String::new(),
            last_edited: last_edited.into(),
            todos: Vec::new(),
        };
        list.set_color(color);
        list
    }

    /// Writes all three denormalized colour attributes.
    pub fn set_color(&mut self, color: ColorChoice) {
        self.color_id = color.color_id().to_string();
        self.dark_color = color.dark().to_string();
        self.light_color = color.light().to_string();
    }

    /// Palette entry for the stored `colorId`, if it is a known one.
    pub fn color(&self) -> Option<ColorChoice> {
        ColorChoice::from_color_id(&self.color_id)
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.todos.iter().find(|task| task.id == task_id)
    }

    pub fn max_task_id(&self) -> Option<TaskId> {
        self.todos.iter().map(|task| task.id).max()
    }

    /// Returns the first task id that appears more than once.
    pub fn duplicate_task_id(&self) -> Option<TaskId> {
        first_duplicate(self.todos.iter().map(|task| task.id))
    }
}

/// Every list, persisted as one aggregate under one storage key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    lists: Vec<TodoList>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn into_lists(self) -> Vec<TodoList> {
        self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn find(&self, list_id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn position(&self, list_id: ListId) -> Option<usize> {
        self.lists.iter().position(|list| list.id == list_id)
    }

    pub fn max_list_id(&self) -> Option<ListId> {
        self.lists.iter().map(|list| list.id).max()
    }

    /// Checks id uniqueness for lists and for the tasks of every list.
    pub fn check_ids(&self) -> Result<(), String> {
        if let Some(id) = first_duplicate(self.lists.iter().map(|list| list.id)) {
            return Err(format!("duplicate list id {id}"));
        }
        for list in &self.lists {
            if let Some(id) = list.duplicate_task_id() {
                return Err(format!("duplicate task id {id} in list {}", list.id));
            }
        }
        Ok(())
    }

    /// Gives every repeated list id, and every repeated task id within a
    /// list, a fresh id. The first occurrence keeps its id.
    ///
    /// Returns how many ids were changed.
    pub fn repair_ids(&mut self) -> usize {
        let mut changed = reassign_duplicates(self.lists.iter_mut().map(|list| &mut list.id));
        for list in &mut self.lists {
            changed += reassign_duplicates(list.todos.iter_mut().map(|task| &mut task.id));
        }
        changed
    }
}

impl From<Vec<TodoList>> for Collection {
    fn from(lists: Vec<TodoList>) -> Self {
        Self { lists }
    }
}

fn first_duplicate(ids: impl Iterator<Item = i64>) -> Option<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

fn reassign_duplicates<'a>(ids: impl Iterator<Item = &'a mut i64>) -> usize {
    let mut ids: Vec<&'a mut i64> = ids.collect();
    let mut taken: HashSet<i64> = ids.iter().map(|id| **id).collect();
    let mut candidate = ids.iter().map(|id| **id).max().unwrap_or(0);
    let mut seen = HashSet::new();
    let mut changed = 0;
    for id in &mut ids {
        if seen.insert(**id) {
            continue;
        }
        while taken.contains(&candidate) {
            candidate = candidate.wrapping_add(1);
        }
        **id = candidate;
        taken.insert(candidate);
        seen.insert(candidate);
        changed += 1;
    }
    changed
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(D::Error::custom(format!(
            "invalid flag value `{other}`; expected boolean or 0/1"
        ))),
    }
}

fn deserialize_color_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawColorId {
        Text(String),
        Number(i64),
        Null(()),
    }

    Ok(match RawColorId::deserialize(deserializer)? {
        RawColorId::Text(value) => value,
        RawColorId::Number(value) => value.to_string(),
        RawColorId::Null(()) => String::new(),
    })
}
