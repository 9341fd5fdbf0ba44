//! Collection reconciler: pure `(collection, mutation) -> collection`
//! transforms.
//!
//! # Responsibility
//! - Validate mutation input before anything is touched.
//! - Apply one mutation to a copy of the collection.
//!
//! # Invariants
//! - The input collection is never modified; on error nothing changes.
//! - Only the targeted list (or task inside it) differs in the output;
//!   every other list keeps its value and relative position.
//! - The touched list's `lastEdited` is set for every list-level and
//!   task-level mutation.
//! - New ids never collide with existing ids in their scope.

pub mod context;

use crate::model::palette::ColorChoice;
use crate::model::todo_list::{
    normalize_title, Collection, ListId, Task, TaskId, TitleError, TodoList,
};
use context::EditContext;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Mutation rejected by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    ListNotFound(ListId),
    TaskNotFound { list_id: ListId, task_id: TaskId },
    Validation(TitleError),
    /// An id above the current maximum in scope does not fit in `i64`.
    IdSpaceExhausted,
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::TaskNotFound { list_id, task_id } => {
                write!(f, "task not found: {task_id} in list {list_id}")
            }
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::IdSpaceExhausted => write!(f, "no unused id left in scope"),
        }
    }
}

impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TitleError> for ReconcileError {
    fn from(value: TitleError) -> Self {
        Self::Validation(value)
    }
}

/// One change requested by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateList {
        title: String,
        color: ColorChoice,
    },
    /// Rename and/or recolor; `None` fields stay unchanged.
    UpdateList {
        list_id: ListId,
        title: Option<String>,
        color: Option<ColorChoice>,
    },
    DeleteList {
        list_id: ListId,
    },
    AddTask {
        list_id: ListId,
        title: String,
    },
    ToggleComplete {
        list_id: ListId,
        task_id: TaskId,
    },
    ToggleStar {
        list_id: ListId,
        task_id: TaskId,
    },
    EditTaskTitle {
        list_id: ListId,
        task_id: TaskId,
        title: String,
    },
    DeleteTask {
        list_id: ListId,
        task_id: TaskId,
    },
}

impl Mutation {
    /// Stable name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateList { .. } => "create_list",
            Self::UpdateList { .. } => "update_list",
            Self::DeleteList { .. } => "delete_list",
            Self::AddTask { .. } => "add_task",
            Self::ToggleComplete { .. } => "toggle_complete",
            Self::ToggleStar { .. } => "toggle_star",
            Self::EditTaskTitle { .. } => "edit_task_title",
            Self::DeleteTask { .. } => "delete_task",
        }
    }
}

/// Result of a successful [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub collection: Collection,
    /// List created, changed or removed.
    pub list_id: ListId,
    /// Task created, changed or removed, for task-level mutations.
    pub task_id: Option<TaskId>,
}

/// Applies `mutation` to a copy of `collection`.
pub fn apply(
    collection: &Collection,
    mutation: &Mutation,
    ctx: &mut EditContext<'_>,
) -> ReconcileResult<Applied> {
    match mutation {
        Mutation::CreateList { title, color } => {
            let title = normalize_title(title)?;
            let list_id = ctx.next_id(collection.max_list_id())?;
            let mut lists = collection.lists().to_vec();
            lists.push(TodoList::new(list_id, title, *color, ctx.last_edited()));
            Ok(Applied {
                collection: Collection::from(lists),
                list_id,
                task_id: None,
            })
        }
        Mutation::UpdateList {
            list_id,
            title,
            color,
        } => {
            let title = title.as_deref().map(normalize_title).transpose()?;
            let collection = edit_list(collection, *list_id, ctx, |list| {
                if let Some(title) = title {
                    list.title = title;
                }
                if let Some(color) = color {
                    list.set_color(*color);
                }
                Ok(())
            })?;
            Ok(applied(collection, *list_id, None))
        }
        Mutation::DeleteList { list_id } => {
            let index = collection
                .position(*list_id)
                .ok_or(ReconcileError::ListNotFound(*list_id))?;
            let mut lists = collection.lists().to_vec();
            lists.remove(index);
            Ok(applied(Collection::from(lists), *list_id, None))
        }
        Mutation::AddTask { list_id, title } => {
            let title = normalize_title(title)?;
            let scope_max = collection
                .find(*list_id)
                .ok_or(ReconcileError::ListNotFound(*list_id))?
                .max_task_id();
            let task_id = ctx.next_id(scope_max)?;
            let collection = edit_list(collection, *list_id, ctx, |list| {
                list.todos.insert(0, Task::new(task_id, title));
                Ok(())
            })?;
            Ok(applied(collection, *list_id, Some(task_id)))
        }
        Mutation::ToggleComplete { list_id, task_id } => {
            let collection = edit_task(collection, *list_id, *task_id, ctx, |task| {
                task.completed = !task.completed;
            })?;
            Ok(applied(collection, *list_id, Some(*task_id)))
        }
        Mutation::ToggleStar { list_id, task_id } => {
            let collection = edit_task(collection, *list_id, *task_id, ctx, |task| {
                task.starred = !task.starred;
            })?;
            Ok(applied(collection, *list_id, Some(*task_id)))
        }
        Mutation::EditTaskTitle {
            list_id,
            task_id,
            title,
        } => {
            let title = normalize_title(title)?;
            let collection = edit_task(collection, *list_id, *task_id, ctx, |task| {
                task.title = title;
            })?;
            Ok(applied(collection, *list_id, Some(*task_id)))
        }
        Mutation::DeleteTask { list_id, task_id } => {
            let collection = edit_list(collection, *list_id, ctx, |list| {
                let index = list
                    .todos
                    .iter()
                    .position(|task| task.id == *task_id)
                    .ok_or(ReconcileError::TaskNotFound {
                        list_id: *list_id,
                        task_id: *task_id,
                    })?;
                list.todos.remove(index);
                Ok(())
            })?;
            Ok(applied(collection, *list_id, Some(*task_id)))
        }
    }
}

fn applied(collection: Collection, list_id: ListId, task_id: Option<TaskId>) -> Applied {
    Applied {
        collection,
        list_id,
        task_id,
    }
}

/// Edits a copy of one list in place and stamps `lastEdited`.
fn edit_list<F>(
    collection: &Collection,
    list_id: ListId,
    ctx: &EditContext<'_>,
    edit: F,
) -> ReconcileResult<Collection>
where
    F: FnOnce(&mut TodoList) -> ReconcileResult<()>,
{
    let index = collection
        .position(list_id)
        .ok_or(ReconcileError::ListNotFound(list_id))?;
    let mut target = collection.lists()[index].clone();
    edit(&mut target)?;
    target.last_edited = ctx.last_edited();

    let mut lists = collection.lists().to_vec();
    lists[index] = target;
    Ok(Collection::from(lists))
}

fn edit_task<F>(
    collection: &Collection,
    list_id: ListId,
    task_id: TaskId,
    ctx: &EditContext<'_>,
    edit: F,
) -> ReconcileResult<Collection>
where
    F: FnOnce(&mut Task),
{
    edit_list(collection, list_id, ctx, |list| {
        let task = list
            .todos
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or(ReconcileError::TaskNotFound { list_id, task_id })?;
        edit(task);
        Ok(())
    })
}
