//! List use-case service.
//!
//! # Responsibility
//! - Expose fetch and mutate entry points to the view layer.
//! - Run each mutation as load -> reconcile -> save.
//!
//! # Invariants
//! - Rejected mutations (validation, missing target) never reach `save`.
//! - Read-modify-write is unlocked: the last completed save wins.
//! - Ids issued by one service instance are strictly increasing.

use crate::model::palette::ColorChoice;
use crate::model::todo_list::{Collection, ListId, Task, TaskId, TodoList};
use crate::reconcile::context::{EditContext, IdGenerator};
use crate::reconcile::{apply, Applied, Mutation, ReconcileError};
use crate::search::filter::TitleQuery;
use crate::service::init::{default_collection, ensure_initialized, InitOutcome};
use crate::store::collection_store::CollectionStore;
use crate::store::{StoreAdapter, StoreError};
use crate::view::lists_for_display;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for list use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure.
    Store(StoreError),
    /// Mutation rejected; the stored collection is unchanged.
    Reconcile(ReconcileError),
    /// Reconciler output is missing the entity it reported.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Reconcile(ReconcileError::ListNotFound(_))
                | Self::Reconcile(ReconcileError::TaskNotFound { .. })
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Reconcile(ReconcileError::Validation(_)))
    }

    /// Stable error code for log events and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(err) if err.is_unavailable() => "store_unavailable",
            Self::Store(_) => "store_error",
            Self::Reconcile(ReconcileError::ListNotFound(_)) => "list_not_found",
            Self::Reconcile(ReconcileError::TaskNotFound { .. }) => "task_not_found",
            Self::Reconcile(ReconcileError::Validation(_)) => "validation_failed",
            Self::Reconcile(ReconcileError::IdSpaceExhausted) => "id_space_exhausted",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Reconcile(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent list state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Reconcile(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ReconcileError> for ServiceError {
    fn from(value: ReconcileError) -> Self {
        Self::Reconcile(value)
    }
}

/// List service facade over a collection store.
pub struct ListService<S: StoreAdapter> {
    store: CollectionStore<S>,
    ids: IdGenerator,
}

impl<S: StoreAdapter> ListService<S> {
    pub fn new(store: CollectionStore<S>) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
        }
    }

    /// Uses the default storage key on `adapter`.
    pub fn from_adapter(adapter: S) -> Self {
        Self::new(CollectionStore::new(adapter))
    }

    pub fn store(&self) -> &CollectionStore<S> {
        &self.store
    }

    /// Seeds default lists when the store holds nothing readable.
    pub fn ensure_initialized(&self) -> ServiceResult<InitOutcome> {
        Ok(ensure_initialized(&self.store)?)
    }

    /// Fetches every list ordered for display (newest first).
    ///
    /// Missing or corrupt state reads as an empty collection.
    pub fn fetch_collection(&self) -> ServiceResult<Vec<TodoList>> {
        let collection = self.store.load_or_empty()?;
        Ok(lists_for_display(collection.lists()))
    }

    /// Fetches one list by id.
    pub fn get_list(&self, list_id: ListId) -> ServiceResult<TodoList> {
        self.store
            .load_or_empty()?
            .find(list_id)
            .cloned()
            .ok_or(ServiceError::Reconcile(ReconcileError::ListNotFound(list_id)))
    }

    /// Lists whose title contains `query`, ordered for display.
    pub fn search_lists(&self, query: &str) -> ServiceResult<Vec<TodoList>> {
        let lists = self.fetch_collection()?;
        let query = TitleQuery::new(query);
        Ok(lists
            .into_iter()
            .filter(|list| query.matches(&list.title))
            .collect())
    }

    /// Tasks of one list whose title contains `query`.
    pub fn search_tasks(&self, list_id: ListId, query: &str) -> ServiceResult<Vec<Task>> {
        let list = self.get_list(list_id)?;
        Ok(TitleQuery::new(query)
            .filter(&list.todos)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Applies one mutation and persists the whole resulting collection.
    ///
    /// An absent collection is mutated as empty. An unreadable collection
    /// is replaced by [`default_collection`] before the mutation applies, so
    /// the sample lists are restored along with the change.
    ///
    /// # Errors
    /// - `Reconcile` when the mutation is invalid or its target is missing;
    ///   nothing is written.
    /// - `Store` when loading or saving fails; the stored value is left as
    ///   it was before the call.
    pub fn mutate(&mut self, mutation: &Mutation) -> ServiceResult<Applied> {
        let started_at = Instant::now();
        let result = self.mutate_inner(mutation);
        match &result {
            Ok(applied) => info!(
                "event=collection_mutate module=service status=ok kind={} list_id={} task_id={} duration_ms={}",
                mutation.kind(),
                applied.list_id,
                applied
                    .task_id
                    .map_or_else(|| "none".to_string(), |id| id.to_string()),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=collection_mutate module=service status=error kind={} error_code={} duration_ms={} error={}",
                mutation.kind(),
                err.code(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn mutate_inner(&mut self, mutation: &Mutation) -> ServiceResult<Applied> {
        let current = self.load_for_mutation()?;
        let mut ctx = EditContext::now(&mut self.ids);
        let applied = apply(&current, mutation, &mut ctx)?;
        self.store.save(&applied.collection)?;
        Ok(applied)
    }

    fn load_for_mutation(&self) -> ServiceResult<Collection> {
        match self.store.load() {
            Ok(collection) => Ok(collection),
            Err(StoreError::NotFound(_)) => Ok(Collection::new()),
            Err(StoreError::CorruptState { message, .. }) => {
                warn!(
                    "event=collection_load module=service status=warn reason=corrupt_state fallback=defaults error={}",
                    message
                );
                Ok(default_collection())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn create_list(&mut self, title: &str, color: ColorChoice) -> ServiceResult<TodoList> {
        let applied = self.mutate(&Mutation::CreateList {
            title: title.to_string(),
            color,
        })?;
        read_back_list(&applied.collection, applied.list_id)
    }

    /// Renames and/or recolors a list; `None` leaves the field unchanged.
    pub fn update_list(
        &mut self,
        list_id: ListId,
        title: Option<&str>,
        color: Option<ColorChoice>,
    ) -> ServiceResult<TodoList> {
        let applied = self.mutate(&Mutation::UpdateList {
            list_id,
            title: title.map(str::to_string),
            color,
        })?;
        read_back_list(&applied.collection, list_id)
    }

    /// Removes a list together with all of its tasks.
    pub fn delete_list(&mut self, list_id: ListId) -> ServiceResult<()> {
        self.mutate(&Mutation::DeleteList { list_id })?;
        Ok(())
    }

    pub fn add_task(&mut self, list_id: ListId, title: &str) -> ServiceResult<Task> {
        let applied = self.mutate(&Mutation::AddTask {
            list_id,
            title: title.to_string(),
        })?;
        read_back_task(&applied)
    }

    pub fn toggle_complete(&mut self, list_id: ListId, task_id: TaskId) -> ServiceResult<Task> {
        let applied = self.mutate(&Mutation::ToggleComplete { list_id, task_id })?;
        read_back_task(&applied)
    }

    pub fn toggle_star(&mut self, list_id: ListId, task_id: TaskId) -> ServiceResult<Task> {
        let applied = self.mutate(&Mutation::ToggleStar { list_id, task_id })?;
        read_back_task(&applied)
    }

    pub fn edit_task_title(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        title: &str,
    ) -> ServiceResult<Task> {
        let applied = self.mutate(&Mutation::EditTaskTitle {
            list_id,
            task_id,
            title: title.to_string(),
        })?;
        read_back_task(&applied)
    }

    pub fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> ServiceResult<()> {
        self.mutate(&Mutation::DeleteTask { list_id, task_id })?;
        Ok(())
    }
}

fn read_back_list(collection: &Collection, list_id: ListId) -> ServiceResult<TodoList> {
    collection
        .find(list_id)
        .cloned()
        .ok_or(ServiceError::InconsistentState(
            "mutated list missing from result",
        ))
}

fn read_back_task(applied: &Applied) -> ServiceResult<Task> {
    applied
        .task_id
        .and_then(|task_id| {
            applied
                .collection
                .find(applied.list_id)
                .and_then(|list| list.find_task(task_id))
        })
        .cloned()
        .ok_or(ServiceError::InconsistentState(
            "mutated task missing from result",
        ))
}
