//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose fetch/mutate entry points over the list store to Dart via FRB.
//! - Flatten core records and errors into plain envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every mutation opens its own connection and runs one
//!   load -> reconcile -> save cycle.
//! - Failures carry a stable `error_code` plus a human-readable message.

use listkeep_core::db::open_db;
use listkeep_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, partition_tasks,
    ping as ping_inner, ColorChoice, CollectionStore, InitOutcome, ListService, ServiceResult,
    SqliteStoreAdapter, StoreConfig, Task, TaskCounts, Theme, ThemeMode, TodoList,
};
use log::warn;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "listkeep.sqlite3";
const STORE_DB_PATH_ENV: &str = "LISTKEEP_DB_PATH";
static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// # FFI contract
/// - `db_path` must be absolute.
/// - First successful call wins; repeating it with the same path is a no-op.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let requested = match StoreConfig::new(db_path.as_str()) {
        Ok(config) => config,
        Err(err) => return err,
    };
    let active = STORE_CONFIG.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.db_path.display(),
            requested.db_path.display()
        )
    }
}

/// Task row as shown to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub starred: bool,
}

/// List row with tasks ordered starred-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: i64,
    pub title: String,
    pub color_id: String,
    pub dark_color: String,
    pub light_color: String,
    pub last_edited: String,
    pub tasks: Vec<TaskItem>,
    pub total_count: u32,
    pub completed_count: u32,
}

/// Response envelope for collection reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListsResponse {
    /// Lists ordered newest first.
    pub items: Vec<ListItem>,
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
}

/// Response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// List created, changed or removed.
    pub list_id: Option<i64>,
    /// Task created, changed or removed.
    pub task_id: Option<i64>,
    pub error_code: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, list_id: i64, task_id: Option<i64>) -> Self {
        Self {
            ok: true,
            list_id: Some(list_id),
            task_id,
            error_code: None,
            message: message.into(),
        }
    }

    fn failure(operation: &str, failure: Failure) -> Self {
        Self {
            ok: false,
            list_id: None,
            task_id: None,
            error_code: Some(failure.code.to_string()),
            message: format!("{operation} failed: {}", failure.message),
        }
    }
}

/// Resolved theme colours; the caller holds the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub mode: String,
    pub text: String,
    pub subtext: String,
    pub background: String,
    pub secondary: String,
    pub icon: String,
    pub button: String,
    pub star: String,
    /// Palette entries in selection order.
    pub palette: Vec<PaletteEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub color_id: String,
    pub accent: String,
}

/// Seeds sample lists on first run.
#[flutter_rust_bridge::frb(sync)]
pub fn lists_initialize() -> ActionResponse {
    match with_list_service(|service| service.ensure_initialized()) {
        Ok(InitOutcome::Seeded(_)) => ActionResponse {
            ok: true,
            list_id: None,
            task_id: None,
            error_code: None,
            message: "Default lists created.".to_string(),
        },
        Ok(InitOutcome::AlreadyInitialized) => ActionResponse {
            ok: true,
            list_id: None,
            task_id: None,
            error_code: None,
            message: "Lists already initialized.".to_string(),
        },
        Err(failure) => ActionResponse::failure("lists_initialize", failure),
    }
}

/// Fetches every list, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn lists_fetch() -> ListsResponse {
    lists_response(
        "lists_fetch",
        with_list_service(|service| service.fetch_collection()),
    )
}

/// Fetches lists whose title contains `query` (case-insensitive).
#[flutter_rust_bridge::frb(sync)]
pub fn lists_search(query: String) -> ListsResponse {
    lists_response(
        "lists_search",
        with_list_service(|service| service.search_lists(query.as_str())),
    )
}

/// Creates a list; `color` is one of `red|green|blue|purple`.
#[flutter_rust_bridge::frb(sync)]
pub fn list_create(title: String, color: String) -> ActionResponse {
    let color = match parse_color(color.as_str()) {
        Ok(color) => color,
        Err(failure) => return ActionResponse::failure("list_create", failure),
    };
    match with_list_service(|service| service.create_list(title.as_str(), color)) {
        Ok(list) => ActionResponse::success("List created.", list.id, None),
        Err(failure) => ActionResponse::failure("list_create", failure),
    }
}

/// Renames and/or recolors a list; `None` keeps the current value.
#[flutter_rust_bridge::frb(sync)]
pub fn list_update(list_id: i64, title: Option<String>, color: Option<String>) -> ActionResponse {
    let color = match color.as_deref().map(parse_color).transpose() {
        Ok(color) => color,
        Err(failure) => return ActionResponse::failure("list_update", failure),
    };
    match with_list_service(|service| service.update_list(list_id, title.as_deref(), color)) {
        Ok(list) => ActionResponse::success("List updated.", list.id, None),
        Err(failure) => ActionResponse::failure("list_update", failure),
    }
}

/// Deletes a list and all of its tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn list_delete(list_id: i64) -> ActionResponse {
    match with_list_service(|service| service.delete_list(list_id)) {
        Ok(()) => ActionResponse::success("List deleted.", list_id, None),
        Err(failure) => ActionResponse::failure("list_delete", failure),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_add(list_id: i64, title: String) -> ActionResponse {
    task_action("task_add", "Task added.", list_id, |service| {
        service.add_task(list_id, title.as_str())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_complete(list_id: i64, task_id: i64) -> ActionResponse {
    task_action("task_toggle_complete", "Task updated.", list_id, |service| {
        service.toggle_complete(list_id, task_id)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_star(list_id: i64, task_id: i64) -> ActionResponse {
    task_action("task_toggle_star", "Task updated.", list_id, |service| {
        service.toggle_star(list_id, task_id)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_edit_title(list_id: i64, task_id: i64, title: String) -> ActionResponse {
    task_action("task_edit_title", "Task updated.", list_id, |service| {
        service.edit_task_title(list_id, task_id, title.as_str())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(list_id: i64, task_id: i64) -> ActionResponse {
    match with_list_service(|service| service.delete_task(list_id, task_id)) {
        Ok(()) => ActionResponse::success("Task deleted.", list_id, Some(task_id)),
        Err(failure) => ActionResponse::failure("task_delete", failure),
    }
}

/// Resolves colours for `mode` (`light|dark`); unknown modes fall back to
/// light.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_colors(mode: String) -> ThemeColors {
    let mode = ThemeMode::parse(mode.as_str()).unwrap_or_default();
    let theme = Theme::for_mode(mode);
    ThemeColors {
        mode: mode.as_str().to_string(),
        text: theme.text.to_string(),
        subtext: theme.subtext.to_string(),
        background: theme.background.to_string(),
        secondary: theme.secondary.to_string(),
        icon: theme.icon.to_string(),
        button: theme.button.to_string(),
        star: theme.star.to_string(),
        palette: ColorChoice::ALL
            .into_iter()
            .map(|choice| PaletteEntry {
                name: choice.name().to_string(),
                color_id: choice.color_id().to_string(),
                accent: theme.accent(choice).to_string(),
            })
            .collect(),
    }
}

struct Failure {
    code: &'static str,
    message: String,
}

fn resolve_store_config() -> Result<StoreConfig, Failure> {
    if let Some(config) = STORE_CONFIG.get() {
        return Ok(config.clone());
    }
    let from_env = std::env::var(STORE_DB_PATH_ENV)
        .ok()
        .filter(|raw| !raw.trim().is_empty());
    let path = from_env.unwrap_or_else(|| {
        std::env::temp_dir()
            .join(STORE_DB_FILE_NAME)
            .to_string_lossy()
            .into_owned()
    });
    StoreConfig::new(path.as_str()).map_err(|message| Failure {
        code: "config_invalid",
        message,
    })
}

fn with_list_service<T>(
    f: impl FnOnce(&mut ListService<SqliteStoreAdapter<'_>>) -> ServiceResult<T>,
) -> Result<T, Failure> {
    let config = resolve_store_config()?;
    let conn = open_db(&config.db_path).map_err(|err| Failure {
        code: "store_unavailable",
        message: format!("list DB open failed: {err}"),
    })?;
    let adapter = SqliteStoreAdapter::try_new(&conn).map_err(|err| Failure {
        code: "store_unavailable",
        message: format!("list store init failed: {err}"),
    })?;
    let mut service = ListService::new(CollectionStore::with_key(adapter, config.storage_key));
    f(&mut service).map_err(|err| {
        warn!(
            "event=ffi_call module=ffi status=error error_code={}",
            err.code()
        );
        Failure {
            code: err.code(),
            message: err.to_string(),
        }
    })
}

fn task_action(
    operation: &str,
    message: &str,
    list_id: i64,
    f: impl FnOnce(&mut ListService<SqliteStoreAdapter<'_>>) -> ServiceResult<Task>,
) -> ActionResponse {
    match with_list_service(f) {
        Ok(task) => ActionResponse::success(message, list_id, Some(task.id)),
        Err(failure) => ActionResponse::failure(operation, failure),
    }
}

fn lists_response(operation: &str, result: Result<Vec<TodoList>, Failure>) -> ListsResponse {
    match result {
        Ok(lists) => {
            let items = lists.iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No lists.".to_string()
            } else {
                format!("Found {} list(s).", items.len())
            };
            ListsResponse {
                items,
                ok: true,
                error_code: None,
                message,
            }
        }
        Err(failure) => ListsResponse {
            items: Vec::new(),
            ok: false,
            error_code: Some(failure.code.to_string()),
            message: format!("{operation} failed: {}", failure.message),
        },
    }
}

fn parse_color(value: &str) -> Result<ColorChoice, Failure> {
    ColorChoice::parse(value).ok_or_else(|| Failure {
        code: "validation_failed",
        message: format!("unknown color `{value}`; expected red|green|blue|purple"),
    })
}

fn to_list_item(list: &TodoList) -> ListItem {
    let (starred, rest) = partition_tasks(&list.todos);
    let counts = TaskCounts::of(list);
    ListItem {
        id: list.id,
        title: list.title.clone(),
        color_id: list.color_id.clone(),
        dark_color: list.dark_color.clone(),
        light_color: list.light_color.clone(),
        last_edited: list.last_edited.clone(),
        tasks: starred.into_iter().chain(rest).map(to_task_item).collect(),
        total_count: u32::try_from(counts.total).unwrap_or(u32::MAX),
        completed_count: u32::try_from(counts.completed).unwrap_or(u32::MAX),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title.clone(),
        completed: task.completed,
        starred: task.starred,
    }
}
