//! Domain data shapes for todo items.
//!
//! Three kinds of shapes live here:
//!
//! - [`Todo`] — the stored entity, owned by the record store. Identifier and
//!   `created_at` are assigned by the store, never by callers.
//! - [`TodoDraft`] / [`UpdateTodoPercent`] — caller-supplied input shapes,
//!   validated at the HTTP boundary before they reach the service.
//! - [`TodoResponse`] — the outward-facing projection returned to clients,
//!   decoupling the wire shape from the storage shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored todo item.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// Unique identifier, assigned by the store on creation.
    pub id: i64,
    /// Short title (non-empty, at most 200 characters).
    pub title: String,
    /// Free-form description (at most 1000 characters, may be empty).
    pub description: String,
    /// Due date and time.
    pub expiry_at: DateTime<Utc>,
    /// Completion percentage, always in `0..=100`.
    pub percent_complete: i32,
    /// Whether the item is done. Every path that sets `percent_complete`
    /// to 100 also sets this flag.
    pub is_done: bool,
    /// Set once by the store at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
    /// `None` until the first mutation, refreshed on every mutation after.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for creating or replacing a todo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    /// Short title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Due date and time.
    pub expiry_date_time: DateTime<Utc>,
    /// Completion percentage.
    #[serde(default)]
    pub percent_complete: i32,
}

/// Payload for the percent-only partial update.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoPercent {
    /// New completion percentage.
    pub percent_complete: i32,
}

/// Writable fields of a todo row, as handed to the record store.
///
/// The service derives `is_done` from the incoming percent before building
/// this; the store persists it as given.
#[derive(Debug, Clone)]
pub struct TodoFields {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Due date and time.
    pub expiry_at: DateTime<Utc>,
    /// Completion percentage.
    pub percent_complete: i32,
    /// Done flag, derived by the service.
    pub is_done: bool,
}

impl TodoFields {
    /// Build store fields from a validated draft, deriving the done flag
    /// from the incoming percent.
    #[must_use]
    pub fn from_draft(draft: TodoDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            expiry_at: draft.expiry_date_time,
            percent_complete: draft.percent_complete,
            is_done: draft.percent_complete == 100,
        }
    }
}

/// Outward-facing projection of a stored todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Unique identifier.
    pub id: i64,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Due date and time.
    pub expiry_date_time: DateTime<Utc>,
    /// Completion percentage.
    pub percent_complete: i32,
    /// Done flag.
    pub is_done: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, `null` until the first mutation.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            expiry_date_time: todo.expiry_at,
            percent_complete: todo.percent_complete,
            is_done: todo.is_done,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
