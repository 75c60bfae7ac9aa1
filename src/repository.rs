//! Record store contract for todo items.
//!
//! The repository exclusively owns persisted todo state. Absence of a
//! record is reported as `None`/`false`, never as an error; [`StoreError`]
//! covers only failures of the storage medium itself.
//!
//! Two implementations exist: [`PostgresTodoRepository`] for production and
//! [`InMemoryTodoRepository`] as the substitutable fake for tests. The
//! service receives whichever implementation explicitly at construction.
//!
//! Trait methods return `impl Future + Send` so handlers generic over the
//! repository remain spawnable.

use crate::error::StoreError;
use crate::model::{Todo, TodoFields};
use chrono::{DateTime, Utc};
use std::future::Future;

mod memory;
mod postgres;

pub use memory::InMemoryTodoRepository;
pub use postgres::PostgresTodoRepository;

/// Durable keyed storage of todo items.
pub trait TodoRepository: Send + Sync + 'static {
    /// List every todo, ordered ascending by expiry date-time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Todo>, StoreError>> + Send;

    /// Point lookup by identifier. `None` if no such record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Todo>, StoreError>> + Send;

    /// List todos with `start <= expiry <= end` (both ends inclusive),
    /// ordered ascending by expiry date-time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn list_in_expiry_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<Todo>, StoreError>> + Send;

    /// Persist a new todo. Assigns a fresh identifier and `created_at`,
    /// and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn create(&self, fields: TodoFields)
    -> impl Future<Output = Result<Todo, StoreError>> + Send;

    /// Overwrite the writable fields of an existing todo, refreshing
    /// `updated_at`. `created_at` is never touched. Returns `None` without
    /// writing if no record with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn replace(
        &self,
        id: i64,
        fields: TodoFields,
    ) -> impl Future<Output = Result<Option<Todo>, StoreError>> + Send;

    /// Set `percent_complete`, refreshing `updated_at`. Sets `is_done` when
    /// the new percent is exactly 100 and never clears it otherwise (a
    /// one-way ratchet). Returns `None` if no record with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn update_percent(
        &self,
        id: i64,
        percent: i32,
    ) -> impl Future<Output = Result<Option<Todo>, StoreError>> + Send;

    /// Force `percent_complete` to 100 and `is_done` to true, refreshing
    /// `updated_at`. Returns `None` if no record with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn mark_done(&self, id: i64)
    -> impl Future<Output = Result<Option<Todo>, StoreError>> + Send;

    /// Remove a todo. Returns `true` if a record was removed, `false` if
    /// none existed (a no-op).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage medium is unavailable.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
