//! Todo domain service.
//!
//! Pure orchestration between input shapes and the record store: maps
//! stored entities to response shapes, derives the done flag from the
//! incoming percent on create/replace, and computes the local-time date
//! windows behind the today/tomorrow/week queries. Holds no state across
//! calls beyond the injected repository and clock.

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::model::{TodoDraft, TodoFields, TodoResponse};
use crate::repository::TodoRepository;
use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use std::sync::Arc;

/// Domain service for todo items.
///
/// The repository is injected at construction; production wires in
/// [`crate::repository::PostgresTodoRepository`], tests substitute
/// [`crate::repository::InMemoryTodoRepository`].
pub struct TodoService<R> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: TodoRepository> TodoService<R> {
    /// Create a service over the given repository, using the system clock.
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Create a service with an explicit clock, for tests.
    #[must_use]
    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Current instant from the service's clock.
    ///
    /// Handlers validate against this instead of the wall clock so the
    /// expiry-in-the-future rule follows the injected clock too.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// List every todo, ordered ascending by expiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn list_all(&self) -> Result<Vec<TodoResponse>, StoreError> {
        let todos = self.repo.list_all().await?;
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }

    /// Fetch a todo by id. `None` is a valid outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn get(&self, id: i64) -> Result<Option<TodoResponse>, StoreError> {
        let todo = self.repo.get(id).await?;
        Ok(todo.map(TodoResponse::from))
    }

    /// List todos expiring today, local time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn list_due_today(&self) -> Result<Vec<TodoResponse>, StoreError> {
        self.list_in_local_window(day_window(self.clock.today()))
            .await
    }

    /// List todos expiring tomorrow, local time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn list_due_tomorrow(&self) -> Result<Vec<TodoResponse>, StoreError> {
        self.list_in_local_window(day_window(self.clock.today() + Duration::days(1)))
            .await
    }

    /// List todos expiring in the current week (Sunday through Saturday,
    /// local time).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn list_due_this_week(&self) -> Result<Vec<TodoResponse>, StoreError> {
        self.list_in_local_window(week_window(self.clock.today()))
            .await
    }

    /// Create a todo from a validated draft. The done flag is derived from
    /// the draft's percent; the store assigns id and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn create(&self, draft: TodoDraft) -> Result<TodoResponse, StoreError> {
        let created = self.repo.create(TodoFields::from_draft(draft)).await?;
        Ok(TodoResponse::from(created))
    }

    /// Replace an existing todo's writable fields from a validated draft,
    /// recomputing the done flag from the incoming percent in both
    /// directions. `None` if no record with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn replace(
        &self,
        id: i64,
        draft: TodoDraft,
    ) -> Result<Option<TodoResponse>, StoreError> {
        if self.repo.get(id).await?.is_none() {
            return Ok(None);
        }

        let updated = self.repo.replace(id, TodoFields::from_draft(draft)).await?;
        Ok(updated.map(TodoResponse::from))
    }

    /// Set the completion percentage. The value is pre-validated to
    /// `0..=100` at the boundary; the store applies the one-way done
    /// ratchet. `None` if no record with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn update_percent(
        &self,
        id: i64,
        percent: i32,
    ) -> Result<Option<TodoResponse>, StoreError> {
        let updated = self.repo.update_percent(id, percent).await?;
        Ok(updated.map(TodoResponse::from))
    }

    /// Mark a todo done, forcing the percent to 100. `None` if no record
    /// with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn mark_done(&self, id: i64) -> Result<Option<TodoResponse>, StoreError> {
        let updated = self.repo.mark_done(id).await?;
        Ok(updated.map(TodoResponse::from))
    }

    /// Delete a todo. `false` if no record with `id` existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.repo.delete(id).await
    }

    async fn list_in_local_window(
        &self,
        (start, end): (NaiveDateTime, NaiveDateTime),
    ) -> Result<Vec<TodoResponse>, StoreError> {
        let todos = self
            .repo
            .list_in_expiry_range(local_to_utc(start), local_to_utc(end))
            .await?;
        Ok(todos.into_iter().map(TodoResponse::from).collect())
    }
}

/// Window covering one local calendar day: `[midnight, next midnight − 1ms]`.
fn day_window(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// Window covering the week containing `day`, starting Sunday at local
/// midnight: `[sunday 00:00, sunday + 7d − 1ms]`.
fn week_window(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let days_from_sunday = i64::from(day.weekday().num_days_from_sunday());
    let start = (day - Duration::days(days_from_sunday)).and_time(NaiveTime::MIN);
    let end = start + Duration::days(7) - Duration::milliseconds(1);
    (start, end)
}

/// Interpret a naive local date-time in the system time zone and convert
/// to UTC. Falls back to treating the value as UTC for instants that do
/// not exist locally (DST gaps).
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&naive), |dt| dt.with_timezone(&Utc))
}
