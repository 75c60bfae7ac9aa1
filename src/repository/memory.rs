//! In-memory todo repository for tests.

use crate::error::StoreError;
use crate::model::{Todo, TodoFields};
use crate::repository::TodoRepository;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory todo repository.
///
/// Uses a shared map guarded by a mutex; identifiers are assigned from a
/// monotonically increasing counter. Behaves like the real store for every
/// contract point the service depends on, including the percent-update
/// ratchet and `updated_at` refreshes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    todos: HashMap<i64, Todo>,
    next_id: i64,
}

impl InMemoryTodoRepository {
    /// Create an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> Result<T, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Database("lock poisoned".to_string()))?;
        Ok(f(&mut inner))
    }
}

fn sorted_by_expiry(mut todos: Vec<Todo>) -> Vec<Todo> {
    todos.sort_by_key(|t| (t.expiry_at, t.id));
    todos
}

impl TodoRepository for InMemoryTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        self.with_inner(|inner| sorted_by_expiry(inner.todos.values().cloned().collect()))
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        self.with_inner(|inner| inner.todos.get(&id).cloned())
    }

    async fn list_in_expiry_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Todo>, StoreError> {
        self.with_inner(|inner| {
            sorted_by_expiry(
                inner
                    .todos
                    .values()
                    .filter(|t| t.expiry_at >= start && t.expiry_at <= end)
                    .cloned()
                    .collect(),
            )
        })
    }

    async fn create(&self, fields: TodoFields) -> Result<Todo, StoreError> {
        self.with_inner(|inner| {
            inner.next_id += 1;
            let todo = Todo {
                id: inner.next_id,
                title: fields.title,
                description: fields.description,
                expiry_at: fields.expiry_at,
                percent_complete: fields.percent_complete,
                is_done: fields.is_done,
                created_at: Utc::now(),
                updated_at: None,
            };
            inner.todos.insert(todo.id, todo.clone());
            todo
        })
    }

    async fn replace(&self, id: i64, fields: TodoFields) -> Result<Option<Todo>, StoreError> {
        self.with_inner(|inner| {
            inner.todos.get_mut(&id).map(|todo| {
                todo.title = fields.title;
                todo.description = fields.description;
                todo.expiry_at = fields.expiry_at;
                todo.percent_complete = fields.percent_complete;
                todo.is_done = fields.is_done;
                todo.updated_at = Some(Utc::now());
                todo.clone()
            })
        })
    }

    async fn update_percent(&self, id: i64, percent: i32) -> Result<Option<Todo>, StoreError> {
        self.with_inner(|inner| {
            inner.todos.get_mut(&id).map(|todo| {
                todo.percent_complete = percent;
                // One-way ratchet: set on 100, never cleared here.
                if percent == 100 {
                    todo.is_done = true;
                }
                todo.updated_at = Some(Utc::now());
                todo.clone()
            })
        })
    }

    async fn mark_done(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        self.with_inner(|inner| {
            inner.todos.get_mut(&id).map(|todo| {
                todo.percent_complete = 100;
                todo.is_done = true;
                todo.updated_at = Some(Utc::now());
                todo.clone()
            })
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.with_inner(|inner| inner.todos.remove(&id).is_some())
    }
}
