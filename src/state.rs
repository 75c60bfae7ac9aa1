//! Application state shared across HTTP handlers.

use crate::repository::TodoRepository;
use crate::service::TodoService;
use std::sync::Arc;

/// Shared handler state, generic over the repository implementation so the
/// same router serves production (PostgreSQL) and tests (in-memory).
pub struct AppState<R> {
    /// The todo domain service.
    pub service: Arc<TodoService<R>>,
}

impl<R: TodoRepository> AppState<R> {
    /// Wrap a service into shared state.
    #[must_use]
    pub fn new(service: TodoService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// Manual impl: cloning the state must not require `R: Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
