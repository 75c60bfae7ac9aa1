//! REST API for managing todo items.
//!
//! A three-layer service around a single entity:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        HTTP handlers (Axum)             │  ← routing, JSON, validation
//! ├─────────────────────────────────────────┤
//! │        TodoService                      │  ← date windows, done-flag
//! │                                         │    derivation, mapping
//! ├─────────────────────────────────────────┤
//! │        TodoRepository                   │  ← PostgreSQL / in-memory
//! └─────────────────────────────────────────┘
//! ```
//!
//! The repository is a capability trait injected into the service at
//! construction: production wires in [`repository::PostgresTodoRepository`],
//! tests substitute [`repository::InMemoryTodoRepository`] and drive the
//! full router in memory.
//!
//! Not-found outcomes flow through the stack as explicit absent values
//! (`Option`/`bool`); only storage failures are errors.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;
pub mod state;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{AppError, StoreError};
pub use model::{Todo, TodoDraft, TodoResponse, UpdateTodoPercent};
pub use repository::{InMemoryTodoRepository, PostgresTodoRepository, TodoRepository};
pub use router::router;
pub use service::TodoService;
pub use state::AppState;
