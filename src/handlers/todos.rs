//! Todo CRUD handlers.
//!
//! Handlers validate input at the boundary, delegate to the domain
//! service, and translate absent results into 404 responses. They are
//! generic over the repository so the same routes run against PostgreSQL
//! in production and the in-memory store in tests.

use crate::error::AppError;
use crate::model::{TodoDraft, TodoResponse, UpdateTodoPercent};
use crate::repository::TodoRepository;
use crate::state::AppState;
use crate::validation::{validate_draft, validate_percent};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

/// `GET /api/todo` — list every todo, ordered by expiry.
pub async fn list_all<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.service.list_all().await?;
    Ok(Json(todos))
}

/// `GET /api/todo/:id` — fetch one todo, 404 if absent.
pub async fn get_by_id<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state
        .service
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo", id))?;
    Ok(Json(todo))
}

/// `GET /api/todo/today` — todos expiring today (local time).
pub async fn list_today<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.service.list_due_today().await?;
    Ok(Json(todos))
}

/// `GET /api/todo/tomorrow` — todos expiring tomorrow (local time).
pub async fn list_tomorrow<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.service.list_due_tomorrow().await?;
    Ok(Json(todos))
}

/// `GET /api/todo/week` — todos expiring in the current week.
pub async fn list_week<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.service.list_due_this_week().await?;
    Ok(Json(todos))
}

/// `POST /api/todo` — create a todo. 201 with a `Location` header on
/// success, 400 with per-field messages on validation failure.
pub async fn create<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Json(draft): Json<TodoDraft>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_draft(&draft, state.service.now());
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let created = state.service.create(draft).await?;
    let location = format!("/api/todo/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/todo/:id` — replace a todo's writable fields. 404 if absent,
/// 400 on validation failure.
pub async fn update<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<TodoResponse>, AppError> {
    let errors = validate_draft(&draft, state.service.now());
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let updated = state
        .service
        .replace(id, draft)
        .await?
        .ok_or_else(|| AppError::not_found("Todo", id))?;
    Ok(Json(updated))
}

/// `PATCH /api/todo/:id/percent` — set the completion percentage.
pub async fn update_percent<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTodoPercent>,
) -> Result<Json<TodoResponse>, AppError> {
    let errors = validate_percent(payload.percent_complete);
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let updated = state
        .service
        .update_percent(id, payload.percent_complete)
        .await?
        .ok_or_else(|| AppError::not_found("Todo", id))?;
    Ok(Json(updated))
}

/// `PATCH /api/todo/:id/done` — mark a todo done.
pub async fn mark_done<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let updated = state
        .service
        .mark_done(id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo", id))?;
    Ok(Json(updated))
}

/// `DELETE /api/todo/:id` — remove a todo. 204 on success, 404 if absent.
pub async fn delete_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Todo", id))
    }
}
