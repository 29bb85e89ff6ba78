//! Todo CRUD handlers.
//!
//! Listing is paginated newest-first with an optional `completed` filter.
//! `PUT` and `PATCH` share one handler: both apply only the fields present
//! in the body.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::{CreateTodo, Todo, TodoListResponse, UpdateTodo};
use crate::routes::{check_paging, offset};
use crate::AppState;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 1000;

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ApiError::BadRequest(format!(
            "description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub completed: Option<bool>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    validate_title(&input.title)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: now,
        updated_at: now,
    };
    db::insert_todo(&*state.conn()?, &todo)?;
    tracing::info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TodoListResponse>, ApiError> {
    check_paging(params.page, params.page_size)?;

    let (items, total) = db::list_todos(
        &*state.conn()?,
        params.completed,
        offset(params.page, params.page_size),
        i64::from(params.page_size),
    )?;
    let total_pages = if total > 0 {
        ((total + i64::from(params.page_size) - 1) / i64::from(params.page_size)) as u32
    } else {
        0
    };

    Ok(Json(TodoListResponse {
        items,
        total,
        page: params.page,
        page_size: params.page_size,
        total_pages,
    }))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    let todo = db::get_todo(&*state.conn()?, id)?.ok_or(ApiError::NotFound("Todo"))?;
    Ok(Json(todo))
}

/// Shared by `PUT` and `PATCH`: only fields present in the body are applied.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let conn = state.conn()?;
    let mut todo = db::get_todo(&conn, id)?.ok_or(ApiError::NotFound("Todo"))?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    db::update_todo(&conn, &todo)?;
    tracing::info!(id = %todo.id, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if db::delete_todo(&*state.conn()?, id)? {
        tracing::info!(%id, "deleted todo");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Todo"))
    }
}
