//! HTTP backend for the todo and unit-conversion service.
//!
//! # Overview
//! Exposes todo CRUD, the conversion engine, conversion history, and Excel
//! export under `/api`, plus health endpoints at the root. Persistence is a
//! single SQLite connection behind a mutex; the conversion engine itself is
//! pure and needs no state at all.
//!
//! # Design
//! `app()` builds the router separately from `run()` so tests can drive it
//! in-process with `tower::ServiceExt::oneshot` against an in-memory
//! database.

pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod routes;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use rusqlite::Connection;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::error::ApiError;

pub use crate::models::{ConversionHistory, CreateTodo, Todo, TodoListResponse, UpdateTodo};

const SERVICE_NAME: &str = "To-Do App Backend";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state: one SQLite connection serialized by a mutex.
/// Handlers hold the guard only for the duration of their queries and never
/// across an await point.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db.lock().map_err(|_| ApiError::LockPoisoned)
    }
}

/// Build the full router. All API routes live under `/api`.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/todos", post(routes::todos::create_todo).get(routes::todos::list_todos))
        .route(
            "/todos/{id}",
            get(routes::todos::get_todo)
                .put(routes::todos::update_todo)
                .patch(routes::todos::update_todo)
                .delete(routes::todos::delete_todo),
        )
        .route("/converter/convert", post(routes::converter::convert_units))
        .route("/converter/units", get(routes::converter::available_units))
        .route(
            "/converter/history",
            post(routes::converter::save_history)
                .get(routes::converter::list_history)
                .delete(routes::converter::clear_history),
        )
        .route(
            "/converter/history/{id}",
            delete(routes::converter::delete_history),
        )
        .route("/export/excel", get(routes::export::export_all))
        .route("/export/excel/todos", get(routes::export::export_todos))
        .route(
            "/export/excel/conversions",
            get(routes::export::export_conversions),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {SERVICE_NAME} API"),
        "version": VERSION,
        "health": "/health",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": VERSION,
    }))
}
