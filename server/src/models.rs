//! API DTOs and persisted record types.
//!
//! # Design
//! These mirror the wire schema directly. `UpdateTodo` applies only the
//! fields present in the JSON, so both `PUT` and `PATCH` behave as partial
//! updates. The converter request carries `unit_type` as a raw string and is
//! parsed into `convert_core::UnitCategory` at the handler boundary, where an
//! unknown tag becomes a 400 rather than a generic deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating a todo. Omitted fields remain unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Paginated todo listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub items: Vec<Todo>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Body of `POST /api/converter/convert`. `unit_type` stays a string here;
/// the handler parses it.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertRequestBody {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub unit_type: String,
}

/// Response of `GET /api/converter/units`, in registry declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableUnits {
    pub length: Vec<&'static str>,
    pub weight: Vec<&'static str>,
    pub temperature: Vec<&'static str>,
}

/// A persisted conversion-history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionHistory {
    pub id: Uuid,
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub result: f64,
    pub unit_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for saving a conversion to history.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConversionHistory {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub result: f64,
    pub unit_type: String,
}
