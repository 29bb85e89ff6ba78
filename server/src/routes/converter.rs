//! Unit-conversion and conversion-history handlers.
//!
//! The engine itself is pure and synchronous, so `convert_units` runs it
//! inline. `unit_type` arrives as a raw string and is parsed here; an
//! unknown tag surfaces as a 400 with the supported categories in the
//! detail, matching the engine's error taxonomy end to end.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use convert_core::{registry, Conversion, ConversionRequest, UnitCategory};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::{AvailableUnits, ConversionHistory, ConvertRequestBody, CreateConversionHistory};
use crate::routes::{check_paging, offset};
use crate::AppState;

pub async fn convert_units(
    Json(body): Json<ConvertRequestBody>,
) -> Result<Json<Conversion>, ApiError> {
    let unit_type: UnitCategory = body.unit_type.parse().map_err(ApiError::Convert)?;
    let conversion = convert_core::convert(&ConversionRequest {
        value: body.value,
        from_unit: body.from_unit,
        to_unit: body.to_unit,
        unit_type,
    })?;
    tracing::info!(
        %unit_type,
        from = %conversion.from_unit,
        to = %conversion.to_unit,
        "converted units"
    );
    Ok(Json(conversion))
}

pub async fn available_units() -> Json<AvailableUnits> {
    Json(AvailableUnits {
        length: registry::units_for(UnitCategory::Length),
        weight: registry::units_for(UnitCategory::Weight),
        temperature: registry::units_for(UnitCategory::Temperature),
    })
}

pub async fn save_history(
    State(state): State<AppState>,
    Json(input): Json<CreateConversionHistory>,
) -> Result<(StatusCode, Json<ConversionHistory>), ApiError> {
    // Stored records keep the canonical category tag.
    let unit_type: UnitCategory = input.unit_type.parse().map_err(ApiError::Convert)?;
    let record = ConversionHistory {
        id: Uuid::new_v4(),
        value: input.value,
        from_unit: input.from_unit,
        to_unit: input.to_unit,
        result: input.result,
        unit_type: unit_type.as_str().to_string(),
        created_at: Utc::now(),
    };
    db::insert_history(&*state.conn()?, &record)?;
    tracing::info!(id = %record.id, "saved conversion to history");
    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<ConversionHistory>>, ApiError> {
    check_paging(params.page, params.page_size)?;
    let (records, _total) = db::list_history(
        &*state.conn()?,
        offset(params.page, params.page_size),
        i64::from(params.page_size),
    )?;
    Ok(Json(records))
}

pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if db::delete_history(&*state.conn()?, id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Conversion history"))
    }
}

pub async fn clear_history(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = db::clear_history(&*state.conn()?)?;
    tracing::info!(count, "cleared conversion history");
    Ok(Json(json!({
        "message": format!("Deleted {count} conversion history records")
    })))
}
