use std::sync::Arc;

use axum::extract::{Extension, Json, Path, State};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::store::{MemoryStore, Technology};

/// Body shared by create and update; both parse the deadline the same way.
#[derive(Debug, Deserialize)]
pub struct TechnologyRequest {
    pub title: String,
    pub deadline: String,
}

/// POST /technologies - Add a study item to the resolved user's list
pub async fn create(
    State(store): State<Arc<MemoryStore>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<TechnologyRequest>,
) -> ApiResult<Technology> {
    let deadline = parse_deadline(&payload.deadline)?;
    let technology = store.add_technology(current.id, &payload.title, deadline)?;

    tracing::info!(
        "User '{}' added technology '{}' ({})",
        current.username,
        technology.title,
        technology.id
    );
    Ok(ApiResponse::created(technology))
}

/// GET /technologies - Full study list in insertion order
pub async fn list(
    State(store): State<Arc<MemoryStore>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Vec<Technology>> {
    let technologies = store.list_technologies(current.id)?;
    Ok(ApiResponse::success(technologies))
}

/// PUT /technologies/:id - Replace title and deadline of an existing item
pub async fn update(
    State(store): State<Arc<MemoryStore>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TechnologyRequest>,
) -> ApiResult<Technology> {
    let technology_id = parse_technology_id(&id)?;
    let deadline = parse_deadline(&payload.deadline)?;

    let technology =
        store.update_technology(current.id, technology_id, &payload.title, deadline)?;
    Ok(ApiResponse::success(technology))
}

/// PATCH /technologies/:id/studied - Mark an item as studied (idempotent)
pub async fn mark_studied(
    State(store): State<Arc<MemoryStore>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Technology> {
    let technology_id = parse_technology_id(&id)?;

    let technology = store.mark_studied(current.id, technology_id)?;
    Ok(ApiResponse::success(technology))
}

/// DELETE /technologies/:id - Remove an item from the list
pub async fn delete(
    State(store): State<Arc<MemoryStore>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let technology_id = parse_technology_id(&id)?;

    store.delete_technology(current.id, technology_id)?;

    tracing::info!("User '{}' deleted technology {}", current.username, technology_id);
    Ok(ApiResponse::success(json!({ "message": "Technology deleted." })))
}

/// A path id that is not a UUID can never match a stored technology, so it
/// reports the same 404 as an unknown id.
fn parse_technology_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Technology not found."))
}

/// Parse a request deadline. Accepts RFC 3339, a bare datetime (assumed UTC),
/// or a bare date (midnight UTC). Used identically by create and update.
fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(parsed.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(ApiError::bad_request("Invalid deadline date."))
}
