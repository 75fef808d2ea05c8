/// Get one listing endpoint
///
/// # Endpoint
///
/// `GET /api/properties/:id`
///
/// # Response
///
/// `200 OK` with the listing, or `404 Not Found` with an error body. A
/// missing listing is never a 200 with an empty body.

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use hearth_shared::models::property::Property;
use uuid::Uuid;

/// Get-one endpoint handler
///
/// # Errors
///
/// - 404 Not Found: id does not resolve to a listing
/// - 500 Internal Server Error: store failure
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Property>> {
    tracing::debug!(property_id = %id, "Getting property");

    let property = Property::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

    Ok(Json(property))
}
