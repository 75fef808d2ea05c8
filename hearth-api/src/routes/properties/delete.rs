/// Delete listing endpoint
///
/// # Endpoint
///
/// `DELETE /api/properties/:id`
///
/// Removes the record and, as a compensating action, the image files it
/// referenced. File removal is best-effort and happens after the record is
/// gone, so a failed unlink can leave an orphaned file but never a dangling
/// record reference.
///
/// # Response
///
/// ```json
/// { "message": "Property deleted" }
/// ```

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use hearth_shared::models::property::Property;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delete confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Delete endpoint handler
///
/// # Errors
///
/// - 404 Not Found: id does not resolve to a listing
/// - 500 Internal Server Error: store failure
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Property::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

    tracing::info!(property_id = %id, images = deleted.images.len(), "Deleted property");

    state.intake.remove(&deleted.images).await;

    Ok(Json(DeleteResponse {
        message: "Property deleted".to_string(),
    }))
}
