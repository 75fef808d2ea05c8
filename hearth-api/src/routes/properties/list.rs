/// List listings endpoint
///
/// # Endpoint
///
/// `GET /api/properties` — all listings, in store-native order
/// `GET /api/properties?userId=<owner>` — only that owner's listings
///
/// # Response
///
/// `200 OK` with a JSON array of listings. An owner with no listings gets an
/// empty array, not an error.

use crate::app::AppState;
use crate::error::ApiResult;
use axum::{
    extract::{Query, State},
    Json,
};
use hearth_shared::models::property::Property;
use serde::Deserialize;

/// Query parameters for the listing index
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Restrict results to one owner's listings
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// List endpoint handler
///
/// # Errors
///
/// - 500 Internal Server Error: store failure
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Property>>> {
    tracing::debug!(owner = ?query.user_id, "Listing properties");

    let properties = Property::list(&state.db, query.user_id.as_deref()).await?;

    Ok(Json(properties))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserializes_wire_name() {
        let query: ListQuery = serde_json::from_str(r#"{"userId":"auth0|user-42"}"#).unwrap();
        assert_eq!(query.user_id.as_deref(), Some("auth0|user-42"));
    }

    #[test]
    fn test_query_filter_is_optional() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.user_id.is_none());
    }
}
