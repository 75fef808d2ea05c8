/// Create listing endpoint
///
/// # Endpoint
///
/// `POST /api/properties` (multipart/form-data)
///
/// Text parts: `title`, `description`, `price`, `type`, `location`,
/// `bedrooms`, `bathrooms`, `area`, `userId`. Binary parts: up to 5 files
/// named `images`.
///
/// # Owner identifier
///
/// A verified [`Identity`] injected by the auth layer takes precedence over
/// the `userId` part; without one the part itself is required. A request
/// with neither fails validation and persists nothing.
///
/// # Example Response
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Sunny loft",
///   "type": "apartment",
///   "images": ["/uploads/1718200000000-0.jpg"],
///   "userId": "auth0|user-42",
///   "createdAt": "2025-06-12T12:00:00Z"
/// }
/// ```

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::routes::properties::{read_listing_form, require_number, require_text, ListingForm};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use hearth_shared::auth::middleware::Identity;
use hearth_shared::models::property::{CreateProperty, Property};
use validator::Validate;

/// Field values of a new listing, before validation
#[derive(Debug, Validate)]
pub struct CreateListingRequest {
    /// Listing title
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: String,

    /// Free-form description
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    /// Asking price
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    /// Kind of unit
    #[validate(length(min = 1, max = 50, message = "type must not be empty"))]
    pub property_type: String,

    /// Human-readable location
    #[validate(length(min = 1, max = 200, message = "location must not be empty"))]
    pub location: String,

    /// Number of bedrooms
    #[validate(range(min = 0, message = "bedrooms must not be negative"))]
    pub bedrooms: i32,

    /// Number of bathrooms
    #[validate(range(min = 0, message = "bathrooms must not be negative"))]
    pub bathrooms: i32,

    /// Floor area in square meters
    #[validate(range(min = 0.0, message = "area must not be negative"))]
    pub area: f64,
}

impl CreateListingRequest {
    /// Pulls the listing fields out of a decoded form
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing, blank, or unparseable field.
    fn from_form(form: &mut ListingForm) -> ApiResult<Self> {
        Ok(Self {
            title: require_text(form, "title")?,
            description: require_text(form, "description")?,
            price: require_number(form, "price")?,
            property_type: require_text(form, "type")?,
            location: require_text(form, "location")?,
            bedrooms: require_number(form, "bedrooms")?,
            bathrooms: require_number(form, "bathrooms")?,
            area: require_number(form, "area")?,
        })
    }
}

/// Create endpoint handler
///
/// Image files are written as the multipart stream is read; if the request
/// then fails validation the stored files are removed again. A store failure
/// after the writes leaves the files orphaned (no rollback across the two
/// side effects).
///
/// # Errors
///
/// - 400 Bad Request: missing owner identifier, invalid field values, more
///   than 5 images, malformed multipart data
/// - 500 Internal Server Error: store or filesystem failure
pub async fn create_property(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let mut form = read_listing_form(multipart, &state.intake).await?;
    let images = std::mem::take(&mut form.images);

    match build_and_insert(&state, identity, form, images.clone()).await {
        Ok(property) => {
            tracing::info!(property_id = %property.id, owner = %property.user_id, "Created property");
            Ok((StatusCode::CREATED, Json(property)))
        }
        Err(e) => {
            // Rejected requests must not leave uploads behind; store failures
            // keep them (the documented orphan gap).
            if !matches!(e, ApiError::Internal(_)) {
                state.intake.remove(&images).await;
            }
            Err(e)
        }
    }
}

async fn build_and_insert(
    state: &AppState,
    identity: Option<Extension<Identity>>,
    mut form: ListingForm,
    images: Vec<String>,
) -> ApiResult<Property> {
    // A verified identity wins over whatever the client put in the form.
    let user_id = match identity {
        Some(Extension(identity)) => identity.user_id,
        None => form
            .take("userId")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::validation("userId", "userId is required"))?,
    };

    let request = CreateListingRequest::from_form(&mut form)?;
    request.validate()?;

    let property = Property::create(
        &state.db,
        CreateProperty {
            title: request.title,
            description: request.description,
            price: request.price,
            property_type: request.property_type,
            location: request.location,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            area: request.area,
            images,
            user_id,
        },
    )
    .await?;

    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CreateListingRequest {
        CreateListingRequest {
            title: "Sunny loft".to_string(),
            description: "Top floor, lots of light".to_string(),
            price: 1450.0,
            property_type: "apartment".to_string(),
            location: "Riverside".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            area: 72.0,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let request = CreateListingRequest {
            price: -1.0,
            ..filled()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        let request = CreateListingRequest {
            title: String::new(),
            ..filled()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let mut form = ListingForm::default();
        form.fields.insert("title".to_string(), "Loft".to_string());

        match CreateListingRequest::from_form(&mut form) {
            Err(ApiError::Validation(details)) => {
                assert_eq!(details[0].field, "description");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
