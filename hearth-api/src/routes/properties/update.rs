/// Update listing endpoint
///
/// # Endpoint
///
/// `PUT /api/properties/:id` (multipart/form-data)
///
/// Any subset of the listing's text/number fields, plus 0–5 new `images`
/// parts and an optional `keepImages` part: a JSON-encoded array of existing
/// image paths the caller wants to retain.
///
/// # Image merge rules
///
/// 1. No new files uploaded: the stored `images` list is left untouched,
///    whatever else changes. Absence means "no change", not "clear".
/// 2. New files + `keepImages`: final list is the retained paths followed by
///    the new upload paths, in that order.
/// 3. New files without `keepImages`: the new uploads replace the stored
///    list entirely; the superseded files are deleted from disk.
/// 4. A merged list longer than 5 fails the request; nothing is written to
///    the record and the fresh uploads are removed again.
///
/// The client-supplied `userId`, if any, is dropped: ownership never changes
/// after creation.

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::routes::properties::{
    merge_images, optional_text, parse_optional, read_listing_form, ListingForm,
};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use hearth_shared::models::property::{Property, UpdateProperty};
use uuid::Uuid;
use validator::Validate;

/// Numeric fields of a partial update, validated when present
#[derive(Debug, Default, Validate)]
struct UpdateNumbers {
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    price: Option<f64>,

    #[validate(range(min = 0, message = "bedrooms must not be negative"))]
    bedrooms: Option<i32>,

    #[validate(range(min = 0, message = "bathrooms must not be negative"))]
    bathrooms: Option<i32>,

    #[validate(range(min = 0.0, message = "area must not be negative"))]
    area: Option<f64>,
}

/// Update endpoint handler
///
/// # Errors
///
/// - 400 Bad Request: invalid field values, malformed `keepImages`, merged
///   image list over the cap, malformed multipart data
/// - 404 Not Found: id does not resolve to a listing
/// - 500 Internal Server Error: store or filesystem failure
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<Json<Property>> {
    let mut form = read_listing_form(multipart, &state.intake).await?;
    let new_images = std::mem::take(&mut form.images);

    match apply_update(&state, id, form, new_images.clone()).await {
        Ok(property) => {
            tracing::info!(property_id = %property.id, "Updated property");
            Ok(Json(property))
        }
        Err(e) => {
            // The record was not changed, so the fresh uploads have no home.
            // Store failures keep them (the documented orphan gap).
            if !matches!(e, ApiError::Internal(_)) {
                state.intake.remove(&new_images).await;
            }
            Err(e)
        }
    }
}

async fn apply_update(
    state: &AppState,
    id: Uuid,
    mut form: ListingForm,
    new_images: Vec<String>,
) -> ApiResult<Property> {
    // Ownership never changes; a client-supplied owner field is dropped.
    form.take("userId");

    let keep_images = match form.take("keepImages") {
        None => None,
        Some(raw) => Some(serde_json::from_str::<Vec<String>>(&raw).map_err(|_| {
            ApiError::validation("keepImages", "keepImages must be a JSON array of image paths")
        })?),
    };

    let numbers = UpdateNumbers {
        price: parse_optional(&mut form, "price")?,
        bedrooms: parse_optional(&mut form, "bedrooms")?,
        bathrooms: parse_optional(&mut form, "bathrooms")?,
        area: parse_optional(&mut form, "area")?,
    };
    numbers.validate()?;

    let title = optional_text(&mut form, "title")?;
    let description = optional_text(&mut form, "description")?;
    let property_type = optional_text(&mut form, "type")?;
    let location = optional_text(&mut form, "location")?;

    // Images are only touched when this request uploaded files; the merge
    // decides the final list and which stored files fall out of the record.
    let (images, superseded) = if new_images.is_empty() {
        (None, Vec::new())
    } else {
        let existing = Property::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

        let merged = merge_images(keep_images, new_images)?;
        let superseded: Vec<String> = existing
            .images
            .iter()
            .filter(|stored| !merged.contains(stored))
            .cloned()
            .collect();

        (Some(merged), superseded)
    };

    let updated = Property::update(
        &state.db,
        id,
        UpdateProperty {
            title,
            description,
            price: numbers.price,
            property_type,
            location,
            bedrooms: numbers.bedrooms,
            bathrooms: numbers.bathrooms,
            area: numbers.area,
            images,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

    // The record now references the merged list; files it dropped are dead.
    state.intake.remove(&superseded).await;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_update_price_rejected() {
        let numbers = UpdateNumbers {
            price: Some(-10.0),
            ..Default::default()
        };
        assert!(numbers.validate().is_err());
    }

    #[test]
    fn test_absent_numbers_pass_validation() {
        assert!(UpdateNumbers::default().validate().is_ok());
    }

    #[test]
    fn test_keep_images_must_be_json_array() {
        let parsed = serde_json::from_str::<Vec<String>>("not json");
        assert!(parsed.is_err());

        let parsed = serde_json::from_str::<Vec<String>>(r#"["/uploads/a.png"]"#).unwrap();
        assert_eq!(parsed, vec!["/uploads/a.png".to_string()]);
    }
}
