/// Property listing endpoints
///
/// This module provides the listing CRUD surface of the marketplace.
///
/// # Endpoints
///
/// - `GET /api/properties` - List listings (optional `?userId=` filter)
/// - `GET /api/properties/:id` - Get one listing
/// - `POST /api/properties` - Create a listing (multipart, up to 5 images)
/// - `PUT /api/properties/:id` - Partial update (multipart, image merge)
/// - `DELETE /api/properties/:id` - Delete a listing and its image files
///
/// # Image-bearing requests
///
/// Create and update accept `multipart/form-data`: text parts carry the
/// field values, binary parts named `images` carry up to
/// [`MAX_IMAGES`](hearth_shared::models::property::MAX_IMAGES) files, and
/// update may include a `keepImages` part holding a JSON array of existing
/// paths to retain. Shared multipart plumbing and the image-merge rules live
/// here; each handler sits in its own file.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

// Re-export handlers for convenience
pub use create::create_property;
pub use delete::delete_property;
pub use get::get_property;
pub use list::list_properties;
pub use update::update_property;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{ApiError, ApiResult};
use crate::uploads::ImageIntake;
use hearth_shared::models::property::MAX_IMAGES;

/// Name of the multipart parts carrying image files
const IMAGES_FIELD: &str = "images";

/// Decoded multipart listing form
///
/// `images` holds the public paths of uploads already written to disk, in
/// upload order. If the handler bails out after this point it must hand the
/// paths back to the intake for cleanup.
#[derive(Debug, Default)]
pub(crate) struct ListingForm {
    /// Text parts by field name
    pub fields: HashMap<String, String>,

    /// Stored public paths of the uploaded images, in upload order
    pub images: Vec<String>,
}

impl ListingForm {
    /// Takes a text field out of the form
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

/// Reads a multipart listing form, storing image parts as they stream in
///
/// Enforces the image-count cap while reading: a sixth `images` part fails
/// the request. On any failure the files already written for this request
/// are removed before the error propagates, so a rejected request never
/// leaves uploads behind.
///
/// # Errors
///
/// - validation error when more than the allowed number of images arrive
/// - bad request on malformed multipart data
/// - internal error when a file write fails
pub(crate) async fn read_listing_form(
    mut multipart: Multipart,
    intake: &ImageIntake,
) -> ApiResult<ListingForm> {
    let mut form = ListingForm::default();

    let result: ApiResult<()> = async {
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == IMAGES_FIELD {
                if form.images.len() >= MAX_IMAGES {
                    return Err(ApiError::validation(
                        IMAGES_FIELD,
                        &format!("a listing can carry at most {} images", MAX_IMAGES),
                    ));
                }

                let original = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await?;
                let path = intake.save(original.as_deref(), &bytes).await?;
                form.images.push(path);
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(())
    }
    .await;

    if let Err(e) = result {
        // A failed request must not leave files behind.
        intake.remove(&form.images).await;
        return Err(e);
    }

    Ok(form)
}

/// Merges retained and newly uploaded image paths
///
/// Retained images come first, new uploads are appended in upload order.
/// Without a retained list the new uploads replace the stored images
/// entirely. The cap is enforced here, at the merge step: a combined list
/// longer than [`MAX_IMAGES`] is rejected rather than truncated, so the
/// caller keeps control over which images survive.
///
/// # Errors
///
/// Returns a validation error when the merged list exceeds the cap.
pub(crate) fn merge_images(
    keep: Option<Vec<String>>,
    new: Vec<String>,
) -> ApiResult<Vec<String>> {
    let merged = match keep {
        Some(mut retained) => {
            retained.extend(new);
            retained
        }
        None => new,
    };

    if merged.len() > MAX_IMAGES {
        return Err(ApiError::validation(
            IMAGES_FIELD,
            &format!(
                "merged image list has {} entries, the limit is {}",
                merged.len(),
                MAX_IMAGES
            ),
        ));
    }

    Ok(merged)
}

/// Parses an optional numeric text field
///
/// Absent fields stay absent; present fields must parse.
pub(crate) fn parse_optional<T: std::str::FromStr>(
    form: &mut ListingForm,
    name: &str,
) -> ApiResult<Option<T>> {
    match form.take(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            ApiError::validation(name, &format!("{} must be a valid number", name))
        }),
    }
}

/// Takes an optional text field, rejecting blank values
///
/// A partial update may omit a text field, but a present one must carry
/// content; the entity's text fields are never empty.
pub(crate) fn optional_text(form: &mut ListingForm, name: &str) -> ApiResult<Option<String>> {
    match form.take(name) {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(ApiError::validation(
            name,
            &format!("{} must not be empty", name),
        )),
        Some(v) => Ok(Some(v)),
    }
}

/// Takes a required text field
pub(crate) fn require_text(form: &mut ListingForm, name: &str) -> ApiResult<String> {
    form.take(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation(name, &format!("{} is required", name)))
}

/// Parses a required numeric text field
pub(crate) fn require_number<T: std::str::FromStr>(
    form: &mut ListingForm,
    name: &str,
) -> ApiResult<T> {
    let raw = require_text(form, name)?;
    raw.parse::<T>()
        .map_err(|_| ApiError::validation(name, &format!("{} must be a valid number", name)))
}
