/// Property model and database operations
///
/// A property is a rentable/sellable unit listed on the marketplace. It is
/// the sole entity of the system: created once, partially updated in place,
/// and removed by explicit delete. There is no soft-delete and no versioning.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE properties (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     price DOUBLE PRECISION NOT NULL,
///     property_type TEXT NOT NULL,
///     location TEXT NOT NULL,
///     bedrooms INTEGER NOT NULL,
///     bathrooms INTEGER NOT NULL,
///     area DOUBLE PRECISION NOT NULL,
///     images TEXT[] NOT NULL DEFAULT '{}',
///     user_id TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Invariants
///
/// - `images` holds at most [`MAX_IMAGES`] relative paths; the first entry is
///   the listing's primary image. The cap is enforced where image lists are
///   assembled, before they reach this layer.
/// - `user_id` is set at creation and is not updatable: [`UpdateProperty`]
///   has no owner field, so the UPDATE statement cannot touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum number of images a listing may carry
pub const MAX_IMAGES: usize = 5;

/// A property listing
///
/// Serializes with the wire names the public API uses (`type`, `userId`,
/// `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique listing ID, assigned by the store at creation
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Asking price
    pub price: f64,

    /// Kind of unit (e.g., "apartment", "house", "studio")
    #[serde(rename = "type")]
    pub property_type: String,

    /// Human-readable location
    pub location: String,

    /// Number of bedrooms
    pub bedrooms: i32,

    /// Number of bathrooms
    pub bathrooms: i32,

    /// Floor area in square meters
    pub area: f64,

    /// Relative image paths in display order; first entry is the primary image
    pub images: Vec<String>,

    /// Owner identifier, issued by the external auth system
    pub user_id: String,

    /// When the listing was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub property_type: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    /// Relative paths of already-stored uploads, in upload order
    pub images: Vec<String>,
    pub user_id: String,
}

/// Input for a partial property update
///
/// `None` means "leave unchanged". There is deliberately no `user_id` field:
/// ownership never changes after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    /// Replacement image list; `None` leaves the stored list untouched
    pub images: Option<Vec<String>>,
}

impl UpdateProperty {
    /// True when the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.property_type.is_none()
            && self.location.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.area.is_none()
            && self.images.is_none()
    }
}

impl Property {
    /// Creates a new listing
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateProperty) -> Result<Self, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (title, description, price, property_type,
                                    location, bedrooms, bathrooms, area, images, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, title, description, price, property_type, location,
                      bedrooms, bathrooms, area, images, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.price)
        .bind(data.property_type)
        .bind(data.location)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.area)
        .bind(data.images)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(property)
    }

    /// Finds a listing by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, title, description, price, property_type, location,
                   bedrooms, bathrooms, area, images, user_id, created_at
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(property)
    }

    /// Lists listings, optionally filtered by owner
    ///
    /// Without a filter, rows come back in store-native (insertion) order.
    pub async fn list(pool: &PgPool, user_id: Option<&str>) -> Result<Vec<Self>, sqlx::Error> {
        let properties = match user_id {
            Some(owner) => {
                sqlx::query_as::<_, Property>(
                    r#"
                    SELECT id, title, description, price, property_type, location,
                           bedrooms, bathrooms, area, images, user_id, created_at
                    FROM properties
                    WHERE user_id = $1
                    "#,
                )
                .bind(owner)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Property>(
                    r#"
                    SELECT id, title, description, price, property_type, location,
                           bedrooms, bathrooms, area, images, user_id, created_at
                    FROM properties
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(properties)
    }

    /// Applies a partial update and returns the new row
    ///
    /// Absent fields keep their stored values via COALESCE. Returns `None`
    /// when the id does not resolve.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProperty,
    ) -> Result<Option<Self>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                property_type = COALESCE($5, property_type),
                location = COALESCE($6, location),
                bedrooms = COALESCE($7, bedrooms),
                bathrooms = COALESCE($8, bathrooms),
                area = COALESCE($9, area),
                images = COALESCE($10, images)
            WHERE id = $1
            RETURNING id, title, description, price, property_type, location,
                      bedrooms, bathrooms, area, images, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.price)
        .bind(data.property_type)
        .bind(data.location)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.area)
        .bind(data.images)
        .fetch_optional(pool)
        .await?;

        Ok(property)
    }

    /// Deletes a listing by ID
    ///
    /// Returns the deleted row so the caller can release its resources
    /// (image files), or `None` when the id does not resolve.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            DELETE FROM properties
            WHERE id = $1
            RETURNING id, title, description, price, property_type, location,
                      bedrooms, bathrooms, area, images, user_id, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Property {
        Property {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            title: "Sunny loft".to_string(),
            description: "Top floor, lots of light".to_string(),
            price: 1450.0,
            property_type: "apartment".to_string(),
            location: "Riverside".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            area: 72.0,
            images: vec![
                "/uploads/1718200000000-0.jpg".to_string(),
                "/uploads/1718200000000-1.jpg".to_string(),
            ],
            user_id: "auth0|user-42".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert!(json.get("type").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("property_type").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_image_order_survives_round_trip() {
        let listing = sample();
        let json = serde_json::to_string(&listing).unwrap();
        let back: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(back.images, listing.images);
        assert_eq!(back.images[0], "/uploads/1718200000000-0.jpg");
    }

    #[test]
    fn test_update_default_is_empty() {
        let update = UpdateProperty::default();
        assert!(update.is_empty());

        let update = UpdateProperty {
            price: Some(1500.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_max_images_cap() {
        assert_eq!(MAX_IMAGES, 5);
    }
}
