//! Wire types for the listing API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property listing as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Listing identifier, opaque to the client
    pub id: String,

    pub title: String,
    pub description: String,
    pub price: f64,

    /// Kind of unit
    #[serde(rename = "type")]
    pub property_type: String,

    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,

    /// Relative image paths; prefix with the service base address to render
    #[serde(default)]
    pub images: Vec<String>,

    /// Owner identifier
    pub user_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Field values for creating a listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub property_type: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    /// Owner identifier; ignored by the service when it verifies a bearer
    /// token instead
    pub user_id: String,
}

/// Partial field values for updating a listing.
///
/// `None` fields are left out of the request entirely.
#[derive(Debug, Clone, Default)]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
}

/// An image file to upload alongside a create or update.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename; its extension is carried into the stored name
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Confirmation body returned by delete.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_decodes_wire_names() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Sunny loft",
            "description": "Top floor",
            "price": 1450.0,
            "type": "apartment",
            "location": "Riverside",
            "bedrooms": 2,
            "bathrooms": 1,
            "area": 72.0,
            "images": ["/uploads/1718200000000-0.jpg"],
            "userId": "auth0|user-42",
            "createdAt": "2025-06-12T12:00:00Z"
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.property_type, "apartment");
        assert_eq!(property.user_id, "auth0|user-42");
        assert_eq!(property.images.len(), 1);
    }

    #[test]
    fn test_property_tolerates_missing_images() {
        let json = r#"{
            "id": "x",
            "title": "t",
            "description": "d",
            "price": 1.0,
            "type": "house",
            "location": "l",
            "bedrooms": 0,
            "bathrooms": 0,
            "area": 1.0,
            "userId": "u",
            "createdAt": "2025-06-12T12:00:00Z"
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert!(property.images.is_empty());
    }
}
