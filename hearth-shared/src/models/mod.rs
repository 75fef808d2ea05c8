/// Database models for Hearth
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `property`: Property listings with image paths and owner identifier
///
/// # Example
///
/// ```no_run
/// use hearth_shared::models::property::{CreateProperty, Property};
/// use hearth_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let listing = Property::create(&pool, CreateProperty {
///     title: "Sunny loft".to_string(),
///     description: "Top floor, lots of light".to_string(),
///     price: 1450.0,
///     property_type: "apartment".to_string(),
///     location: "Riverside".to_string(),
///     bedrooms: 2,
///     bathrooms: 1,
///     area: 72.0,
///     images: vec!["/uploads/1718200000000-0.jpg".to_string()],
///     user_id: "auth0|user-42".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod property;
