//! Listing API client.
//!
//! A typed client for the Hearth property service. Field data travels as
//! JSON-compatible form values, image-bearing requests as multipart, and
//! every response is checked for the body's `error` marker in addition to
//! the transport status — a 2xx with an error body is still a failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use hearth_client::HearthClient;
//!
//! let client = HearthClient::new("http://localhost:5000");
//!
//! let listings = client.list_properties().await?;
//! for listing in &listings {
//!     println!("{} — {}", listing.title, client.image_url(&listing.images[0]));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{DeleteConfirmation, ImageUpload, ListingUpdate, NewListing, Property};

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

/// Client for the Hearth listing API.
pub struct HearthClient {
    client: reqwest::Client,
    base_url: String,
}

impl HearthClient {
    /// Creates a client for the service at `base_url` (no trailing slash
    /// needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Absolute URL for a stored relative image path.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches all listings.
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        let url = format!("{}/api/properties", self.base_url);
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }

    /// Fetches one owner's listings.
    pub async fn list_properties_for(&self, user_id: &str) -> Result<Vec<Property>> {
        let url = format!("{}/api/properties", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        read_json(resp).await
    }

    /// Fetches a single listing by id.
    pub async fn get_property(&self, id: &str) -> Result<Property> {
        let url = format!("{}/api/properties/{}", self.base_url, id);
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }

    /// Creates a listing with up to 5 images.
    pub async fn create_property(
        &self,
        listing: NewListing,
        images: Vec<ImageUpload>,
    ) -> Result<Property> {
        tracing::debug!(title = %listing.title, images = images.len(), "Creating property");

        let mut form = Form::new()
            .text("title", listing.title)
            .text("description", listing.description)
            .text("price", listing.price.to_string())
            .text("type", listing.property_type)
            .text("location", listing.location)
            .text("bedrooms", listing.bedrooms.to_string())
            .text("bathrooms", listing.bathrooms.to_string())
            .text("area", listing.area.to_string())
            .text("userId", listing.user_id);

        for image in images {
            form = form.part(
                "images",
                Part::bytes(image.bytes).file_name(image.file_name),
            );
        }

        let url = format!("{}/api/properties", self.base_url);
        let resp = self.client.post(&url).multipart(form).send().await?;
        read_json(resp).await
    }

    /// Applies a partial update, optionally replacing the image list.
    ///
    /// With new `images` and a `keep_images` list, the service keeps the
    /// listed paths and appends the uploads; with images alone it replaces
    /// the stored list; with neither, the stored images stay as they are.
    pub async fn update_property(
        &self,
        id: &str,
        update: ListingUpdate,
        images: Vec<ImageUpload>,
        keep_images: Option<Vec<String>>,
    ) -> Result<Property> {
        tracing::debug!(property_id = %id, images = images.len(), "Updating property");

        let mut form = Form::new();

        if let Some(title) = update.title {
            form = form.text("title", title);
        }
        if let Some(description) = update.description {
            form = form.text("description", description);
        }
        if let Some(price) = update.price {
            form = form.text("price", price.to_string());
        }
        if let Some(property_type) = update.property_type {
            form = form.text("type", property_type);
        }
        if let Some(location) = update.location {
            form = form.text("location", location);
        }
        if let Some(bedrooms) = update.bedrooms {
            form = form.text("bedrooms", bedrooms.to_string());
        }
        if let Some(bathrooms) = update.bathrooms {
            form = form.text("bathrooms", bathrooms.to_string());
        }
        if let Some(area) = update.area {
            form = form.text("area", area.to_string());
        }

        for image in images {
            form = form.part(
                "images",
                Part::bytes(image.bytes).file_name(image.file_name),
            );
        }

        if let Some(keep) = keep_images {
            form = form.text("keepImages", serde_json::to_string(&keep)?);
        }

        let url = format!("{}/api/properties/{}", self.base_url, id);
        let resp = self.client.put(&url).multipart(form).send().await?;
        read_json(resp).await
    }

    /// Deletes a listing.
    pub async fn delete_property(&self, id: &str) -> Result<DeleteConfirmation> {
        let url = format!("{}/api/properties/{}", self.base_url, id);
        let resp = self.client.delete(&url).send().await?;
        read_json(resp).await
    }
}

/// Reads a response body and applies the shared failure rules.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    parse_body(status, &body)
}

/// Decodes a response body, treating the `error` marker as authoritative.
///
/// Callers must check both the status and the body; this does. An `error`
/// field fails the call whatever the status, a non-2xx status fails it even
/// without one, and only then is the payload decoded.
fn parse_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let success = (200..300).contains(&status);

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if success => return Err(ClientError::Decode(e)),
        Err(_) => {
            return Err(ClientError::Api {
                status,
                message: if body.is_empty() {
                    "request failed".to_string()
                } else {
                    body.to_string()
                },
            })
        }
    };

    if let Some(message) = error_message(&value) {
        return Err(ClientError::Api { status, message });
    }

    if !success {
        return Err(ClientError::Api {
            status,
            message: "request failed".to_string(),
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Pulls the failure message out of an error body, if it is one.
fn error_message(value: &serde_json::Value) -> Option<String> {
    let error = value.get("error")?;

    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    Some(error.as_str().unwrap_or("request failed").to_string())
}
