/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `properties`: Property listing CRUD with image upload

pub mod health;
pub mod properties;
