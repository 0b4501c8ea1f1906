//! Hotel entity and write payloads
//!
//! The wire shape is camelCase with the category string serialized as
//! `type`, matching what the single-page frontend consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    /// Owner reference; immutable after creation.
    pub user_id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub facilities: Vec<String>,
    pub price_per_night: f64,
    pub star_rating: i16,
    pub image_urls: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Validated hotel payload assembled from the multipart create/update form.
#[derive(Debug, Clone, Validate)]
pub struct HotelForm {
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub hotel_type: String,
    pub adult_count: i32,
    pub child_count: i32,
    #[validate(length(min = 1, message = "Facilities are required"))]
    pub facilities: Vec<String>,
    #[validate(range(min = 0.0, message = "Price per night must not be negative"))]
    pub price_per_night: f64,
    #[validate(range(min = 1, max = 5, message = "Star rating must be between 1 and 5"))]
    pub star_rating: i16,
    /// Image URLs retained from the request body (update only; uploads are
    /// handled separately and prepended).
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchResponse {
    pub data: Vec<Hotel>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation_messages;

    fn valid_form() -> HotelForm {
        HotelForm {
            name: "Verandah Retreat".to_string(),
            city: "Matheran".to_string(),
            country: "India".to_string(),
            description: "A quiet hillside stay".to_string(),
            hotel_type: "Boutique".to_string(),
            adult_count: 2,
            child_count: 1,
            facilities: vec!["Spa".to_string(), "Free Wifi".to_string()],
            price_per_night: 120.0,
            star_rating: 4,
            image_urls: vec!["https://cdn.example/1.jpg".to_string()],
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn star_rating_outside_range_is_rejected() {
        let mut form = valid_form();
        form.star_rating = 6;
        let errors = form.validate().unwrap_err();
        assert!(validation_messages(&errors)
            .contains(&"Star rating must be between 1 and 5".to_string()));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = valid_form();
        form.price_per_night = -1.0;
        assert!(form.validate().is_err());
    }

    #[test]
    fn empty_facilities_are_rejected() {
        let mut form = valid_form();
        form.facilities.clear();
        let errors = form.validate().unwrap_err();
        assert!(validation_messages(&errors).contains(&"Facilities are required".to_string()));
    }

    #[test]
    fn hotel_serializes_with_camel_case_and_type() {
        let hotel = Hotel {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            name: "H".to_string(),
            city: "C".to_string(),
            country: "X".to_string(),
            description: "D".to_string(),
            hotel_type: "Resort".to_string(),
            adult_count: 2,
            child_count: 0,
            facilities: vec![],
            price_per_night: 10.0,
            star_rating: 3,
            image_urls: vec![],
            last_updated: Utc::now(),
        };
        let value = serde_json::to_value(&hotel).unwrap();
        assert_eq!(value["type"], "Resort");
        assert!(value.get("pricePerNight").is_some());
        assert!(value.get("adultCount").is_some());
        assert!(value.get("hotel_type").is_none());
    }
}
