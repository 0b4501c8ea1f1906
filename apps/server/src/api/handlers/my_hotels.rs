//! Owner-scoped hotel CRUD
//!
//! Create and update arrive as multipart forms: text fields plus up to six
//! in-memory `imageFiles` parts. Field names follow the frontend's FormData
//! conventions, so list fields may arrive as `facilities` or `facilities[0]`.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    config::ImagesConfig,
    models::{validation_messages, Hotel, HotelForm},
    services::images::{upload_all, UploadImage},
    state::AppState,
    Error, Result,
};

/// POST /api/my-hotels
pub async fn create_hotel(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Response> {
    let (form, images) = parse_hotel_form(multipart, &state.config.images).await?;

    if images.is_empty() {
        return Err(Error::validation("At least one image is required"));
    }

    let image_urls = upload_all(state.images.as_ref(), &images).await?;
    let hotel = state.hotels.insert(user.0, &form, &image_urls).await?;

    Ok((StatusCode::CREATED, Json(hotel)).into_response())
}

/// GET /api/my-hotels
pub async fn list_my_hotels(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Hotel>>> {
    Ok(Json(state.hotels.list_by_owner(user.0).await?))
}

/// GET /api/my-hotels/:id
pub async fn get_my_hotel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>> {
    state
        .hotels
        .find_by_owner(id, user.0)
        .await?
        .map(Json)
        .ok_or(Error::HotelNotFound(id))
}

/// PUT /api/my-hotels/:id
///
/// Freshly uploaded images are prepended to the URLs the client chose to
/// retain in the form body.
pub async fn update_hotel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Hotel>> {
    let (form, images) = parse_hotel_form(multipart, &state.config.images).await?;

    // Ownership must be established before anything reaches the CDN.
    state
        .hotels
        .find_by_owner(id, user.0)
        .await?
        .ok_or(Error::HotelNotFound(id))?;

    let mut image_urls = upload_all(state.images.as_ref(), &images).await?;
    image_urls.extend(form.image_urls.iter().cloned());

    if image_urls.is_empty() {
        return Err(Error::validation("At least one image is required"));
    }

    let hotel = state.hotels.update(id, user.0, &form, &image_urls).await?;
    Ok(Json(hotel))
}

/// Text fields collected from the multipart body before validation.
#[derive(Debug, Default)]
struct RawHotelFields {
    name: String,
    city: String,
    country: String,
    description: String,
    hotel_type: String,
    adult_count: Option<i32>,
    child_count: Option<i32>,
    price_per_night: Option<f64>,
    star_rating: Option<i16>,
    facilities: Vec<String>,
    image_urls: Vec<String>,
}

async fn parse_hotel_form(
    mut multipart: Multipart,
    images_config: &ImagesConfig,
) -> Result<(HotelForm, Vec<UploadImage>)> {
    let mut raw = RawHotelFields::default();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if base_name(&field_name) == "imageFiles" {
            if images.len() >= images_config.max_files {
                return Err(Error::validation(format!(
                    "At most {} images are allowed",
                    images_config.max_files
                )));
            }
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(format!("Failed to read image upload: {e}")))?;
            if data.len() > images_config.max_file_size {
                return Err(Error::validation(format!(
                    "Each image must be at most {} bytes",
                    images_config.max_file_size
                )));
            }
            images.push(UploadImage {
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| Error::BadRequest(format!("Failed to read form field: {e}")))?;
        collect_field(&mut raw, base_name(&field_name), text);
    }

    let form = build_form(raw)?;
    Ok((form, images))
}

/// FormData list fields arrive with an index suffix (`facilities[0]`);
/// strip it so both spellings are accepted.
fn base_name(field_name: &str) -> &str {
    field_name.split('[').next().unwrap_or(field_name)
}

fn collect_field(raw: &mut RawHotelFields, name: &str, value: String) {
    match name {
        "name" => raw.name = value,
        "city" => raw.city = value,
        "country" => raw.country = value,
        "description" => raw.description = value,
        "type" => raw.hotel_type = value,
        "adultCount" => raw.adult_count = value.trim().parse().ok(),
        "childCount" => raw.child_count = value.trim().parse().ok(),
        "pricePerNight" => raw.price_per_night = value.trim().parse().ok(),
        "starRating" => raw.star_rating = value.trim().parse().ok(),
        "facilities" => {
            if !value.is_empty() {
                raw.facilities.push(value);
            }
        }
        "imageUrls" => {
            if !value.is_empty() {
                raw.image_urls.push(value);
            }
        }
        _ => {}
    }
}

/// Turn collected fields into a validated form, reporting every missing or
/// malformed field at once.
fn build_form(raw: RawHotelFields) -> Result<HotelForm> {
    let mut messages = Vec::new();

    if raw.name.trim().is_empty() {
        messages.push("Name is required".to_string());
    }
    if raw.city.trim().is_empty() {
        messages.push("City is required".to_string());
    }
    if raw.country.trim().is_empty() {
        messages.push("Country is required".to_string());
    }
    if raw.description.trim().is_empty() {
        messages.push("Description is required".to_string());
    }
    if raw.hotel_type.trim().is_empty() {
        messages.push("Hotel type is required".to_string());
    }
    if raw.price_per_night.is_none() {
        messages.push("Price per night is required and must be a number".to_string());
    }
    if raw.adult_count.is_none() {
        messages.push("Adult count is required and must be a number".to_string());
    }
    if raw.child_count.is_none() {
        messages.push("Child count is required and must be a number".to_string());
    }
    if raw.star_rating.is_none() {
        messages.push("Star rating is required and must be a number".to_string());
    }

    if !messages.is_empty() {
        return Err(Error::Validation(messages));
    }

    let form = HotelForm {
        name: raw.name,
        city: raw.city,
        country: raw.country,
        description: raw.description,
        hotel_type: raw.hotel_type,
        adult_count: raw.adult_count.unwrap_or_default(),
        child_count: raw.child_count.unwrap_or_default(),
        facilities: raw.facilities,
        price_per_night: raw.price_per_night.unwrap_or_default(),
        star_rating: raw.star_rating.unwrap_or_default(),
        image_urls: raw.image_urls,
    };

    form.validate()
        .map_err(|e| Error::Validation(validation_messages(&e)))?;

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_raw() -> RawHotelFields {
        RawHotelFields {
            name: "Verandah Retreat".to_string(),
            city: "Matheran".to_string(),
            country: "India".to_string(),
            description: "A quiet hillside stay".to_string(),
            hotel_type: "Boutique".to_string(),
            adult_count: Some(2),
            child_count: Some(1),
            price_per_night: Some(120.0),
            star_rating: Some(4),
            facilities: vec!["Spa".to_string()],
            image_urls: vec![],
        }
    }

    #[test]
    fn base_name_strips_index_suffix() {
        assert_eq!(base_name("facilities[0]"), "facilities");
        assert_eq!(base_name("imageUrls[12]"), "imageUrls");
        assert_eq!(base_name("name"), "name");
    }

    #[test]
    fn complete_fields_build_a_form() {
        let form = build_form(filled_raw()).unwrap();
        assert_eq!(form.name, "Verandah Retreat");
        assert_eq!(form.star_rating, 4);
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let raw = RawHotelFields {
            name: String::new(),
            price_per_night: None,
            ..filled_raw()
        };
        let err = build_form(raw).unwrap_err();
        match err {
            Error::Validation(messages) => {
                assert!(messages.contains(&"Name is required".to_string()));
                assert!(messages
                    .contains(&"Price per night is required and must be a number".to_string()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn invariant_violations_surface_as_validation_errors() {
        let raw = RawHotelFields {
            star_rating: Some(9),
            ..filled_raw()
        };
        assert!(matches!(build_form(raw), Err(Error::Validation(_))));
    }

    #[test]
    fn facility_fields_accumulate() {
        let mut raw = RawHotelFields::default();
        collect_field(&mut raw, "facilities", "Spa".to_string());
        collect_field(&mut raw, "facilities", "Parking".to_string());
        collect_field(&mut raw, "imageUrls", "https://cdn/1.jpg".to_string());
        assert_eq!(raw.facilities, vec!["Spa", "Parking"]);
        assert_eq!(raw.image_urls, vec!["https://cdn/1.jpg"]);
    }

    #[test]
    fn malformed_numeric_fields_read_as_missing() {
        let mut raw = RawHotelFields::default();
        collect_field(&mut raw, "adultCount", "two".to_string());
        collect_field(&mut raw, "pricePerNight", "".to_string());
        assert_eq!(raw.adult_count, None);
        assert_eq!(raw.price_per_night, None);
    }
}
