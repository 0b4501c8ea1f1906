//! Public hotel endpoints: search and detail

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use uuid::Uuid;

use crate::{
    db::search::SearchCriteria,
    models::{Hotel, HotelSearchResponse},
    state::AppState,
    Error, Result,
};

/// GET /api/hotels/search
///
/// Unauthenticated. Repeatable parameters (`facilities`, `types`, `stars`)
/// are taken from the raw query string so every occurrence is seen.
pub async fn search_hotels(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<HotelSearchResponse>> {
    let items: Vec<(String, String)> = raw_query
        .as_deref()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let criteria = SearchCriteria::from_items(&items);
    let response = state.search.search(&criteria).await?;
    Ok(Json(response))
}

/// GET /api/hotels/:id
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>> {
    state
        .hotels
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(Error::HotelNotFound(id))
}
