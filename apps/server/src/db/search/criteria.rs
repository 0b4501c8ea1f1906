//! Search criteria parsing
//!
//! Turns the raw, possibly repeated query items of `GET /api/hotels/search`
//! into a typed, request-scoped criteria struct.
//!
//! Malformed numeric inputs are treated as absent rather than propagated:
//! a non-numeric `adultCount`, `childCount`, `maxPrice` or `page` imposes no
//! constraint, and non-numeric entries inside `stars` are dropped
//! individually while numeric siblings still apply.

/// Ephemeral search criteria; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Free text matched case-insensitively as a substring of city or country.
    pub destination: Option<String>,
    /// Inclusive lower bound on adult capacity.
    pub adult_count: Option<i32>,
    /// Inclusive lower bound on child capacity.
    pub child_count: Option<i32>,
    /// Facilities the hotel must ALL provide.
    pub facilities: Vec<String>,
    /// Acceptable hotel types (ANY).
    pub types: Vec<String>,
    /// Acceptable star ratings (ANY).
    pub stars: Vec<i16>,
    /// Inclusive upper bound on price per night.
    pub max_price: Option<f64>,
    /// Raw sort option; resolved by the sort selector.
    pub sort_option: Option<String>,
    /// 1-based page number, already defaulted and clamped.
    pub page: i64,
}

impl SearchCriteria {
    /// Parse criteria from decoded (key, value) query items.
    ///
    /// Repeatable parameters (`facilities`, `types`, `stars`) accumulate;
    /// for scalar parameters the last occurrence wins.
    pub fn from_items(items: &[(String, String)]) -> Self {
        let mut criteria = Self {
            page: 1,
            ..Self::default()
        };

        for (key, value) in items {
            match key.as_str() {
                "destination" => {
                    if !value.trim().is_empty() {
                        criteria.destination = Some(value.trim().to_string());
                    }
                }
                "adultCount" => criteria.adult_count = parse_positive_int(value),
                "childCount" => criteria.child_count = parse_positive_int(value),
                "facilities" => {
                    if !value.is_empty() {
                        criteria.facilities.push(value.clone());
                    }
                }
                "types" => {
                    if !value.is_empty() {
                        criteria.types.push(value.clone());
                    }
                }
                "stars" => {
                    // Invalid entries are dropped individually, as are values
                    // that can never match the 1..=5 data invariant.
                    if let Ok(star) = value.trim().parse::<i16>() {
                        if (1..=5).contains(&star) {
                            criteria.stars.push(star);
                        }
                    }
                }
                "maxPrice" => {
                    // Only finite, non-negative bounds are meaningful.
                    criteria.max_price = value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|p| p.is_finite() && *p >= 0.0);
                }
                "sortOption" => {
                    if !value.is_empty() {
                        criteria.sort_option = Some(value.clone());
                    }
                }
                "page" => {
                    // Missing or unparseable page falls back to 1; values
                    // below 1 are clamped up.
                    criteria.page = value.trim().parse::<i64>().unwrap_or(1).max(1);
                }
                _ => {}
            }
        }

        criteria
    }
}

fn parse_positive_int(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|n| *n > 0)
}
