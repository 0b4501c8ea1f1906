//! Sort option resolution
//!
//! Maps the fixed `sortOption` vocabulary onto a field + direction pair.
//! Unrecognized or absent options impose no ordering of their own; a stable
//! `id` tiebreak is always appended so repeated searches page identically.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    StarRating,
    PricePerNight,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            Self::StarRating => "star_rating",
            Self::PricePerNight => "price_per_night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

/// Resolve a raw sort option to a sort spec.
pub fn resolve_sort(option: Option<&str>) -> Option<SortSpec> {
    let spec = match option? {
        "starRatingAsc" => SortSpec {
            field: SortField::StarRating,
            ascending: true,
        },
        "starRatingDesc" => SortSpec {
            field: SortField::StarRating,
            ascending: false,
        },
        "pricePerNightAsc" => SortSpec {
            field: SortField::PricePerNight,
            ascending: true,
        },
        "pricePerNightDesc" => SortSpec {
            field: SortField::PricePerNight,
            ascending: false,
        },
        _ => return None,
    };
    Some(spec)
}

/// Render the ORDER BY fragment for a resolved sort.
pub fn order_by_sql(sort: Option<SortSpec>) -> String {
    match sort {
        Some(spec) => {
            let direction = if spec.ascending { "ASC" } else { "DESC" };
            format!(" ORDER BY {} {}, id ASC", spec.field.column(), direction)
        }
        None => " ORDER BY id ASC".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_mapping_resolves() {
        assert_eq!(
            resolve_sort(Some("starRatingAsc")),
            Some(SortSpec {
                field: SortField::StarRating,
                ascending: true
            })
        );
        assert_eq!(
            resolve_sort(Some("starRatingDesc")),
            Some(SortSpec {
                field: SortField::StarRating,
                ascending: false
            })
        );
        assert_eq!(
            resolve_sort(Some("pricePerNightAsc")),
            Some(SortSpec {
                field: SortField::PricePerNight,
                ascending: true
            })
        );
        assert_eq!(
            resolve_sort(Some("pricePerNightDesc")),
            Some(SortSpec {
                field: SortField::PricePerNight,
                ascending: false
            })
        );
    }

    #[test]
    fn absent_or_unrecognized_options_resolve_to_none() {
        assert_eq!(resolve_sort(None), None);
        assert_eq!(resolve_sort(Some("cheapestFirst")), None);
        assert_eq!(resolve_sort(Some("")), None);
    }

    #[test]
    fn order_by_appends_stable_tiebreak() {
        let sql = order_by_sql(resolve_sort(Some("pricePerNightAsc")));
        assert_eq!(sql, " ORDER BY price_per_night ASC, id ASC");
    }

    #[test]
    fn no_sort_still_orders_deterministically() {
        assert_eq!(order_by_sql(None), " ORDER BY id ASC");
    }
}
