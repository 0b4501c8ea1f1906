//! Filter clause construction and SQL rendering
//!
//! `build_filter` is a pure function from criteria to an immutable list of
//! typed clauses combined with AND; an empty list matches every hotel.
//! Rendering to SQL (with `$n` bind placeholders) is kept separate so each
//! clause stays independently testable.

use super::criteria::SearchCriteria;

/// One AND-ed predicate clause over the hotels collection.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Case-insensitive substring match against city OR country.
    Destination(String),
    /// Minimum adult capacity (inclusive).
    MinAdults(i32),
    /// Minimum child capacity (inclusive).
    MinChildren(i32),
    /// Facility superset match: every listed facility must be present.
    FacilitiesAll(Vec<String>),
    /// Hotel type must be one of the given values.
    TypeAny(Vec<String>),
    /// Star rating must be one of the given values.
    StarsAny(Vec<i16>),
    /// Inclusive upper bound on price per night.
    MaxPrice(f64),
}

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Int(i64),
    SmallIntArray(Vec<i16>),
    Float(f64),
}

/// Translate search criteria into filter clauses.
///
/// Absent fields contribute no clause (open-world default).
pub fn build_filter(criteria: &SearchCriteria) -> Vec<FilterClause> {
    let mut clauses = Vec::new();

    if let Some(destination) = &criteria.destination {
        clauses.push(FilterClause::Destination(destination.clone()));
    }
    if let Some(adults) = criteria.adult_count {
        clauses.push(FilterClause::MinAdults(adults));
    }
    if let Some(children) = criteria.child_count {
        clauses.push(FilterClause::MinChildren(children));
    }
    if !criteria.facilities.is_empty() {
        clauses.push(FilterClause::FacilitiesAll(criteria.facilities.clone()));
    }
    if !criteria.types.is_empty() {
        clauses.push(FilterClause::TypeAny(criteria.types.clone()));
    }
    if !criteria.stars.is_empty() {
        clauses.push(FilterClause::StarsAny(criteria.stars.clone()));
    }
    if let Some(max_price) = criteria.max_price {
        clauses.push(FilterClause::MaxPrice(max_price));
    }

    clauses
}

/// Render clauses into a ` WHERE ...` fragment, pushing bind values.
///
/// Returns an empty string for an empty clause list. Placeholder numbering
/// continues from whatever is already in `binds`.
pub fn render_where(clauses: &[FilterClause], binds: &mut Vec<BindValue>) -> String {
    if clauses.is_empty() {
        return String::new();
    }

    let mut conditions = Vec::with_capacity(clauses.len());
    for clause in clauses {
        conditions.push(render_clause(clause, binds));
    }

    format!(" WHERE {}", conditions.join(" AND "))
}

fn render_clause(clause: &FilterClause, binds: &mut Vec<BindValue>) -> String {
    match clause {
        FilterClause::Destination(text) => {
            let pattern = format!("%{}%", escape_like(text));
            let city = push_bind(binds, BindValue::Text(pattern.clone()));
            let country = push_bind(binds, BindValue::Text(pattern));
            format!("(city ILIKE ${city} OR country ILIKE ${country})")
        }
        FilterClause::MinAdults(min) => {
            let n = push_bind(binds, BindValue::Int(i64::from(*min)));
            format!("adult_count >= ${n}")
        }
        FilterClause::MinChildren(min) => {
            let n = push_bind(binds, BindValue::Int(i64::from(*min)));
            format!("child_count >= ${n}")
        }
        FilterClause::FacilitiesAll(facilities) => {
            let n = push_bind(binds, BindValue::TextArray(facilities.clone()));
            format!("facilities @> ${n}")
        }
        FilterClause::TypeAny(types) => {
            let n = push_bind(binds, BindValue::TextArray(types.clone()));
            format!("hotel_type = ANY(${n})")
        }
        FilterClause::StarsAny(stars) => {
            let n = push_bind(binds, BindValue::SmallIntArray(stars.clone()));
            format!("star_rating = ANY(${n})")
        }
        FilterClause::MaxPrice(max) => {
            let n = push_bind(binds, BindValue::Float(*max));
            format!("price_per_night <= ${n}")
        }
    }
}

fn push_bind(binds: &mut Vec<BindValue>, value: BindValue) -> usize {
    binds.push(value);
    binds.len()
}

/// Escape LIKE metacharacters in user input; Postgres uses `\` as the
/// default escape character.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
