//! Hotel repository
//!
//! All SQL touching the hotels table lives here. Search queries are built
//! dynamically from rendered filter clauses and executed with positional
//! bind values; everything else is a fixed statement.

use sqlx::PgPool;
use uuid::Uuid;

use super::search::{order_by_sql, render_where, BindValue, FilterClause, PageWindow, SortSpec};
use crate::{
    models::{Hotel, HotelForm},
    Result,
};

const HOTEL_COLUMNS: &str = "id, user_id, name, city, country, description, hotel_type, \
     adult_count, child_count, facilities, price_per_night, star_rating, image_urls, last_updated";

#[derive(Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new hotel owned by `owner`; `last_updated` is stamped by the
    /// database.
    pub async fn insert(
        &self,
        owner: Uuid,
        form: &HotelForm,
        image_urls: &[String],
    ) -> Result<Hotel> {
        let sql = format!(
            "INSERT INTO hotels (user_id, name, city, country, description, hotel_type, \
             adult_count, child_count, facilities, price_per_night, star_rating, image_urls, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now()) \
             RETURNING {HOTEL_COLUMNS}"
        );

        let hotel = sqlx::query_as::<_, Hotel>(&sql)
            .bind(owner)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.country)
            .bind(&form.description)
            .bind(&form.hotel_type)
            .bind(form.adult_count)
            .bind(form.child_count)
            .bind(&form.facilities)
            .bind(form.price_per_night)
            .bind(form.star_rating)
            .bind(image_urls)
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(hotel)
    }

    /// Owner-scoped update. The owner reference itself is immutable; the row
    /// is only matched, never rewritten, by `user_id`.
    pub async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        form: &HotelForm,
        image_urls: &[String],
    ) -> Result<Hotel> {
        let sql = format!(
            "UPDATE hotels SET name = $1, city = $2, country = $3, description = $4, \
             hotel_type = $5, adult_count = $6, child_count = $7, facilities = $8, \
             price_per_night = $9, star_rating = $10, image_urls = $11, last_updated = now() \
             WHERE id = $12 AND user_id = $13 \
             RETURNING {HOTEL_COLUMNS}"
        );

        sqlx::query_as::<_, Hotel>(&sql)
            .bind(&form.name)
            .bind(&form.city)
            .bind(&form.country)
            .bind(&form.description)
            .bind(&form.hotel_type)
            .bind(form.adult_count)
            .bind(form.child_count)
            .bind(&form.facilities)
            .bind(form.price_per_night)
            .bind(form.star_rating)
            .bind(image_urls)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?
            .ok_or(crate::Error::HotelNotFound(id))
    }

    pub async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Hotel>> {
        let sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE user_id = $1 ORDER BY last_updated DESC");
        let hotels = sqlx::query_as::<_, Hotel>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(hotels)
    }

    pub async fn find_by_owner(&self, id: Uuid, owner: Uuid) -> Result<Option<Hotel>> {
        let sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1 AND user_id = $2");
        let hotel = sqlx::query_as::<_, Hotel>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(hotel)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        let sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1");
        let hotel = sqlx::query_as::<_, Hotel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(hotel)
    }

    /// Fetch one page of hotels matching the filter.
    pub async fn search(
        &self,
        clauses: &[FilterClause],
        sort: Option<SortSpec>,
        window: PageWindow,
    ) -> Result<Vec<Hotel>> {
        let mut binds = Vec::new();
        let where_sql = render_where(clauses, &mut binds);
        let order_sql = order_by_sql(sort);

        binds.push(BindValue::Int(window.skip));
        let offset_n = binds.len();
        binds.push(BindValue::Int(window.limit));
        let limit_n = binds.len();

        let sql = format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels{where_sql}{order_sql} OFFSET ${offset_n} LIMIT ${limit_n}"
        );

        let mut query = sqlx::query_as::<_, Hotel>(&sql);
        for value in binds {
            query = match value {
                BindValue::Text(v) => query.bind(v),
                BindValue::TextArray(vs) => query.bind(vs),
                BindValue::Int(v) => query.bind(v),
                BindValue::SmallIntArray(vs) => query.bind(vs),
                BindValue::Float(v) => query.bind(v),
            };
        }

        let hotels = query
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(hotels)
    }

    /// Total number of hotels matching the filter; pagination metadata is
    /// derived from this, not from the fetched page.
    pub async fn count(&self, clauses: &[FilterClause]) -> Result<i64> {
        let mut binds = Vec::new();
        let where_sql = render_where(clauses, &mut binds);
        let sql = format!("SELECT COUNT(*) FROM hotels{where_sql}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            query = match value {
                BindValue::Text(v) => query.bind(v),
                BindValue::TextArray(vs) => query.bind(vs),
                BindValue::Int(v) => query.bind(v),
                BindValue::SmallIntArray(vs) => query.bind(vs),
                BindValue::Float(v) => query.bind(v),
            };
        }

        let total = query
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(total)
    }
}
