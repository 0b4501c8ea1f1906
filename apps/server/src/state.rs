//! Shared application state

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

use crate::{
    config::Config,
    db::{HotelRepository, UserRepository},
    services::{CloudinaryStore, ImageStore, SearchService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: PgPool,
    pub hotels: HotelRepository,
    pub users: UserRepository,
    pub search: Arc<SearchService>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    /// Connect to the database, run migrations, and wire up repositories
    /// and services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("Failed to run database migrations")?;

        let hotels = HotelRepository::new(db.clone());
        let users = UserRepository::new(db.clone());
        let search = Arc::new(SearchService::new(hotels.clone()));
        let images: Arc<dyn ImageStore> = Arc::new(
            CloudinaryStore::new(config.images.clone())
                .context("Failed to build image store client")?,
        );

        Ok(Self {
            config,
            db,
            hotels,
            users,
            search,
            images,
        })
    }
}
