//! StayKit - hotel booking REST API
//!
//! A booking backend with:
//! - Cookie + JWT session auth (register, login, logout, validate)
//! - Owner-scoped hotel CRUD with multipart image upload to an image CDN
//! - Unauthenticated, paginated and filterable hotel search

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
