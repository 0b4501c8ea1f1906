//! Request handlers

pub mod auth;
pub mod hotels;
pub mod my_hotels;
pub mod users;
