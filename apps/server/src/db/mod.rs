//! Database layer - repositories and search primitives

pub mod hotels;
pub mod search;
pub mod users;

pub use hotels::HotelRepository;
pub use users::UserRepository;
