//! Service layer - search composition and image uploads

pub mod images;
pub mod search;

pub use images::{CloudinaryStore, ImageStore, UploadImage};
pub use search::SearchService;
