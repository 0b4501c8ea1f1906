//! Router-level checks for the owner-scoped hotel routes.
//!
//! The pool is created lazily against an unreachable address, so any
//! repository call fails; the image store counts uploads. Together they
//! pin the ordering: no image leaves the process until the ownership
//! lookup has run.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use staykit::{
    api::create_router,
    auth::{issue_token, session_cookie},
    db::{HotelRepository, UserRepository},
    services::{ImageStore, SearchService, UploadImage},
    state::AppState,
    Config,
};

struct CountingStore {
    uploads: AtomicUsize,
}

#[async_trait]
impl ImageStore for CountingStore {
    async fn upload(&self, _image: &UploadImage) -> staykit::Result<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok("https://cdn.example/uploaded.jpg".to_string())
    }
}

fn test_state(store: Arc<CountingStore>) -> (AppState, Config) {
    let mut config = Config::default();
    config.auth.jwt_secret = "router-test-secret".to_string();

    let db = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy("postgres://127.0.0.1:1/staykit")
        .unwrap();

    let hotels = HotelRepository::new(db.clone());
    let images: Arc<dyn ImageStore> = store;
    let state = AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        hotels: hotels.clone(),
        users: UserRepository::new(db),
        search: Arc::new(SearchService::new(hotels)),
        images,
    };
    (state, config)
}

fn hotel_form_body(boundary: &str) -> String {
    let mut body = String::new();
    for (name, value) in [
        ("name", "Verandah Retreat"),
        ("city", "Matheran"),
        ("country", "India"),
        ("description", "A quiet hillside stay"),
        ("type", "Boutique"),
        ("adultCount", "2"),
        ("childCount", "1"),
        ("pricePerNight", "120"),
        ("starRating", "4"),
        ("facilities[0]", "Spa"),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"imageFiles\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\npng-bytes\r\n--{boundary}--\r\n"
    ));
    body
}

#[tokio::test]
async fn update_verifies_ownership_before_uploading_images() {
    let store = Arc::new(CountingStore {
        uploads: AtomicUsize::new(0),
    });
    let (state, config) = test_state(store.clone());
    let app = create_router(state);

    let token = issue_token(&config.auth, Uuid::new_v4()).unwrap();
    let cookie = session_cookie(&config.auth, &token);
    let boundary = "xYzBoundary";

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/my-hotels/{}", Uuid::new_v4()))
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(hotel_form_body(boundary)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // The ownership lookup hits the dead pool and fails the request...
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // ...and nothing was uploaded on the way there.
    assert_eq!(store.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_without_session_cookie_is_unauthorized() {
    let store = Arc::new(CountingStore {
        uploads: AtomicUsize::new(0),
    });
    let (state, _config) = test_state(store.clone());
    let app = create_router(state);

    let boundary = "xYzBoundary";
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/my-hotels/{}", Uuid::new_v4()))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(hotel_form_body(boundary)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.uploads.load(Ordering::SeqCst), 0);
}
