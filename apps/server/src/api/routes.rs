//! Route table for the booking API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, hotels, my_hotels, users};
use crate::state::AppState;

pub fn api_routes(state: AppState) -> Router<AppState> {
    // Owner-scoped routes sit behind the session cookie check.
    let protected = Router::new()
        .route("/auth/validate-token", get(auth::validate_token))
        .route(
            "/my-hotels",
            post(my_hotels::create_hotel).get(my_hotels::list_my_hotels),
        )
        .route(
            "/my-hotels/:id",
            get(my_hotels::get_my_hotel).put(my_hotels::update_hotel),
        )
        .layer(axum::middleware::from_fn_with_state(
            state,
            crate::auth::auth_middleware,
        ));

    Router::new()
        .route("/users/register", post(users::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/hotels/search", get(hotels::search_hotels))
        .route("/hotels/:id", get(hotels::get_hotel))
        .merge(protected)
}
