//! Session handlers: login, logout, token validation

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    auth::{expired_cookie, issue_token, session_cookie, CurrentUser},
    models::{validation_messages, LoginInput},
    state::AppState,
    Error, Result,
};

/// POST /api/auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Response> {
    input
        .validate()
        .map_err(|e| Error::Validation(validation_messages(&e)))?;

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(|| Error::BadRequest("Invalid Credentials".to_string()))?;

    // bcrypt verification is CPU-bound; keep it off the async workers.
    let password = input.password.clone();
    let password_hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| Error::Internal(format!("password verification task failed: {e}")))?
        .map_err(|e| Error::Internal(format!("password verification failed: {e}")))?;

    if !matches {
        return Err(Error::BadRequest("Invalid Credentials".to_string()));
    }

    let token = issue_token(&state.config.auth, user.id)?;
    let cookie = session_cookie(&state.config.auth, &token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "userId": user.id })),
    )
        .into_response())
}

/// GET /api/auth/validate-token
pub async fn validate_token(user: CurrentUser) -> impl IntoResponse {
    Json(json!({ "userId": user.0 }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, expired_cookie(&state.config.auth))],
        StatusCode::OK,
    )
}
