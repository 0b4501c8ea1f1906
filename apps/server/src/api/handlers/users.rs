//! User registration

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    auth::{issue_token, session_cookie},
    models::{validation_messages, RegisterInput},
    state::AppState,
    Error, Result,
};

/// POST /api/users/register
///
/// Registration doubles as login: the response carries the session cookie.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Response> {
    input
        .validate()
        .map_err(|e| Error::Validation(validation_messages(&e)))?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(Error::BadRequest("User already exists".to_string()));
    }

    let password = input.password.clone();
    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| Error::Internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| Error::Internal(format!("password hashing failed: {e}")))?;

    let user = state.users.insert(&input, &password_hash).await?;

    let token = issue_token(&state.config.auth, user.id)?;
    let cookie = session_cookie(&state.config.auth, &token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "User registered OK" })),
    )
        .into_response())
}
