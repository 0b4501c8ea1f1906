//! Session authentication primitives.
//!
//! Sessions are HS256 JWTs carried in an HttpOnly cookie. Write endpoints
//! run behind `auth_middleware`, which verifies the cookie and attaches the
//! caller's user id to the request; handlers pick it up through the
//! `CurrentUser` extractor. Search and login/register stay public.

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{config::AuthConfig, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: Uuid,
    exp: i64,
}

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
}

impl AuthError {
    pub fn into_unauthorized_response(self) -> Response {
        // The client only learns that it is not authenticated, never why.
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "message": "unauthorized" })),
        )
            .into_response()
    }
}

/// Sign a session token for the given user.
pub fn issue_token(config: &AuthConfig, user_id: Uuid) -> crate::Result<String> {
    let claims = Claims {
        user_id,
        exp: Utc::now().timestamp() + config.token_ttl_seconds,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| crate::Error::Internal(format!("Failed to sign session token: {e}")))
}

/// Verify a session token and return the embedded user id.
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Uuid, AuthError> {
    let validation = Validation::default();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.user_id)
    .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// Pull a single cookie value out of the Cookie headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k.trim() == name).then(|| v.trim())
        })
        .next()
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(config: &AuthConfig, token: &str) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        config.cookie_name, token, config.token_ttl_seconds
    );
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value clearing the session (logout).
pub fn expired_cookie(config: &AuthConfig) -> String {
    format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax",
        config.cookie_name
    )
}

/// Authenticated caller attached to the request by `auth_middleware`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| AuthError::MissingToken.into_unauthorized_response())
    }
}

/// Middleware protecting owner-scoped routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let Some(token) = cookie_value(req.headers(), &state.config.auth.cookie_name) else {
        return AuthError::MissingToken.into_unauthorized_response();
    };

    match verify_token(&state.config.auth, token) {
        Ok(user_id) => {
            req.extensions_mut().insert(CurrentUser(user_id));
            next.run(req).await
        }
        Err(err) => err.into_unauthorized_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = issue_token(&config, user_id).unwrap();
        assert_eq!(verify_token(&config, &token).unwrap(), user_id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "some-other-secret".to_string();

        let token = issue_token(&other, Uuid::new_v4()).unwrap();
        assert!(verify_token(&config, &token).is_err());
    }

    #[test]
    fn cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(cookie_value(&headers, "auth_token"), Some("abc.def.ghi"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn session_cookie_is_http_only_with_ttl() {
        let config = test_config();
        let cookie = session_cookie(&config, "tok");
        assert!(cookie.starts_with("auth_token=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn secure_cookie_flag_follows_config() {
        let mut config = test_config();
        config.secure_cookies = true;
        assert!(session_cookie(&config, "tok").contains("Secure"));
    }

    #[test]
    fn expired_cookie_clears_session() {
        let cookie = expired_cookie(&test_config());
        assert!(cookie.starts_with("auth_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
