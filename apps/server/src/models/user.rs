//! User entity and auth payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: Uuid::nil(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["firstName"], "Jane");
    }

    #[test]
    fn short_password_fails_validation() {
        let input = LoginInput {
            email: "jane@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
