//! Domain models and request payloads

pub mod hotel;
pub mod user;

pub use hotel::{Hotel, HotelForm, HotelSearchResponse, PaginationMeta};
pub use user::{LoginInput, RegisterInput, User};

use validator::ValidationErrors;

/// Flatten validator output into the field-level message list the API
/// returns for 400 responses.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{field} is invalid")),
            }
        }
    }
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn validation_messages_surface_field_messages() {
        let input = RegisterInput {
            first_name: String::new(),
            last_name: "Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = input.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert!(messages.contains(&"First Name is required".to_string()));
        assert!(messages.contains(&"Email is required".to_string()));
        assert!(messages.contains(&"Password with 6 or more characters required".to_string()));
    }
}
