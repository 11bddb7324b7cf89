use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactInput {
    #[validate(custom(function = "crate::prelude::non_blank"))]
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: String,
    #[validate(custom(function = "crate::prelude::non_blank"))]
    #[serde(default)]
    pub subject: String,
    #[validate(length(max = 5000), custom(function = "crate::prelude::non_blank"))]
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ApiError;

    #[test]
    fn test_contact_validation_names_the_bad_fields() {
        let input: ContactInput =
            serde_json::from_str(r#"{"name": "Ann", "email": "nope", "message": "hi"}"#).unwrap();
        let err: ApiError = input.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Invalid value for: email, subject");
    }

    #[test]
    fn test_whitespace_only_fields_are_empty() {
        let input: ContactInput = serde_json::from_str(
            r#"{"name": "   ", "email": "ann@example.com", "subject": " ", "message": "\n\t"}"#,
        )
        .unwrap();
        let err: ApiError = input.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Invalid value for: message, name, subject");
    }
}
