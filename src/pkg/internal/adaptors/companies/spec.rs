use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const COMPANY_COLUMNS: &str =
    "id, name, description, industry, location, website, logo, created_at";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyInput {
    #[validate(custom(function = "crate::prelude::non_blank"))]
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(url)]
    pub logo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required() {
        let input: CreateCompanyInput = serde_json::from_str(r#"{"industry": "Energy"}"#).unwrap();
        assert!(input.validate().is_err());
        let input: CreateCompanyInput = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_links_must_be_urls() {
        let input: CreateCompanyInput =
            serde_json::from_str(r#"{"name": "Acme", "website": "not a url"}"#).unwrap();
        assert!(input.validate().is_err());
        let input: CreateCompanyInput =
            serde_json::from_str(r#"{"name": "Acme", "website": "https://acme.example.com"}"#)
                .unwrap();
        assert!(input.validate().is_ok());
    }
}
