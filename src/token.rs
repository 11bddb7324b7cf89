use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{conf::settings, pkg::internal::auth::Role, prelude::{ApiError, Result}};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: Role, ttl_hours: i64) -> Result<Self> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(chrono::Duration::hours(ttl_hours))
            .ok_or_else(|| ApiError::internal("Failed to calculate token expiration"))?;
        Ok(Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

pub fn generate_token(user_id: Uuid, role: Role) -> Result<String> {
    let claims = Claims::new(user_id, role, settings.token_ttl_hours)?;
    sign(&claims, &settings.jwt_secret)
}

pub fn verify_token(token: &str) -> Result<Claims> {
    check(token, &settings.jwt_secret)
}

fn sign(claims: &Claims, secret: &str) -> Result<String> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

fn check(token: &str, secret: &str) -> Result<Claims> {
    Ok(decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() -> Result<()> {
        let claims = Claims::new(Uuid::new_v4(), Role::Employer, 1)?;
        let token = sign(&claims, "s3cret")?;
        assert_eq!(check(&token, "s3cret")?, claims);
        Ok(())
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() -> Result<()> {
        let claims = Claims::new(Uuid::new_v4(), Role::Candidate, 1)?;
        let token = sign(&claims, "one")?;
        let err = check(&token, "two").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        Ok(())
    }

    #[test]
    fn test_expired_token_is_rejected() -> Result<()> {
        let claims = Claims::new(Uuid::new_v4(), Role::Candidate, -2)?;
        let token = sign(&claims, "s3cret")?;
        assert!(check(&token, "s3cret").is_err());
        Ok(())
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(verify_token("not.a.token").is_err());
    }
}
