use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    PgConnection,
    prelude::{FromRow, Type},
};
use std::str::FromStr;
use uuid::Uuid;

use crate::prelude::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Employer,
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "candidate" => Ok(Role::Candidate),
            "employer" => Ok(Role::Employer),
            other => Err(ApiError::validation(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

impl User {
    pub async fn create(
        conn: &mut PgConnection,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self> {
        let password_hash = hash_password(password)?;
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(normalize_email(email))
        .bind(password_hash)
        .bind(role)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::validation("User already exists")
            }
            e => e.into(),
        })?;
        tracing::info!("registered {} as {:?}", &user.email, &user.role);
        Ok(user)
    }

    pub async fn retrieve(conn: &mut PgConnection, id: Uuid) -> Result<Option<Self>> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?)
    }

    pub async fn retrieve_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<Self>> {
        Ok(sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(normalize_email(email))
        .fetch_optional(&mut *conn)
        .await?)
    }

    /// Looks the user up by email and checks the password. Unknown emails and
    /// bad passwords are indistinguishable to the caller.
    pub async fn authenticate(conn: &mut PgConnection, email: &str, password: &str) -> Result<Self> {
        match User::retrieve_by_email(conn, email).await? {
            Some(user) if verify_password(password, &user.password_hash) => Ok(user),
            _ => {
                tracing::warn!("failed login attempt for {}", email);
                Err(ApiError::unauthorized("Invalid email or password"))
            }
        }
    }

    pub fn ensure_owns(&self, owner: Uuid, msg: &str) -> Result<()> {
        if self.id == owner {
            Ok(())
        } else {
            tracing::warn!("user {} denied on resource owned by {}", self.id, owner);
            Err(ApiError::forbidden(msg))
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ApiError::internal(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
