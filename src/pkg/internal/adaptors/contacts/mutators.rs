use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::contacts::spec::{ContactEntry, ContactInput};
use crate::prelude::Result;

pub struct ContactMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ContactMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ContactMutator { pool }
    }

    pub async fn create(&mut self, contact: &ContactInput) -> Result<ContactEntry> {
        let row = sqlx::query_as::<_, ContactEntry>(
            r#"
            INSERT INTO contacts (id, name, email, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, subject, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contact.name.trim())
        .bind(contact.email.trim())
        .bind(contact.subject.trim())
        .bind(&contact.message)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
