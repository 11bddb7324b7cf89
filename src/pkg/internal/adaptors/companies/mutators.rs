use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::companies::spec::{
    COMPANY_COLUMNS, CompanyEntry, CreateCompanyInput,
};
use crate::prelude::Result;

pub struct CompanyMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CompanyMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CompanyMutator { pool }
    }

    pub async fn create(&mut self, company: &CreateCompanyInput) -> Result<CompanyEntry> {
        let row = sqlx::query_as::<_, CompanyEntry>(&format!(
            r#"
            INSERT INTO companies (id, name, description, industry, location, website, logo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(company.name.trim())
        .bind(&company.description)
        .bind(&company.industry)
        .bind(&company.location)
        .bind(&company.website)
        .bind(&company.logo)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM companies")
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
