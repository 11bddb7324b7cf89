use sqlx::migrate::Migrator;

use crate::{pkg::server::state::{AppState, GetTxn}, prelude::Result};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn apply() -> Result<()> {
    let state = AppState::new().await?;
    let mut tx = state.db_pool.begin_txn().await?;
    tracing::debug!("connected to db");
    MIGRATOR.run(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Migrations applied successfully");
    Ok(())
}
