//! Schema bootstrap
//!
//! The questions table is created on startup if it does not exist yet.
//! There is no migration framework; the schema is a single table.

use sqlx::PgPool;

use crate::{Error, Result};

const CREATE_QUESTIONS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS questions (
    id BIGSERIAL PRIMARY KEY,
    text TEXT NOT NULL,
    hint1 TEXT,
    hint2 TEXT,
    answer TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_QUESTIONS_TABLE)
        .execute(pool)
        .await
        .map_err(Error::Database)?;

    tracing::info!("Database schema checked/created");
    Ok(())
}
