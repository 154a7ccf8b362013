//! Motivation repository for database operations

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::models::motivation::{
    CreateMotivationRequest, MotivationResponse, UpdateMotivationRequest,
};

/// Motivation repository for database operations
#[derive(Clone)]
pub struct MotivationRepository {
    pool: PgPool,
}

impl MotivationRepository {
    /// Create a new motivation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all motivations
    pub async fn get_all(&self) -> Result<Vec<MotivationResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, created_date, updated_date
            FROM motivations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(motivation_from_row).collect())
    }

    /// Find a motivation by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<MotivationResponse>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, created_date, updated_date
            FROM motivations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(motivation_from_row))
    }

    /// Create a new motivation
    pub async fn create(&self, payload: &CreateMotivationRequest) -> Result<MotivationResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO motivations (title, description)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        let id: i32 = row.get("id");
        self.find_by_id(id)
            .await?
            .context("motivation row missing after insert")
    }

    /// Apply a partial update; absent fields keep their stored values and
    /// updated_date always advances. Returns None when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateMotivationRequest,
    ) -> Result<Option<MotivationResponse>> {
        let row = sqlx::query("SELECT title, description FROM motivations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let title = payload.title.clone().unwrap_or_else(|| row.get("title"));
        let description = payload
            .description
            .clone()
            .or_else(|| row.get("description"));

        sqlx::query(
            r#"
            UPDATE motivations
            SET title = $2, description = $3, updated_date = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&title)
        .bind(&description)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Delete a motivation by ID
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM motivations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a motivation exists
    pub async fn exists(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM motivations WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

fn motivation_from_row(row: &sqlx::postgres::PgRow) -> MotivationResponse {
    MotivationResponse {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        created_date: row.get("created_date"),
        updated_date: row.get("updated_date"),
    }
}
