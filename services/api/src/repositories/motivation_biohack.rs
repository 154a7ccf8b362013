//! Motivation-biohack relationship repository
//!
//! The join table has no surrogate id; rows are keyed by the
//! (motivation_id, biohack_id) pair.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::models::biohack::{BiohackCategory, BiohackResponse};
use crate::models::motivation_biohack::{
    CreateMotivationBiohackRequest, MotivationBiohackResponse,
};

const LINK_SELECT: &str = r#"
    SELECT mb.motivation_id, m.title AS motivation_name,
           mb.biohack_id, b.title AS biohack_name
    FROM motivation_biohacks mb
    JOIN motivations m ON m.id = mb.motivation_id
    JOIN biohacks b ON b.id = mb.biohack_id
"#;

/// Motivation-biohack repository for database operations
#[derive(Clone)]
pub struct MotivationBiohackRepository {
    pool: PgPool,
}

impl MotivationBiohackRepository {
    /// Create a new motivation-biohack repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all relationships, with both display titles joined in
    pub async fn get_all(&self) -> Result<Vec<MotivationBiohackResponse>> {
        let rows = sqlx::query(&format!(
            "{LINK_SELECT} ORDER BY mb.motivation_id, mb.biohack_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(link_from_row).collect())
    }

    /// Find a relationship by its composite key
    pub async fn find_by_id(
        &self,
        motivation_id: i32,
        biohack_id: i32,
    ) -> Result<Option<MotivationBiohackResponse>> {
        let row = sqlx::query(&format!(
            "{LINK_SELECT} WHERE mb.motivation_id = $1 AND mb.biohack_id = $2"
        ))
        .bind(motivation_id)
        .bind(biohack_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(link_from_row))
    }

    /// Create a new relationship. The caller is responsible for pre-checking
    /// that both parents exist and that the pair is not already present.
    pub async fn create(
        &self,
        payload: &CreateMotivationBiohackRequest,
    ) -> Result<MotivationBiohackResponse> {
        sqlx::query("INSERT INTO motivation_biohacks (motivation_id, biohack_id) VALUES ($1, $2)")
            .bind(payload.motivation_id)
            .bind(payload.biohack_id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(payload.motivation_id, payload.biohack_id)
            .await?
            .context("motivation-biohack row missing after insert")
    }

    /// Delete a relationship by its composite key
    pub async fn delete(&self, motivation_id: i32, biohack_id: i32) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM motivation_biohacks WHERE motivation_id = $1 AND biohack_id = $2",
        )
        .bind(motivation_id)
        .bind(biohack_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a relationship exists
    pub async fn exists(&self, motivation_id: i32, biohack_id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM motivation_biohacks \
             WHERE motivation_id = $1 AND biohack_id = $2)",
        )
        .bind(motivation_id)
        .bind(biohack_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Get all biohacks linked to a motivation
    pub async fn biohacks_by_motivation(
        &self,
        motivation_id: i32,
    ) -> Result<Vec<BiohackResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.technique, b.category, b.difficulty, b.time_required,
                   b.action, b.mechanism, b.research_studies, b.biology, b.color_gradient,
                   b.created_date, b.updated_date
            FROM motivation_biohacks mb
            JOIN biohacks b ON b.id = mb.biohack_id
            WHERE mb.motivation_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(motivation_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let category: BiohackCategory = row
                    .get::<String, _>("category")
                    .parse()
                    .map_err(anyhow::Error::msg)?;

                Ok(BiohackResponse {
                    id: row.get("id"),
                    title: row.get("title"),
                    technique: row.get("technique"),
                    category,
                    difficulty: row.get("difficulty"),
                    time_required: row.get("time_required"),
                    action: row.get("action"),
                    mechanism: row.get("mechanism"),
                    research_studies: row.get("research_studies"),
                    biology: row.get("biology"),
                    color_gradient: row.get("color_gradient"),
                    created_date: row.get("created_date"),
                    updated_date: row.get("updated_date"),
                })
            })
            .collect()
    }
}

fn link_from_row(row: &sqlx::postgres::PgRow) -> MotivationBiohackResponse {
    MotivationBiohackResponse {
        motivation_id: row.get("motivation_id"),
        motivation_name: row.get("motivation_name"),
        biohack_id: row.get("biohack_id"),
        biohack_name: row.get("biohack_name"),
    }
}
