//! Biohack repository for database operations

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::models::biohack::{
    BiohackCategory, BiohackFilterRequest, BiohackResponse, CreateBiohackRequest,
    UpdateBiohackRequest,
};

const BIOHACK_COLUMNS: &str = "id, title, technique, category, difficulty, time_required, \
                               action, mechanism, research_studies, biology, color_gradient, \
                               created_date, updated_date";

/// Biohack repository for database operations
#[derive(Clone)]
pub struct BiohackRepository {
    pool: PgPool,
}

impl BiohackRepository {
    /// Create a new biohack repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all biohacks
    pub async fn get_all(&self) -> Result<Vec<BiohackResponse>> {
        let rows = sqlx::query(&format!(
            "SELECT {BIOHACK_COLUMNS} FROM biohacks ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(biohack_from_row).collect()
    }

    /// Find a biohack by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<BiohackResponse>> {
        let row = sqlx::query(&format!(
            "SELECT {BIOHACK_COLUMNS} FROM biohacks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(biohack_from_row).transpose()
    }

    /// Create a new biohack
    pub async fn create(&self, payload: &CreateBiohackRequest) -> Result<BiohackResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO biohacks (title, technique, category, difficulty, time_required,
                                  action, mechanism, research_studies, biology, color_gradient)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.technique)
        .bind(payload.category.as_str())
        .bind(&payload.difficulty)
        .bind(&payload.time_required)
        .bind(&payload.action)
        .bind(&payload.mechanism)
        .bind(&payload.research_studies)
        .bind(&payload.biology)
        .bind(&payload.color_gradient)
        .fetch_one(&self.pool)
        .await?;

        let id: i32 = row.get("id");
        self.find_by_id(id)
            .await?
            .context("biohack row missing after insert")
    }

    /// Apply a partial update; absent fields keep their stored values and
    /// updated_date always advances. Returns None when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateBiohackRequest,
    ) -> Result<Option<BiohackResponse>> {
        let row = sqlx::query(
            r#"
            SELECT title, technique, category, difficulty, time_required,
                   action, mechanism, research_studies, biology, color_gradient
            FROM biohacks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let title = payload.title.clone().unwrap_or_else(|| row.get("title"));
        let technique = payload.technique.clone().or_else(|| row.get("technique"));
        let category = match payload.category {
            Some(category) => category.as_str().to_string(),
            None => row.get("category"),
        };
        let difficulty = payload.difficulty.clone().or_else(|| row.get("difficulty"));
        let time_required = payload
            .time_required
            .clone()
            .or_else(|| row.get("time_required"));
        let action: Vec<String> = payload
            .action
            .clone()
            .unwrap_or_else(|| row.get("action"));
        let mechanism = payload.mechanism.clone().or_else(|| row.get("mechanism"));
        let research_studies = payload
            .research_studies
            .clone()
            .or_else(|| row.get("research_studies"));
        let biology = payload.biology.clone().or_else(|| row.get("biology"));
        let color_gradient = payload
            .color_gradient
            .clone()
            .or_else(|| row.get("color_gradient"));

        sqlx::query(
            r#"
            UPDATE biohacks
            SET title = $2, technique = $3, category = $4, difficulty = $5,
                time_required = $6, action = $7, mechanism = $8,
                research_studies = $9, biology = $10, color_gradient = $11,
                updated_date = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&title)
        .bind(&technique)
        .bind(&category)
        .bind(&difficulty)
        .bind(&time_required)
        .bind(&action)
        .bind(&mechanism)
        .bind(&research_studies)
        .bind(&biology)
        .bind(&color_gradient)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Delete a biohack by ID
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM biohacks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a biohack exists
    pub async fn exists(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM biohacks WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Multi-field filter: supplied fields are AND-combined. Category is an
    /// exact match; technique, difficulty and time_required match
    /// case-insensitive substrings; search_term matches case-insensitively
    /// against title, mechanism or biology.
    pub async fn filter(&self, filter: &BiohackFilterRequest) -> Result<Vec<BiohackResponse>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {BIOHACK_COLUMNS}
            FROM biohacks
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR technique ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR difficulty ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL OR time_required ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL
                   OR title ILIKE '%' || $5 || '%'
                   OR mechanism ILIKE '%' || $5 || '%'
                   OR biology ILIKE '%' || $5 || '%')
            ORDER BY id
            "#
        ))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.technique.as_deref().map(escape_like))
        .bind(filter.difficulty.as_deref().map(escape_like))
        .bind(filter.time_required.as_deref().map(escape_like))
        .bind(filter.search_term.as_deref().map(escape_like))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(biohack_from_row).collect()
    }

    /// Get all biohacks with an exact category match
    pub async fn by_category(&self, category: BiohackCategory) -> Result<Vec<BiohackResponse>> {
        let rows = sqlx::query(&format!(
            "SELECT {BIOHACK_COLUMNS} FROM biohacks WHERE category = $1 ORDER BY id"
        ))
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(biohack_from_row).collect()
    }

    /// Get all biohacks whose technique contains the given substring,
    /// case-insensitively
    pub async fn by_technique(&self, technique: &str) -> Result<Vec<BiohackResponse>> {
        let rows = sqlx::query(&format!(
            "SELECT {BIOHACK_COLUMNS} FROM biohacks \
             WHERE technique ILIKE '%' || $1 || '%' ORDER BY id"
        ))
        .bind(escape_like(technique))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(biohack_from_row).collect()
    }
}

/// Escape LIKE metacharacters so a client-supplied term matches as a literal
/// substring instead of a pattern
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn biohack_from_row(row: &sqlx::postgres::PgRow) -> Result<BiohackResponse> {
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
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("n_back"), "n\\_back");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_like("cold exposure"), "cold exposure");
    }
}
