//! Journal repository for database operations

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::models::journal::{CreateJournalRequest, JournalResponse, UpdateJournalRequest};

const JOURNAL_SELECT: &str = r#"
    SELECT j.id, j.user_id, u.first_name AS user_first_name, u.last_name AS user_last_name,
           j.biohack_id, b.title AS biohack_name, j.notes, j.rating, j.date_time,
           j.created_date, j.updated_date
    FROM journals j
    JOIN users u ON u.id = j.user_id
    JOIN biohacks b ON b.id = j.biohack_id
"#;

/// Journal repository for database operations
#[derive(Clone)]
pub struct JournalRepository {
    pool: PgPool,
}

impl JournalRepository {
    /// Create a new journal repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all journals, with the user's name and the biohack title joined in
    pub async fn get_all(&self) -> Result<Vec<JournalResponse>> {
        let rows = sqlx::query(&format!("{JOURNAL_SELECT} ORDER BY j.id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(journal_from_row).collect())
    }

    /// Find a journal by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<JournalResponse>> {
        let row = sqlx::query(&format!("{JOURNAL_SELECT} WHERE j.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(journal_from_row))
    }

    /// Get all journals for a user and biohack pair, most recent event first
    pub async fn by_user_and_biohack(
        &self,
        user_id: i32,
        biohack_id: i32,
    ) -> Result<Vec<JournalResponse>> {
        let rows = sqlx::query(&format!(
            "{JOURNAL_SELECT} WHERE j.user_id = $1 AND j.biohack_id = $2 \
             ORDER BY j.date_time DESC"
        ))
        .bind(user_id)
        .bind(biohack_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(journal_from_row).collect())
    }

    /// Create a new journal entry
    pub async fn create(&self, payload: &CreateJournalRequest) -> Result<JournalResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO journals (user_id, biohack_id, notes, rating, date_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(payload.user_id)
        .bind(payload.biohack_id)
        .bind(&payload.notes)
        .bind(payload.rating)
        .bind(payload.date_time)
        .fetch_one(&self.pool)
        .await?;

        let id: i32 = row.get("id");
        self.find_by_id(id)
            .await?
            .context("journal row missing after insert")
    }

    /// Apply a partial update; absent fields keep their stored values and
    /// updated_date always advances. Returns None when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateJournalRequest,
    ) -> Result<Option<JournalResponse>> {
        let row = sqlx::query(
            "SELECT user_id, biohack_id, notes, rating, date_time FROM journals WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id = payload.user_id.unwrap_or_else(|| row.get("user_id"));
        let biohack_id = payload.biohack_id.unwrap_or_else(|| row.get("biohack_id"));
        let notes = payload.notes.clone().or_else(|| row.get("notes"));
        let rating = payload.rating.or_else(|| row.get("rating"));
        let date_time = payload.date_time.unwrap_or_else(|| row.get("date_time"));

        sqlx::query(
            r#"
            UPDATE journals
            SET user_id = $2, biohack_id = $3, notes = $4, rating = $5,
                date_time = $6, updated_date = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(biohack_id)
        .bind(&notes)
        .bind(rating)
        .bind(date_time)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Delete a journal by ID
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a journal exists
    pub async fn exists(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM journals WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

fn journal_from_row(row: &sqlx::postgres::PgRow) -> JournalResponse {
    JournalResponse {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_first_name: row.get("user_first_name"),
        user_last_name: row.get("user_last_name"),
        biohack_id: row.get("biohack_id"),
        biohack_name: row.get("biohack_name"),
        notes: row.get("notes"),
        rating: row.get("rating"),
        date_time: row.get("date_time"),
        created_date: row.get("created_date"),
        updated_date: row.get("updated_date"),
    }
}
