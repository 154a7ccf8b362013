//! User repository for database operations

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::models::user::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all users, with the linked motivation title joined in
    pub async fn get_all(&self) -> Result<Vec<UserResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.email, u.provider,
                   u.external_id, u.sub_id, u.motivation_id, m.title AS motivation_name,
                   u.created_date, u.updated_date
            FROM users u
            LEFT JOIN motivations m ON m.id = u.motivation_id
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserResponse>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.email, u.provider,
                   u.external_id, u.sub_id, u.motivation_id, m.title AS motivation_name,
                   u.created_date, u.updated_date
            FROM users u
            LEFT JOIN motivations m ON m.id = u.motivation_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Create a new user
    pub async fn create(&self, payload: &CreateUserRequest) -> Result<UserResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, provider, external_id, sub_id, motivation_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.provider)
        .bind(&payload.external_id)
        .bind(&payload.sub_id)
        .bind(payload.motivation_id)
        .fetch_one(&self.pool)
        .await?;

        let id: i32 = row.get("id");
        self.find_by_id(id)
            .await?
            .context("user row missing after insert")
    }

    /// Apply a partial update; absent fields keep their stored values and
    /// updated_date always advances. Returns None when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateUserRequest,
    ) -> Result<Option<UserResponse>> {
        let row = sqlx::query(
            r#"
            SELECT first_name, last_name, email, provider, external_id, sub_id, motivation_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let first_name = payload
            .first_name
            .clone()
            .unwrap_or_else(|| row.get("first_name"));
        let last_name = payload
            .last_name
            .clone()
            .unwrap_or_else(|| row.get("last_name"));
        let email = payload.email.clone().unwrap_or_else(|| row.get("email"));
        let provider = payload.provider.clone().or_else(|| row.get("provider"));
        let external_id = payload
            .external_id
            .clone()
            .or_else(|| row.get("external_id"));
        let sub_id = payload.sub_id.clone().or_else(|| row.get("sub_id"));
        let motivation_id = payload.motivation_id.or_else(|| row.get("motivation_id"));

        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, provider = $5,
                external_id = $6, sub_id = $7, motivation_id = $8, updated_date = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&provider)
        .bind(&external_id)
        .bind(&sub_id)
        .bind(motivation_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Set or clear the motivation foreign key. Returns None when the user
    /// id is absent.
    pub async fn set_motivation(
        &self,
        id: i32,
        motivation_id: Option<i32>,
    ) -> Result<Option<UserResponse>> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET motivation_id = $2, updated_date = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(motivation_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user exists
    pub async fn exists(&self, id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> UserResponse {
    UserResponse {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        provider: row.get("provider"),
        external_id: row.get("external_id"),
        sub_id: row.get("sub_id"),
        motivation_id: row.get("motivation_id"),
        motivation_name: row.get("motivation_name"),
        created_date: row.get("created_date"),
        updated_date: row.get("updated_date"),
    }
}
