//! Todo repository for database operations
//!
//! Every query that touches a single todo is scoped by owner, so a todo that
//! exists but belongs to someone else is indistinguishable from a missing one.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Todo record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_list: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_list: Vec<String>,
    pub status: String,
}

/// Input for updating a todo; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_list: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Todo repository for database operations
pub struct TodoRepository;

impl TodoRepository {
    /// All todos owned by a user, oldest first
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<TodoRecord>> {
        let records = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, user_id, title, description, image_list, status, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Create a new todo
    pub async fn create(pool: &PgPool, input: CreateTodo) -> Result<TodoRecord> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (user_id, title, description, image_list, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, image_list, status, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_list)
        .bind(&input.status)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a todo if it exists and belongs to the user
    pub async fn find_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<TodoRecord>> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, user_id, title, description, image_list, status, created_at, updated_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Apply a partial update to an owned todo
    ///
    /// Returns `None` when no todo with this ID belongs to the user.
    pub async fn update_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        changes: UpdateTodo,
    ) -> Result<Option<TodoRecord>> {
        let record = sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                image_list = COALESCE($5, image_list),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, image_list, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.image_list)
        .bind(changes.status)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete an owned todo; `false` when nothing matched
    pub async fn delete_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
