//! Todo service: ownership-scoped CRUD
//!
//! Input normalisation (trimming, defaults, field limits) is done by pure
//! functions so it can be tested without a database.

use crate::error::ApiError;
use crate::repositories::{CreateTodo, TodoRecord, TodoRepository, UpdateTodo};
use sqlx::PgPool;
use todo_list_shared::validation::{validate_description, validate_title};
use todo_list_shared::{CreateTodoRequest, TodoResponse, TodoStatus, UpdateTodoRequest};
use tracing::{debug, warn};
use uuid::Uuid;

const NOT_FOUND_MESSAGE: &str = "Todo not found or not authorized";

/// Todo service for CRUD operations
pub struct TodoService;

impl TodoService {
    /// Parse a todo ID from the path
    pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
        Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid todo ID".to_string()))
    }

    /// Validate and normalise a create request
    pub fn prepare_new(user_id: Uuid, request: CreateTodoRequest) -> Result<CreateTodo, ApiError> {
        let title = request.title.unwrap_or_default().trim().to_string();
        validate_title(&title).map_err(ApiError::Validation)?;

        Ok(CreateTodo {
            user_id,
            title,
            description: normalize_description(request.description)?,
            image_list: normalize_images(request.image_list.unwrap_or_default()),
            status: request.status.unwrap_or_default().as_str().to_string(),
        })
    }

    /// Validate and normalise an update request
    pub fn prepare_changes(request: UpdateTodoRequest) -> Result<UpdateTodo, ApiError> {
        let title = match request.title {
            Some(title) => {
                let title = title.trim().to_string();
                validate_title(&title).map_err(ApiError::Validation)?;
                Some(title)
            }
            None => None,
        };

        Ok(UpdateTodo {
            title,
            description: normalize_description(request.description)?,
            image_list: request.image_list.map(normalize_images),
            status: request.status.map(|s| s.as_str().to_string()),
        })
    }

    /// All of the user's todos
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<TodoResponse>, ApiError> {
        TodoRepository::list_by_owner(pool, user_id)
            .await?
            .into_iter()
            .map(to_response)
            .collect()
    }

    /// Create a todo owned by the user
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        request: CreateTodoRequest,
    ) -> Result<TodoResponse, ApiError> {
        let input = Self::prepare_new(user_id, request)?;
        let record = TodoRepository::create(pool, input).await?;
        debug!(todo_id = %record.id, %user_id, "Todo created");
        to_response(record)
    }

    /// One of the user's todos
    pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<TodoResponse, ApiError> {
        let record = TodoRepository::find_owned(pool, id, user_id)
            .await?
            .ok_or_else(not_found)?;
        to_response(record)
    }

    /// Partially update one of the user's todos
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        request: UpdateTodoRequest,
    ) -> Result<TodoResponse, ApiError> {
        let changes = Self::prepare_changes(request)?;
        let record = TodoRepository::update_owned(pool, id, user_id, changes)
            .await?
            .ok_or_else(not_found)?;
        debug!(todo_id = %record.id, %user_id, "Todo updated");
        to_response(record)
    }

    /// Delete one of the user's todos
    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !TodoRepository::delete_owned(pool, id, user_id).await? {
            return Err(not_found());
        }
        debug!(todo_id = %id, %user_id, "Todo deleted");
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

fn normalize_description(description: Option<String>) -> Result<Option<String>, ApiError> {
    match description {
        Some(text) => {
            let text = text.trim().to_string();
            validate_description(&text).map_err(ApiError::Validation)?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

fn normalize_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|url| url.trim().to_string())
        .collect()
}

fn to_response(record: TodoRecord) -> Result<TodoResponse, ApiError> {
    let status = record.status.parse::<TodoStatus>().map_err(|e| {
        warn!(todo_id = %record.id, "Stored todo has unknown status");
        ApiError::Internal(anyhow::anyhow!(e))
    })?;

    Ok(TodoResponse {
        id: record.id,
        user_id: record.user_id,
        title: record.title,
        description: record.description,
        image_list: record.image_list,
        status,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}
