//! Todo API routes
//!
//! Every handler resolves the caller through [`CurrentUser`]; the services
//! scope all queries to that user.

use crate::auth::CurrentUser;
use crate::error::{ApiJson, ApiResult};
use crate::services::TodoService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use todo_list_shared::{
    CreateTodoRequest, DataResponse, MessageResponse, TodoResponse, UpdateTodoRequest,
};

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
}

/// GET /todos
async fn list_todos(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<DataResponse<Vec<TodoResponse>>>> {
    let pool = state.db().pool().await?;
    let todos = TodoService::list(pool, user.id).await?;
    Ok(Json(DataResponse::ok(todos)))
}

/// POST /todos
async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<TodoResponse>>)> {
    let pool = state.db().pool().await?;
    let todo = TodoService::create(pool, user.id, req).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::ok(todo))))
}

/// GET /todos/:id
async fn get_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<TodoResponse>>> {
    let id = TodoService::parse_id(&id)?;
    let pool = state.db().pool().await?;
    let todo = TodoService::get(pool, user.id, id).await?;
    Ok(Json(DataResponse::ok(todo)))
}

/// PUT /todos/:id
async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> ApiResult<Json<DataResponse<TodoResponse>>> {
    let id = TodoService::parse_id(&id)?;
    let pool = state.db().pool().await?;
    let todo = TodoService::update(pool, user.id, id, req).await?;
    Ok(Json(DataResponse::ok(todo)))
}

/// DELETE /todos/:id
async fn delete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = TodoService::parse_id(&id)?;
    let pool = state.db().pool().await?;
    TodoService::delete(pool, user.id, id).await?;
    Ok(Json(MessageResponse::ok("Todo deleted successfully")))
}
