// src/handlers/todos.rs
//
// Todas as rotas passam pelo auth_guard; cada usuário só vê as próprias tarefas.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
        listing::{ListPage, ListQuery},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::todo::{Todo, TodoPayload},
};

// POST /api/todos
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "Todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Todo),
        (status = 400, description = "Texto vazio"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_todo(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiJson(payload): ApiJson<TodoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = app_state
        .todo_service
        .create(user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(todo)))
}

// GET /api/todos
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "Todos",
    responses((status = 200, description = "Tarefas do usuário, mais novas primeiro", body = Vec<Todo>)),
    security(("api_jwt" = []))
)]
pub async fn list_todos(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let todos = app_state
        .todo_service
        .list(user.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(todos))
}

// GET /api/todos/view
#[utoipa::path(
    get,
    path = "/api/todos/view",
    tag = "Todos",
    params(ListQuery),
    responses((status = 200, description = "Página filtrada de tarefas", body = ListPage)),
    security(("api_jwt" = []))
)]
pub async fn view_todos(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .todo_service
        .view(user.id, &query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(page))
}

// PUT /api/todos/{id}
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Tarefa atualizada", body = Todo),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_todo(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<TodoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = app_state
        .todo_service
        .update(user.id, id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(todo))
}

// PATCH /api/todos/{id}/toggle
#[utoipa::path(
    patch,
    path = "/api/todos/{id}/toggle",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa com `completed` invertido", body = Todo),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_todo(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = app_state
        .todo_service
        .toggle(user.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(todo))
}

// DELETE /api/todos/{id}
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "Todos",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa removida"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_todo(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .todo_service
        .delete(user.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
