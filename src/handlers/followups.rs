// src/handlers/followups.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::ApiError,
        extract::{ApiJson, ApiQuery},
        listing::{ListPage, ListQuery},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::followup::{CreateFollowUpPayload, FollowUp},
};

// POST /api/followups
#[utoipa::path(
    post,
    path = "/api/followups",
    tag = "FollowUps",
    request_body = CreateFollowUpPayload,
    responses(
        (status = 201, description = "Follow-up agendado", body = FollowUp),
        (status = 400, description = "Dados inválidos ou referência inexistente")
    )
)]
pub async fn create_followup(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<CreateFollowUpPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let followup = app_state
        .followup_service
        .create(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(followup)))
}

// GET /api/followups
#[utoipa::path(
    get,
    path = "/api/followups",
    tag = "FollowUps",
    responses((status = 200, description = "Follow-ups por data, mais próximos primeiro", body = Vec<FollowUp>))
)]
pub async fn list_followups(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let followups = app_state
        .followup_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(followups)))
}

// GET /api/followups/view
#[utoipa::path(
    get,
    path = "/api/followups/view",
    tag = "FollowUps",
    params(ListQuery),
    responses((status = 200, description = "Página filtrada de follow-ups", body = ListPage))
)]
pub async fn view_followups(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .followup_service
        .view(&query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(page))
}
