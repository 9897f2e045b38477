// src/handlers/settings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::ApiError, extract::{ApiJson, ApiPath}},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        auth::MessageResponse,
        settings::{Setting, UpdateSettingRequest},
    },
};

// GET /api/settings/{type}
#[utoipa::path(
    get,
    path = "/api/settings/{type}",
    tag = "Settings",
    params(("type" = String, Path, description = "Tipo do setting (ex: lead_sources)")),
    responses((status = 200, description = "Valores do setting (lista vazia se não existir)", body = Setting))
)]
pub async fn get_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(setting_type): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let setting = app_state
        .settings_service
        .get_setting(&setting_type)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(setting)))
}

// POST /api/settings/{type}
#[utoipa::path(
    post,
    path = "/api/settings/{type}",
    tag = "Settings",
    params(("type" = String, Path, description = "Tipo do setting")),
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting criado ou substituído", body = Setting),
        (status = 400, description = "values não é um array válido"),
        (status = 409, description = "Valor repetido")
    )
)]
pub async fn save_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(setting_type): ApiPath<String>,
    ApiJson(payload): ApiJson<UpdateSettingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .settings_service
        .save_setting(&setting_type, payload.values)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/settings/{type}
#[utoipa::path(
    delete,
    path = "/api/settings/{type}",
    tag = "Settings",
    params(("type" = String, Path, description = "Tipo do setting")),
    responses(
        (status = 200, description = "Setting removido", body = MessageResponse),
        (status = 404, description = "Setting não encontrado")
    )
)]
pub async fn delete_setting(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(setting_type): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .settings_service
        .delete_setting(&setting_type)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(MessageResponse {
        message: format!("Setting '{}' deleted", setting_type),
    }))
}

// DELETE /api/settings/{type}/{value}
#[utoipa::path(
    delete,
    path = "/api/settings/{type}/{value}",
    tag = "Settings",
    params(
        ("type" = String, Path, description = "Tipo do setting"),
        ("value" = String, Path, description = "Valor a remover")
    ),
    responses(
        (status = 200, description = "Setting sem o valor", body = Setting),
        (status = 404, description = "Valor não encontrado")
    )
)]
pub async fn remove_setting_value(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath((setting_type, value)): ApiPath<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .settings_service
        .remove_value(&setting_type, &value)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(updated))
}
