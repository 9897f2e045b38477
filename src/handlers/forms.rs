// src/handlers/forms.rs

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
    models::forms::{EntityType, FieldDefinition, FieldDraft},
};

// "leads", "Lead" e "lead" são aceitos
fn parse_entity(raw: &str, locale: &Locale, app_state: &AppState) -> Result<EntityType, ApiError> {
    raw.parse::<EntityType>()
        .map_err(|app_err| app_err.to_api_error(locale, &app_state.i18n_store))
}

// GET /api/forms/{entity}
#[utoipa::path(
    get,
    path = "/api/forms/{entity}",
    tag = "Forms",
    params(("entity" = String, Path, description = "lead, customer, order ou quotation")),
    responses(
        (status = 200, description = "Campos personalizados e controles renderizados", content_type = "application/json"),
        (status = 400, description = "Entidade desconhecida")
    )
)]
pub async fn get_form(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(entity): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entity = parse_entity(&entity, &locale, &app_state)?;

    let view = app_state
        .form_service
        .form_view(entity)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(view))
}

// POST /api/forms/{entity}/fields
#[utoipa::path(
    post,
    path = "/api/forms/{entity}/fields",
    tag = "Forms",
    params(("entity" = String, Path, description = "lead, customer, order ou quotation")),
    request_body = FieldDraft,
    responses(
        (status = 201, description = "Campo criado", body = FieldDefinition),
        (status = 400, description = "Rótulo vazio ou entidade desconhecida"),
        (status = 409, description = "Já existe um campo com esse nome")
    )
)]
pub async fn add_field(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(entity): ApiPath<String>,
    ApiJson(draft): ApiJson<FieldDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let entity = parse_entity(&entity, &locale, &app_state)?;
    let field = app_state
        .form_service
        .add_field(entity, draft)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(field)))
}

// PUT /api/forms/{entity}/fields/{id}
#[utoipa::path(
    put,
    path = "/api/forms/{entity}/fields/{id}",
    tag = "Forms",
    params(
        ("entity" = String, Path, description = "lead, customer, order ou quotation"),
        ("id" = String, Path, description = "ID do campo")
    ),
    request_body = FieldDraft,
    responses(
        (status = 200, description = "Campo atualizado", body = FieldDefinition),
        (status = 404, description = "Campo não encontrado"),
        (status = 409, description = "Já existe um campo com esse nome")
    )
)]
pub async fn update_field(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath((entity, id)): ApiPath<(String, String)>,
    ApiJson(draft): ApiJson<FieldDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let entity = parse_entity(&entity, &locale, &app_state)?;
    let field = app_state
        .form_service
        .update_field(entity, &id, draft)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(field))
}

// DELETE /api/forms/{entity}/fields/{id}
#[utoipa::path(
    delete,
    path = "/api/forms/{entity}/fields/{id}",
    tag = "Forms",
    params(
        ("entity" = String, Path, description = "lead, customer, order ou quotation"),
        ("id" = String, Path, description = "ID do campo")
    ),
    responses(
        (status = 204, description = "Campo removido"),
        (status = 404, description = "Campo não encontrado")
    )
)]
pub async fn remove_field(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath((entity, id)): ApiPath<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let entity = parse_entity(&entity, &locale, &app_state)?;
    app_state
        .form_service
        .remove_field(entity, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
