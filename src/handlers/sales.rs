// src/handlers/sales.rs

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
    middleware::i18n::Locale,
    models::sales::{Order, OrderPayload, Quotation, QuotationPayload},
};

// =============================================================================
//  COTAÇÕES
// =============================================================================

// POST /api/quotations
#[utoipa::path(
    post,
    path = "/api/quotations",
    tag = "Quotations",
    request_body = QuotationPayload,
    responses(
        (status = 201, description = "Cotação criada com número sequencial (Q-00001)", body = Quotation),
        (status = 400, description = "Dados inválidos ou totais divergentes")
    )
)]
pub async fn create_quotation(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<QuotationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quotation = app_state
        .sales_service
        .create_quotation(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(quotation)))
}

// PUT /api/quotations/{id}
#[utoipa::path(
    put,
    path = "/api/quotations/{id}",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "ID da cotação")),
    request_body = QuotationPayload,
    responses(
        (status = 200, description = "Cotação atualizada", body = Quotation),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cotação não encontrada")
    )
)]
pub async fn update_quotation(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<QuotationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quotation = app_state
        .sales_service
        .update_quotation(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(quotation))
}

// GET /api/quotations
#[utoipa::path(
    get,
    path = "/api/quotations",
    tag = "Quotations",
    responses((status = 200, description = "Todas as cotações, mais novas primeiro", body = Vec<Quotation>))
)]
pub async fn list_quotations(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let quotations = app_state
        .sales_service
        .list_quotations()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotations)))
}

// GET /api/quotations/{id}
#[utoipa::path(
    get,
    path = "/api/quotations/{id}",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "ID da cotação")),
    responses(
        (status = 200, description = "Cotação", body = Quotation),
        (status = 404, description = "Cotação não encontrada")
    )
)]
pub async fn get_quotation(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quotation = app_state
        .sales_service
        .get_quotation(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(quotation))
}

// GET /api/quotations/view
#[utoipa::path(
    get,
    path = "/api/quotations/view",
    tag = "Quotations",
    params(ListQuery),
    responses((status = 200, description = "Página filtrada de cotações", body = ListPage))
)]
pub async fn view_quotations(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .sales_service
        .quotations_view(&query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(page))
}

// =============================================================================
//  PEDIDOS
// =============================================================================

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Pedido criado com número sequencial (O-00001)", body = Order),
        (status = 400, description = "Dados inválidos, cliente inexistente ou totais divergentes")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<OrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .sales_service
        .create_order(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses((status = 200, description = "Todos os pedidos, mais novos primeiro", body = Vec<Order>))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .sales_service
        .list_orders()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = Order),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .sales_service
        .get_order(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(order))
}

// GET /api/orders/view
#[utoipa::path(
    get,
    path = "/api/orders/view",
    tag = "Orders",
    params(ListQuery),
    responses((status = 200, description = "Página filtrada de pedidos", body = ListPage))
)]
pub async fn view_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .sales_service
        .orders_view(&query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(page))
}
