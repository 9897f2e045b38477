// src/handlers/documents.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::{error::ApiError, extract::ApiPath},
    config::AppState,
    middleware::i18n::Locale,
};

// GET /api/quotations/{id}/export
#[utoipa::path(
    get,
    path = "/api/quotations/{id}/export",
    tag = "Quotations",
    params(("id" = Uuid, Path, description = "ID da cotação")),
    responses(
        (status = 200, description = "PDF da cotação", content_type = "application/pdf"),
        (status = 404, description = "Cotação não encontrada")
    )
)]
pub async fn export_quotation_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .quotation_pdf(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=quotation-{}.pdf", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
