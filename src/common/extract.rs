// src/common/extract.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::{error::ApiError, i18n::I18nStore},
    config::AppState,
    middleware::i18n::Locale,
};

// Wrappers dos extratores do axum: a rejeição vira o mesmo corpo JSON
// `{ "error": ... }` dos demais erros, no idioma do cliente.

#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[derive(Debug)]
pub struct ApiPath<T>(pub T);

#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

fn rejected(status: StatusCode, detail: String, locale: &Locale, i18n: &I18nStore) -> ApiError {
    // JSON bem formado com tipo errado também é erro do cliente
    let status = match status {
        StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
        other => other,
    };
    tracing::debug!(%status, %detail, "requisição rejeitada pelo extrator");

    ApiError {
        status,
        error: format!("{} {}", i18n.translate(&locale.0, "invalid_input"), detail),
        details: None,
    }
}

impl<T> FromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(req.headers());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let rejection: JsonRejection = rejection;
                Err(rejected(rejection.status(), rejection.body_text(), &locale, &state.i18n_store))
            }
        }
    }
}

impl<T> FromRequestParts<AppState> for ApiPath<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                let rejection: PathRejection = rejection;
                let locale = Locale::from_headers(&parts.headers);
                Err(rejected(rejection.status(), rejection.body_text(), &locale, &state.i18n_store))
            }
        }
    }
}

impl<T> FromRequestParts<AppState> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => {
                let rejection: QueryRejection = rejection;
                let locale = Locale::from_headers(&parts.headers);
                Err(rejected(rejection.status(), rejection.body_text(), &locale, &state.i18n_store))
            }
        }
    }
}
