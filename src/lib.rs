// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    middleware::auth::auth_guard,
};

/// Monta o router completo (rotas públicas, rotas com auth e docs).
pub fn create_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas protegidas pelo middleware
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/todos",
            post(handlers::todos::create_todo).get(handlers::todos::list_todos),
        )
        .route("/todos/view", get(handlers::todos::view_todos))
        .route(
            "/todos/{id}",
            put(handlers::todos::update_todo).delete(handlers::todos::delete_todo),
        )
        .route("/todos/{id}/toggle", patch(handlers::todos::toggle_todo))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let crm_routes = Router::new()
        .route(
            "/leads",
            post(handlers::crm::create_lead).get(handlers::crm::list_leads),
        )
        .route("/leads/view", get(handlers::crm::view_leads))
        .route("/leads/{id}", get(handlers::crm::get_lead))
        .route(
            "/customers",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route("/customers/view", get(handlers::crm::view_customers))
        .route("/customers/{id}", get(handlers::crm::get_customer))
        .route(
            "/followups",
            post(handlers::followups::create_followup).get(handlers::followups::list_followups),
        )
        .route("/followups/view", get(handlers::followups::view_followups));

    let sales_routes = Router::new()
        .route(
            "/quotations",
            post(handlers::sales::create_quotation).get(handlers::sales::list_quotations),
        )
        .route("/quotations/view", get(handlers::sales::view_quotations))
        .route(
            "/quotations/{id}",
            get(handlers::sales::get_quotation).put(handlers::sales::update_quotation),
        )
        .route(
            "/quotations/{id}/export",
            get(handlers::documents::export_quotation_pdf),
        )
        .route(
            "/orders",
            post(handlers::sales::create_order).get(handlers::sales::list_orders),
        )
        .route("/orders/view", get(handlers::sales::view_orders))
        .route("/orders/{id}", get(handlers::sales::get_order));

    // Configuração: listas de valores e esquemas de campos
    let settings_routes = Router::new()
        .route(
            "/settings/{type}",
            get(handlers::settings::get_setting)
                .post(handlers::settings::save_setting)
                .delete(handlers::settings::delete_setting),
        )
        .route(
            "/settings/{type}/{value}",
            delete(handlers::settings::remove_setting_value),
        )
        .route("/forms/{entity}", get(handlers::forms::get_form))
        .route("/forms/{entity}/fields", post(handlers::forms::add_field))
        .route(
            "/forms/{entity}/fields/{id}",
            put(handlers::forms::update_field).delete(handlers::forms::remove_field),
        );

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(crm_routes)
        .merge(sales_routes)
        .merge(settings_routes);

    Router::new()
        .nest("/api", api)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Sobe o servidor no listener já aberto.
pub async fn run(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    let app_state = AppState::new(config).await?;
    let app = create_router(app_state);

    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Ponto de entrada: logging, configuração e listener TCP.
pub async fn start() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let listener = TcpListener::bind(&config.bind_addr).await?;

    run(listener, config).await
}
