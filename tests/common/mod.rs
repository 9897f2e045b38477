//! Utilitários compartilhados dos testes de integração.
//!
//! `TestApp` sobe o router real numa porta aleatória, com o store em memória,
//! e expõe um cliente `reqwest` apontado para ele.

// Nem todo arquivo de teste usa todos os helpers
#![allow(unused)]

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use crm_backend::{
    config::{AppState, Config},
    create_router,
    db::MemoryStore,
};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state = AppState::with_store(Config::for_tests(), Arc::new(MemoryStore::new()));
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Registra um usuário e devolve o token do login.
    pub async fn register_and_login(&self, username: &str, email: &str) -> Result<String> {
        let response = self
            .post_json(
                "/api/register",
                &json!({
                    "username": username,
                    "email": email,
                    "address": "Rua A, 10",
                    "state": "SP",
                    "password": "segredo123"
                }),
            )
            .await?;
        anyhow::ensure!(response.status() == 201, "register falhou: {}", response.status());

        let response = self
            .post_json("/api/login", &json!({ "email": email, "password": "segredo123" }))
            .await?;
        anyhow::ensure!(response.status() == 200, "login falhou: {}", response.status());

        let body: Value = response.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("login sem token"))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn lead_body(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phone": "11 99999-0000",
        "address": "Rua das Flores, 123",
        "state": "SP",
        "source": "Walk In"
    })
}
