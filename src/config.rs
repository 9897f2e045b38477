// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{DocumentStore, MemoryStore, PgDocumentStore, Repository, SettingsRepository, UserRepository},
    services::{
        auth::AuthService, crm_service::CrmService, document_service::DocumentService,
        followup_service::FollowUpService, form_schema::FormSchemaService,
        sales_service::SalesService, sequence::SequenceIssuer, settings_service::SettingsService,
        todo_service::TodoService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_FONT_FAMILY: &str = "DejaVuSans";
const DEFAULT_COMPANY_NAME: &str = "CRM";
const DEFAULT_CACHE_TTL_SECS: u64 = 30;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    // Sem DATABASE_URL o servidor sobe com o store em memória
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub fonts_dir: PathBuf,
    // Arquivos esperados: <família>-Regular.ttf, -Bold, -Italic, -BoldItalic
    pub font_family: String,
    pub company_name: String,
    pub settings_cache_ttl: Duration,
    pub db_max_connections: u32,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválido ({}): {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            fonts_dir: env::var("FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONTS_DIR)),
            font_family: env::var("FONT_FAMILY").unwrap_or_else(|_| DEFAULT_FONT_FAMILY.to_string()),
            company_name: env::var("COMPANY_NAME")
                .unwrap_or_else(|_| DEFAULT_COMPANY_NAME.to_string()),
            settings_cache_ttl: Duration::from_secs(parse_var(
                "SETTINGS_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    /// Configuração para testes: store em memória, segredo fixo.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            fonts_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fonts"),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            settings_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub settings_service: SettingsService,
    pub form_service: FormSchemaService,
    pub crm_service: CrmService,
    pub followup_service: FollowUpService,
    pub sales_service: SalesService,
    pub document_service: DocumentService,
    pub todo_service: TodoService,
}

impl AppState {
    /// Conecta ao Postgres (e roda as migrações) ou cai para o store em memória.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgDocumentStore::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL não definida: usando store em memória (dados não persistem)");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let settings_service = SettingsService::new(
            SettingsRepository::new(store.clone()),
            config.settings_cache_ttl,
        );
        let form_service = FormSchemaService::new(settings_service.clone());
        let sequences = SequenceIssuer::new(store.clone());

        let auth_service =
            AuthService::new(UserRepository::new(store.clone()), config.jwt_secret.clone());
        let crm_service = CrmService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            form_service.clone(),
        );
        let followup_service = FollowUpService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            Repository::new(store.clone()),
        );
        let sales_service = SalesService::new(
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            Repository::new(store.clone()),
            sequences,
            form_service.clone(),
        );
        let document_service = DocumentService::new(
            sales_service.clone(),
            config.fonts_dir.clone(),
            config.font_family.clone(),
            config.company_name.clone(),
        );
        let todo_service = TodoService::new(Repository::new(store));

        Self {
            config: Arc::new(config),
            i18n_store: Arc::new(I18nStore::default()),
            auth_service,
            settings_service,
            form_service,
            crm_service,
            followup_service,
            sales_service,
            document_service,
            todo_service,
        }
    }
}
