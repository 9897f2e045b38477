pub mod memory_store;
pub mod postgres_store;
pub mod repository;
pub mod settings_repo;
pub mod store;
pub mod user_repo;

pub use memory_store::MemoryStore;
pub use postgres_store::PgDocumentStore;
pub use repository::Repository;
pub use settings_repo::SettingsRepository;
pub use store::{Document, DocumentStore};
pub use user_repo::UserRepository;
