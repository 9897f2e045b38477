// src/db/user_repo.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::DocumentStore,
    models::{
        auth::User,
        record::{Entity, Record},
    },
};

// O repositório de usuários. O e-mail (minúsculo) é a chave única do documento.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Record<User>>, AppError> {
        self.store
            .find_by_key(User::COLLECTION, &email.trim().to_lowercase())
            .await?
            .map(Record::from_document)
            .transpose()
    }

    // Não há índice por username; a coleção de usuários é pequena
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Record<User>>, AppError> {
        let wanted = username.trim();
        for doc in self.store.list(User::COLLECTION).await? {
            let user = Record::<User>::from_document(doc)?;
            if user.data.username.eq_ignore_ascii_case(wanted) {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<User>>, AppError> {
        self.store
            .get(User::COLLECTION, id)
            .await?
            .map(Record::from_document)
            .transpose()
    }

    // Cria um novo usuário, com erro específico para e-mails duplicados
    pub async fn create_user(&self, user: &User) -> Result<Record<User>, AppError> {
        let key = user.email.trim().to_lowercase();
        let body = serde_json::to_value(user)?;

        let doc = self
            .store
            .insert(User::COLLECTION, Some(&key), body)
            .await
            .map_err(|e| match e {
                AppError::UniqueConstraintViolation(_) => AppError::EmailAlreadyExists,
                other => other,
            })?;

        Record::from_document(doc)
    }
}
