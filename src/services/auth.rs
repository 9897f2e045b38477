// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::trimmed},
    db::UserRepository,
    models::{
        auth::{Claims, LoginUserPayload, RegisterUserPayload, User},
        record::Record,
    },
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn register_user(&self, payload: RegisterUserPayload) -> Result<Record<User>, AppError> {
        payload.validate()?;

        // Hashing fora do runtime assíncrono
        let password = payload.password;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = User {
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            address: trimmed(payload.address),
            state: trimmed(payload.state),
            password_hash,
        };

        let record = self.user_repo.create_user(&user).await?;
        tracing::info!(user_id = %record.id, "usuário registrado");
        Ok(record)
    }

    /// Aceita e-mail ou nome de usuário. Usuário inexistente e senha errada
    /// respondem igual.
    pub async fn login_user(
        &self,
        payload: LoginUserPayload,
    ) -> Result<(Record<User>, String), AppError> {
        let email = trimmed(payload.email);
        let username = trimmed(payload.username);
        if (email.is_none() && username.is_none()) || payload.password.is_empty() {
            return Err(AppError::MissingCredentials);
        }

        let user = match (email, username) {
            (Some(email), _) => self.user_repo.find_by_email(&email).await?,
            (None, Some(username)) => self.user_repo.find_by_username(&username).await?,
            (None, None) => None,
        }
        .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = user.data.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok((user, token))
    }

    pub async fn validate_token(&self, token: &str) -> Result<Record<User>, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Token de usuário que não existe mais é tratado como inválido
        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::MemoryStore;

    fn service() -> AuthService {
        let repo = UserRepository::new(Arc::new(MemoryStore::new()));
        AuthService::new(repo, "test-secret".to_string())
    }

    fn register(email: &str) -> RegisterUserPayload {
        RegisterUserPayload {
            username: "maria".into(),
            email: email.into(),
            address: None,
            state: None,
            password: "segredo123".into(),
        }
    }

    #[tokio::test]
    async fn password_is_stored_hashed_and_verified() {
        let auth = service();
        let user = auth.register_user(register("Maria@Email.com")).await.unwrap();
        assert_ne!(user.data.password_hash, "segredo123");
        assert_eq!(user.data.email, "maria@email.com");

        let login = LoginUserPayload {
            username: Some("MARIA".into()),
            email: None,
            password: "segredo123".into(),
        };
        let (logged, token) = auth.login_user(login).await.unwrap();
        assert_eq!(logged.id, user.id);
        assert_eq!(auth.validate_token(&token).await.unwrap().id, user.id);

        let wrong = LoginUserPayload {
            username: None,
            email: Some("maria@email.com".into()),
            password: "errada".into(),
        };
        assert!(matches!(auth.login_user(wrong).await, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let auth = service();
        auth.register_user(register("a@b.com")).await.unwrap();
        let err = auth.register_user(register("A@B.com")).await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn garbage_tokens_are_rejected() {
        let auth = service();
        assert!(matches!(auth.validate_token("abc").await, Err(AppError::InvalidToken)));
    }
}
