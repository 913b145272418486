// src/services/auth.rs

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::{error::AppError, id::DocumentId},
    db::PersonRepository,
    models::{auth::Claims, person::Person},
};

#[derive(Clone)]
pub struct AuthService {
    people: PersonRepository,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(people: PersonRepository, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            people,
            jwt_secret,
            token_ttl_secs,
        }
    }

    /// Confere e-mail e senha e devolve um token assinado.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AppError> {
        let person = self
            .people
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = person.senha.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!("Tentativa de login inválida para {}", email);
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&person)
    }

    /// Decodifica o token e carrega a pessoa dona dele.
    pub async fn validate_token(&self, token: &str) -> Result<Person, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let id = DocumentId::parse(&token_data.claims.sub, "sub").map_err(|_| AppError::InvalidToken)?;
        self.people
            .find_by_id(&id)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, person: &Person) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.token_ttl_secs);

        let claims = Claims {
            sub: person.id.to_string(),
            email: person.email.clone(),
            habilitado: person.habilitado,
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
