// src/services/person_service.rs

use bcrypt::hash;
use chrono::Utc;

use crate::{
    common::{dates, error::AppError, id::DocumentId, pagination::Page, tax_id::validate_cpf},
    db::PersonRepository,
    models::person::{Person, PersonFilter, PersonPayload, PersonUpdate},
};

fn ensure_valid_cpf(cpf: &str) -> Result<(), AppError> {
    if !validate_cpf(cpf) {
        return Err(AppError::invalid("Bad Request", format!("CPF {} is invalid", cpf)));
    }
    Ok(())
}

// bcrypt é caro: roda fora do executor
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, cost))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[derive(Clone)]
pub struct PersonService {
    repo: PersonRepository,
    bcrypt_cost: u32,
}

impl PersonService {
    pub fn new(repo: PersonRepository, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    /// Uma consulta só; colisão de CPF é reportada antes da de e-mail.
    pub async fn enforce_person_uniqueness(
        &self,
        email: &str,
        cpf: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<(), AppError> {
        let Some(other) = self.repo.find_by_email_or_cpf(email, cpf, exclude_id).await? else {
            return Ok(());
        };

        if other.cpf == cpf {
            return Err(AppError::conflict("Conflict", format!("CPF {} already in use", cpf)));
        }
        Err(AppError::conflict("Conflict", format!("Email {} already in use", email)))
    }

    pub async fn create(&self, payload: PersonPayload) -> Result<Person, AppError> {
        let birth = dates::ensure_adult(&payload.data_nascimento, dates::today())?;
        ensure_valid_cpf(&payload.cpf)?;
        self.enforce_person_uniqueness(&payload.email, &payload.cpf, None)
            .await?;

        let person = Person {
            id: DocumentId::generate(),
            nome: payload.nome,
            cpf: payload.cpf,
            data_nascimento: birth,
            email: payload.email,
            senha: hash_password(payload.senha, self.bcrypt_cost).await?,
            habilitado: payload.habilitado,
            data_criacao: Utc::now(),
        };

        let created = self.repo.create(&person).await?;
        tracing::info!("Pessoa {} cadastrada", created.id);
        Ok(created)
    }

    pub async fn list(&self, filter: &PersonFilter) -> Result<Page<Person>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Person, AppError> {
        let id = DocumentId::parse(id, "id")?;
        self.find(&id).await
    }

    pub async fn update(&self, id: &str, update: PersonUpdate) -> Result<Person, AppError> {
        let id = DocumentId::parse(id, "id")?;
        let mut person = self.find(&id).await?;
        if update.is_empty() {
            return Err(AppError::MissingBody);
        }

        let identity_changed = update.cpf.is_some() || update.email.is_some();

        if let Some(raw) = &update.data_nascimento {
            person.data_nascimento = dates::ensure_adult(raw, dates::today())?;
        }
        if let Some(cpf) = update.cpf {
            ensure_valid_cpf(&cpf)?;
            person.cpf = cpf;
        }
        if let Some(email) = update.email {
            person.email = email;
        }
        if identity_changed {
            self.enforce_person_uniqueness(&person.email, &person.cpf, Some(&id))
                .await?;
        }

        if let Some(nome) = update.nome {
            person.nome = nome;
        }
        if let Some(senha) = update.senha {
            person.senha = hash_password(senha, self.bcrypt_cost).await?;
        }
        if let Some(habilitado) = update.habilitado {
            person.habilitado = habilitado;
        }

        self.repo
            .update(&person)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = DocumentId::parse(id, "id")?;
        if !self.repo.delete(&id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!("Pessoa {} removida", id);
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> Result<Person, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}
