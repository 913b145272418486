// src/services/car_service.rs

use std::collections::HashSet;

use chrono::Utc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::CarRepository,
    models::car::{Accessory, Car, CarFilter, CarPatch, CarPayload},
};

/// Mantém a primeira ocorrência de cada `descricao`, na ordem original.
pub fn deduplicate_accessories(accessories: Vec<Accessory>) -> Vec<Accessory> {
    let mut seen = HashSet::new();
    accessories
        .into_iter()
        .filter(|a| seen.insert(a.descricao.clone()))
        .collect()
}

#[derive(Clone)]
pub struct CarService {
    repo: CarRepository,
}

impl CarService {
    pub fn new(repo: CarRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, payload: CarPayload) -> Result<Car, AppError> {
        let car = Car {
            id: DocumentId::generate(),
            modelo: payload.modelo,
            cor: payload.cor,
            ano: payload.ano,
            acessorios: deduplicate_accessories(payload.acessorios),
            quantidade_passageiros: payload.quantidade_passageiros,
            data_criacao: Utc::now(),
        };

        let created = self.repo.create(&car).await?;
        tracing::info!("Veículo {} cadastrado", created.id);
        Ok(created)
    }

    pub async fn list(&self, filter: &CarFilter) -> Result<Page<Car>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Car, AppError> {
        let id = DocumentId::parse(id, "id")?;
        self.find(&id).await
    }

    pub async fn update(&self, id: &str, payload: CarPayload) -> Result<Car, AppError> {
        let id = DocumentId::parse(id, "id")?;
        let current = self.find(&id).await?;

        let car = Car {
            modelo: payload.modelo,
            cor: payload.cor,
            ano: payload.ano,
            acessorios: deduplicate_accessories(payload.acessorios),
            quantidade_passageiros: payload.quantidade_passageiros,
            ..current
        };
        self.save(car).await
    }

    /// Atualização parcial: só os campos enviados mudam.
    pub async fn patch(&self, id: &str, patch: CarPatch) -> Result<Car, AppError> {
        let id = DocumentId::parse(id, "id")?;
        if patch.is_empty() {
            return Err(AppError::MissingBody);
        }
        let mut car = self.find(&id).await?;

        if let Some(modelo) = patch.modelo {
            car.modelo = modelo;
        }
        if let Some(cor) = patch.cor {
            car.cor = cor;
        }
        if let Some(ano) = patch.ano {
            car.ano = ano;
        }
        if let Some(acessorios) = patch.acessorios {
            car.acessorios = deduplicate_accessories(acessorios);
        }
        if let Some(quantidade) = patch.quantidade_passageiros {
            car.quantidade_passageiros = quantidade;
        }
        self.save(car).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = DocumentId::parse(id, "id")?;
        if !self.repo.delete(&id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!("Veículo {} removido", id);
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> Result<Car, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn save(&self, car: Car) -> Result<Car, AppError> {
        let id = car.id.clone();
        self.repo
            .update(&car)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}
