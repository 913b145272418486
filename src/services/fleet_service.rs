// src/services/fleet_service.rs

use chrono::Utc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{CarRepository, FleetRepository, RentalRepository},
    models::fleet::{FleetFilter, FleetPayload, RentalFleet},
};

#[derive(Clone)]
pub struct FleetService {
    repo: FleetRepository,
    rentals: RentalRepository,
    cars: CarRepository,
}

impl FleetService {
    pub fn new(repo: FleetRepository, rentals: RentalRepository, cars: CarRepository) -> Self {
        Self {
            repo,
            rentals,
            cars,
        }
    }

    pub async fn enforce_plate_uniqueness(
        &self,
        placa: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<(), AppError> {
        if self.repo.find_by_plate(placa, exclude_id).await?.is_some() {
            return Err(AppError::conflict("Conflict", format!("Plate {} already in use", placa)));
        }
        Ok(())
    }

    pub async fn create(&self, rental_id: &str, payload: FleetPayload) -> Result<RentalFleet, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let car_id = self.ensure_car(&payload.id_carro).await?;
        self.enforce_plate_uniqueness(&payload.placa, None).await?;

        let now = Utc::now();
        let entry = RentalFleet {
            id: DocumentId::generate(),
            id_carro: car_id,
            id_locadora: rental_id,
            status: payload.status,
            placa: payload.placa,
            valor_diaria: payload.valor_diaria,
            data_criacao: now,
            data_atualizacao: now,
        };

        let created = self.repo.create(&entry).await?;
        tracing::info!(
            "Carro {} adicionado à frota da locadora {}",
            created.id_carro,
            created.id_locadora
        );
        Ok(created)
    }

    pub async fn list(&self, rental_id: &str, filter: &FleetFilter) -> Result<Page<RentalFleet>, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        self.repo.list(&rental_id, filter).await
    }

    pub async fn get(&self, rental_id: &str, id: &str) -> Result<RentalFleet, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idFleet")?;
        self.find(&rental_id, &id).await
    }

    pub async fn update(
        &self,
        rental_id: &str,
        id: &str,
        payload: FleetPayload,
    ) -> Result<RentalFleet, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idFleet")?;
        let current = self.find(&rental_id, &id).await?;
        let car_id = self.ensure_car(&payload.id_carro).await?;
        self.enforce_plate_uniqueness(&payload.placa, Some(&id)).await?;

        let entry = RentalFleet {
            id_carro: car_id,
            status: payload.status,
            placa: payload.placa,
            valor_diaria: payload.valor_diaria,
            data_atualizacao: Utc::now(),
            ..current
        };

        self.repo
            .update(&entry)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, rental_id: &str, id: &str) -> Result<(), AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idFleet")?;
        self.find(&rental_id, &id).await?;
        self.repo.delete(&id).await?;
        tracing::info!("Item {} removido da frota da locadora {}", id, rental_id);
        Ok(())
    }

    async fn ensure_rental(&self, raw: &str) -> Result<DocumentId, AppError> {
        let id = DocumentId::parse(raw, "id")?;
        match self.rentals.find_by_id(&id).await? {
            Some(_) => Ok(id),
            None => Err(AppError::NotFound(id.to_string())),
        }
    }

    async fn ensure_car(&self, raw: &str) -> Result<DocumentId, AppError> {
        let id = DocumentId::parse(raw, "id_carro")?;
        match self.cars.find_by_id(&id).await? {
            Some(_) => Ok(id),
            None => Err(AppError::NotFound(id.to_string())),
        }
    }

    async fn find(&self, rental_id: &DocumentId, id: &DocumentId) -> Result<RentalFleet, AppError> {
        self.repo
            .find_in_rental(rental_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }
}
