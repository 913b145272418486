// src/services/reserve_service.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{dates, error::AppError, id::DocumentId, pagination::Page},
    db::{FleetRepository, RentalRepository, ReserveRepository},
    models::{
        fleet::{FleetStatus, RentalFleet},
        person::{Habilitado, Person},
        reserve::{Reserve, ReserveFilter, ReservePayload},
    },
};

/// Diária × dias do período, contando o primeiro e o último.
pub fn final_price(daily_rate: Decimal, start: NaiveDate, end: NaiveDate) -> Decimal {
    let days = (end - start).num_days() + 1;
    daily_rate * Decimal::from(days)
}

fn parse_period(payload: &ReservePayload) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = dates::parse_date(&payload.data_inicio)
        .ok_or_else(|| AppError::InvalidField("data_inicio".into()))?;
    let end = dates::parse_date(&payload.data_fim)
        .ok_or_else(|| AppError::InvalidField("data_fim".into()))?;
    if end < start {
        return Err(AppError::InvalidField("data_fim".into()));
    }
    Ok((start, end))
}

#[derive(Clone)]
pub struct ReserveService {
    repo: ReserveRepository,
    rentals: RentalRepository,
    fleet: FleetRepository,
}

impl ReserveService {
    pub fn new(repo: ReserveRepository, rentals: RentalRepository, fleet: FleetRepository) -> Self {
        Self {
            repo,
            rentals,
            fleet,
        }
    }

    pub async fn create(
        &self,
        rental_id: &str,
        user: &Person,
        payload: ReservePayload,
    ) -> Result<Reserve, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let (start, end) = parse_period(&payload)?;
        let car_id = DocumentId::parse(&payload.id_carro, "id_carro")?;
        let entry = self
            .check_booking(&rental_id, user, &car_id, start, end, None)
            .await?;

        let reserve = Reserve {
            id: DocumentId::generate(),
            id_user: user.id.clone(),
            id_carro: car_id,
            id_locadora: rental_id,
            data_inicio: start,
            data_fim: end,
            valor_final: final_price(entry.valor_diaria, start, end),
            data_criacao: Utc::now(),
        };

        let created = self.repo.create(&reserve).await?;
        tracing::info!(
            "Reserva {} criada para o carro {} ({} a {})",
            created.id,
            created.id_carro,
            payload.data_inicio,
            payload.data_fim
        );
        Ok(created)
    }

    pub async fn list(&self, rental_id: &str, filter: &ReserveFilter) -> Result<Page<Reserve>, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        self.repo.list(&rental_id, filter).await
    }

    pub async fn get(&self, rental_id: &str, id: &str) -> Result<Reserve, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idReserve")?;
        self.find(&rental_id, &id).await
    }

    pub async fn update(
        &self,
        rental_id: &str,
        id: &str,
        user: &Person,
        payload: ReservePayload,
    ) -> Result<Reserve, AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idReserve")?;
        let current = self.find_owned(&rental_id, &id, user).await?;
        let (start, end) = parse_period(&payload)?;
        let car_id = DocumentId::parse(&payload.id_carro, "id_carro")?;
        let entry = self
            .check_booking(&rental_id, user, &car_id, start, end, Some(&id))
            .await?;

        let reserve = Reserve {
            id_carro: car_id,
            data_inicio: start,
            data_fim: end,
            valor_final: final_price(entry.valor_diaria, start, end),
            ..current
        };

        self.repo
            .update(&reserve)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, rental_id: &str, id: &str, user: &Person) -> Result<(), AppError> {
        let rental_id = self.ensure_rental(rental_id).await?;
        let id = DocumentId::parse(id, "idReserve")?;
        self.find_owned(&rental_id, &id, user).await?;
        self.repo.delete(&id).await?;
        tracing::info!("Reserva {} removida", id);
        Ok(())
    }

    // Habilitação -> carro na frota e disponível -> conflito do carro -> conflito do usuário
    async fn check_booking(
        &self,
        rental_id: &DocumentId,
        user: &Person,
        car_id: &DocumentId,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&DocumentId>,
    ) -> Result<RentalFleet, AppError> {
        if user.habilitado != Habilitado::Sim {
            return Err(AppError::invalid("Bad Request", "User is not qualified to rent"));
        }

        let entry = self
            .fleet
            .find_by_car(rental_id, car_id)
            .await?
            .ok_or_else(|| AppError::NotFound(car_id.to_string()))?;
        if entry.status != FleetStatus::Disponivel {
            return Err(AppError::invalid(
                "Bad Request",
                format!("Car {} is not available", car_id),
            ));
        }

        let car_reserves = self.repo.find_by_car(rental_id, car_id, exclude_id).await?;
        if car_reserves.iter().any(|r| r.overlaps(start, end)) {
            return Err(AppError::conflict(
                "Conflict",
                format!("Car {} is already reserved in this period", car_id),
            ));
        }

        let user_reserves = self.repo.find_by_user(&user.id, exclude_id).await?;
        if user_reserves.iter().any(|r| r.overlaps(start, end)) {
            return Err(AppError::conflict(
                "Conflict",
                "User already has a reserve in this period",
            ));
        }

        Ok(entry)
    }

    async fn ensure_rental(&self, raw: &str) -> Result<DocumentId, AppError> {
        let id = DocumentId::parse(raw, "id")?;
        match self.rentals.find_by_id(&id).await? {
            Some(_) => Ok(id),
            None => Err(AppError::NotFound(id.to_string())),
        }
    }

    async fn find(&self, rental_id: &DocumentId, id: &DocumentId) -> Result<Reserve, AppError> {
        self.repo
            .find_in_rental(rental_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Reserva de outra pessoa é tratada como inexistente.
    async fn find_owned(
        &self,
        rental_id: &DocumentId,
        id: &DocumentId,
        user: &Person,
    ) -> Result<Reserve, AppError> {
        let reserve = self.find(rental_id, id).await?;
        if reserve.id_user != user.id {
            return Err(AppError::NotFound(id.to_string()));
        }
        Ok(reserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 11, d).unwrap()
    }

    #[test]
    fn price_counts_both_ends() {
        let rate = Decimal::from_str("150.50").unwrap();
        assert_eq!(final_price(rate, day(20), day(23)), Decimal::from_str("602.00").unwrap());
        assert_eq!(final_price(rate, day(20), day(20)), rate);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let payload = ReservePayload {
            id_carro: "6171508962f47a7a91938d30".into(),
            data_inicio: "23/11/2021".into(),
            data_fim: "20/11/2021".into(),
        };
        let err = parse_period(&payload).unwrap_err();
        assert_eq!(err.to_string(), "Field 'data_fim' is outside the standard format");
    }
}
