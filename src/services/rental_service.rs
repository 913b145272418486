// src/services/rental_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page, tax_id::validate_cnpj},
    db::RentalRepository,
    models::rental::{Address, AddressPayload, Rental, RentalFilter, RentalPayload},
    services::cep_service::PostalCodeLookup,
};

/// No máximo um endereço com `isFilial == false`. Nenhum também é aceito.
pub fn enforce_single_headquarters(addresses: &[AddressPayload]) -> Result<(), AppError> {
    let headquarters = addresses.iter().filter(|a| !a.is_filial).count();
    if headquarters > 1 {
        return Err(AppError::conflict(
            "invalid",
            "isFilial has more than one headquarters",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RentalService {
    repo: RentalRepository,
    postal_codes: Arc<dyn PostalCodeLookup>,
}

impl RentalService {
    pub fn new(repo: RentalRepository, postal_codes: Arc<dyn PostalCodeLookup>) -> Self {
        Self { repo, postal_codes }
    }

    pub async fn enforce_rental_uniqueness(
        &self,
        cnpj: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<(), AppError> {
        if self.repo.find_by_cnpj(cnpj, exclude_id).await?.is_some() {
            return Err(AppError::conflict("Conflict", format!("CNPJ {} already in use", cnpj)));
        }
        Ok(())
    }

    pub async fn create(&self, payload: RentalPayload) -> Result<Rental, AppError> {
        self.check_rules(&payload, None).await?;

        let rental = Rental {
            id: DocumentId::generate(),
            endereco: self.resolve_addresses(&payload.endereco).await?,
            nome: payload.nome,
            cnpj: payload.cnpj,
            atividades: payload.atividades,
            data_criacao: Utc::now(),
        };

        let created = self.repo.create(&rental).await?;
        tracing::info!("Locadora {} cadastrada", created.id);
        Ok(created)
    }

    pub async fn list(&self, filter: &RentalFilter) -> Result<Page<Rental>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Rental, AppError> {
        let id = DocumentId::parse(id, "id")?;
        self.find(&id).await
    }

    pub async fn update(&self, id: &str, payload: RentalPayload) -> Result<Rental, AppError> {
        let id = DocumentId::parse(id, "id")?;
        let current = self.find(&id).await?;
        self.check_rules(&payload, Some(&id)).await?;

        let rental = Rental {
            endereco: self.resolve_addresses(&payload.endereco).await?,
            nome: payload.nome,
            cnpj: payload.cnpj,
            atividades: payload.atividades,
            ..current
        };

        self.repo
            .update(&rental)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = DocumentId::parse(id, "id")?;
        if !self.repo.delete(&id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!("Locadora {} removida", id);
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> Result<Rental, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    // Checksum -> unicidade -> matriz única, nessa ordem
    async fn check_rules(
        &self,
        payload: &RentalPayload,
        exclude_id: Option<&DocumentId>,
    ) -> Result<(), AppError> {
        if !validate_cnpj(&payload.cnpj) {
            return Err(AppError::conflict(
                "invalid",
                format!("CNPJ {} is invalid", payload.cnpj),
            ));
        }
        self.enforce_rental_uniqueness(&payload.cnpj, exclude_id)
            .await?;
        enforce_single_headquarters(&payload.endereco)
    }

    async fn resolve_addresses(&self, addresses: &[AddressPayload]) -> Result<Vec<Address>, AppError> {
        let mut resolved = Vec::with_capacity(addresses.len());
        for payload in addresses {
            let found = self.postal_codes.lookup(&payload.cep).await?;
            let complemento = payload
                .complemento
                .clone()
                .or_else(|| Some(found.complemento).filter(|c| !c.is_empty()));

            resolved.push(Address {
                cep: payload.cep.clone(),
                logradouro: found.logradouro,
                complemento,
                bairro: found.bairro,
                number: payload.number.clone(),
                localidade: found.localidade,
                uf: found.uf,
                is_filial: payload.is_filial,
            });
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(is_filial: bool) -> AddressPayload {
        AddressPayload {
            cep: "96200-200".into(),
            number: "1234".into(),
            complemento: None,
            is_filial,
        }
    }

    #[test]
    fn two_headquarters_are_rejected() {
        let err = enforce_single_headquarters(&[address(false), address(true), address(false)])
            .unwrap_err();
        assert_eq!(err.to_string(), "isFilial has more than one headquarters");
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
    }

    #[test]
    fn one_or_zero_headquarters_are_accepted() {
        assert!(enforce_single_headquarters(&[address(false), address(true)]).is_ok());
        assert!(enforce_single_headquarters(&[address(true), address(true)]).is_ok());
    }
}
