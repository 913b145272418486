// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;

use crate::{
    db::{
        CarRepository, DocumentStore, FleetRepository, MemoryDocumentStore, PersonRepository,
        PgDocumentStore, RentalRepository, ReserveRepository,
    },
    services::{
        auth::AuthService,
        car_service::CarService,
        cep_service::{PostalCodeLookup, ViaCepClient},
        fleet_service::FleetService,
        person_service::PersonService,
        rental_service::RentalService,
        reserve_service::ReserveService,
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CEP_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_JWT_TTL_SECS: i64 = 86_400;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, Clone)]
pub struct Config {
    /// Sem `DATABASE_URL` a API sobe com o banco em memória.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub cep_base_url: String,
    pub jwt_ttl_secs: i64,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} com valor inválido: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            cep_base_url: env::var("CEP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CEP_BASE_URL.to_string()),
            jwt_ttl_secs: parse_var("JWT_TTL_SECS", DEFAULT_JWT_TTL_SECS)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            bcrypt_cost: parse_var("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub car_service: CarService,
    pub person_service: PersonService,
    pub rental_service: RentalService,
    pub fleet_service: FleetService,
    pub reserve_service: ReserveService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.database_url {
            Some(url) => {
                let store = PgDocumentStore::connect(url, config.db_max_connections)
                    .await
                    .context("Falha ao conectar no banco de dados")?;

                store
                    .migrate()
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL não definida: usando banco em memória");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        let postal_codes = Arc::new(ViaCepClient::new(config.cep_base_url.clone()));
        Ok(Self::from_parts(config, store, postal_codes))
    }

    /// Monta o gráfico de dependências sobre um banco e uma consulta de CEP já prontos.
    pub fn from_parts(
        config: Config,
        store: Arc<dyn DocumentStore>,
        postal_codes: Arc<dyn PostalCodeLookup>,
    ) -> Self {
        let cars = CarRepository::new(store.clone());
        let people = PersonRepository::new(store.clone());
        let rentals = RentalRepository::new(store.clone());
        let fleet = FleetRepository::new(store.clone());
        let reserves = ReserveRepository::new(store);

        Self {
            car_service: CarService::new(cars.clone()),
            person_service: PersonService::new(people.clone(), config.bcrypt_cost),
            rental_service: RentalService::new(rentals.clone(), postal_codes),
            fleet_service: FleetService::new(fleet.clone(), rentals.clone(), cars),
            reserve_service: ReserveService::new(reserves, rentals, fleet),
            auth_service: AuthService::new(people, config.jwt_secret.clone(), config.jwt_ttl_secs),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_keeps_the_loaded_config() {
        let config = Config {
            database_url: None,
            jwt_secret: "segredo".into(),
            bind_addr: "127.0.0.1:4000".into(),
            cep_base_url: DEFAULT_CEP_BASE_URL.into(),
            jwt_ttl_secs: DEFAULT_JWT_TTL_SECS,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            bcrypt_cost: 4,
        };
        let state = AppState::from_parts(
            config,
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(ViaCepClient::new(DEFAULT_CEP_BASE_URL.to_string())),
        );
        assert_eq!(state.config.bind_addr, "127.0.0.1:4000");
        assert_eq!(state.config.bcrypt_cost, 4);
    }
}
