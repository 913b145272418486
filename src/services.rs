pub mod auth;
pub mod car_service;
pub mod cep_service;
pub mod fleet_service;
pub mod person_service;
pub mod rental_service;
pub mod reserve_service;
