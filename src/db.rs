pub mod store;
pub mod memory;
pub mod postgres;
pub mod repository;

pub mod car_repo;
pub use car_repo::CarRepository;
pub mod person_repo;
pub use person_repo::PersonRepository;
pub mod rental_repo;
pub use rental_repo::RentalRepository;
pub mod fleet_repo;
pub use fleet_repo::FleetRepository;
pub mod reserve_repo;
pub use reserve_repo::ReserveRepository;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::DocumentStore;
