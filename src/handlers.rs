pub mod auth;
pub mod car;
pub mod fleet;
pub mod person;
pub mod rental;
pub mod reserve;
