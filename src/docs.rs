// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::authenticate,

        // --- Cars ---
        handlers::car::create_car,
        handlers::car::list_cars,
        handlers::car::get_car,
        handlers::car::update_car,
        handlers::car::patch_car,
        handlers::car::delete_car,

        // --- People ---
        handlers::person::create_person,
        handlers::person::list_people,
        handlers::person::get_person,
        handlers::person::update_person,
        handlers::person::delete_person,

        // --- Rentals ---
        handlers::rental::create_rental,
        handlers::rental::list_rentals,
        handlers::rental::get_rental,
        handlers::rental::update_rental,
        handlers::rental::delete_rental,

        // --- Fleet ---
        handlers::fleet::create_fleet,
        handlers::fleet::list_fleet,
        handlers::fleet::get_fleet,
        handlers::fleet::update_fleet,
        handlers::fleet::delete_fleet,

        // --- Reserves ---
        handlers::reserve::create_reserve,
        handlers::reserve::list_reserves,
        handlers::reserve::get_reserve,
        handlers::reserve::update_reserve,
        handlers::reserve::delete_reserve,
    ),
    components(
        schemas(
            models::auth::AuthenticatePayload,

            models::car::Accessory,
            models::car::Car,
            models::car::CarPayload,
            models::car::CarPatch,

            models::person::Habilitado,
            models::person::PersonResponse,
            models::person::PersonPayload,
            models::person::PersonUpdate,

            models::rental::Address,
            models::rental::AddressPayload,
            models::rental::Rental,
            models::rental::RentalPayload,

            models::fleet::FleetStatus,
            models::fleet::RentalFleet,
            models::fleet::FleetPayload,

            models::reserve::Reserve,
            models::reserve::ReservePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Cars", description = "Cadastro de Veículos"),
        (name = "People", description = "Cadastro de Pessoas"),
        (name = "Rentals", description = "Cadastro de Locadoras"),
        (name = "Fleet", description = "Frota de cada Locadora"),
        (name = "Reserves", description = "Reservas de Veículos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/car",
            "/api/v1/car/{id}",
            "/api/v1/people/{id}",
            "/api/v1/rental/{id}/fleet/{idFleet}",
            "/api/v1/rental/{id}/reserve",
            "/api/v1/authenticate",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {path}");
        }
    }
}
