// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn router(app_state: AppState) -> Router {
    let car_routes = Router::new()
        .route(
            "/car",
            post(handlers::car::create_car).get(handlers::car::list_cars),
        )
        .route(
            "/car/{id}",
            get(handlers::car::get_car)
                .put(handlers::car::update_car)
                .patch(handlers::car::patch_car)
                .delete(handlers::car::delete_car),
        );

    let people_routes = Router::new()
        .route(
            "/people",
            post(handlers::person::create_person).get(handlers::person::list_people),
        )
        .route(
            "/people/{id}",
            get(handlers::person::get_person)
                .put(handlers::person::update_person)
                .delete(handlers::person::delete_person),
        );

    let rental_routes = Router::new()
        .route(
            "/rental",
            post(handlers::rental::create_rental).get(handlers::rental::list_rentals),
        )
        .route(
            "/rental/{id}",
            get(handlers::rental::get_rental)
                .put(handlers::rental::update_rental)
                .delete(handlers::rental::delete_rental),
        )
        .route(
            "/rental/{id}/fleet",
            post(handlers::fleet::create_fleet).get(handlers::fleet::list_fleet),
        )
        .route(
            "/rental/{id}/fleet/{idFleet}",
            get(handlers::fleet::get_fleet)
                .put(handlers::fleet::update_fleet)
                .delete(handlers::fleet::delete_fleet),
        );

    // Reservas exigem o token
    let reserve_routes = Router::new()
        .route(
            "/rental/{id}/reserve",
            post(handlers::reserve::create_reserve).get(handlers::reserve::list_reserves),
        )
        .route(
            "/rental/{id}/reserve/{idReserve}",
            get(handlers::reserve::get_reserve)
                .put(handlers::reserve::update_reserve)
                .delete(handlers::reserve::delete_reserve),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/authenticate", post(handlers::auth::authenticate))
        .merge(car_routes)
        .merge(people_routes)
        .merge(rental_routes)
        .merge(reserve_routes);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
