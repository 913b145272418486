mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::*;

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let app = app();
    let created = post(&app, "/api/v1/car", car_payload()).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let id = created.body["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert!(created.body["dataCriacao"].is_string());

    let fetched = get(&app, &format!("/api/v1/car/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["modelo"], "GM S10 2.8");
    assert_eq!(fetched.body["cor"], "Verde");
    assert_eq!(fetched.body["ano"], 2021);
    assert_eq!(fetched.body["quantidadePassageiros"], 5);
    assert_eq!(fetched.body["acessorios"], car_payload()["acessorios"]);
}

#[tokio::test]
async fn duplicate_accessories_are_collapsed() {
    let app = app();
    let mut payload = car_payload();
    payload["acessorios"] = json!([
        { "descricao": "Ar-condicionado" },
        { "descricao": "Som" },
        { "descricao": "Ar-condicionado" }
    ]);

    let created = post(&app, "/api/v1/car", payload).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.body["acessorios"],
        json!([{ "descricao": "Ar-condicionado" }, { "descricao": "Som" }])
    );
}

#[tokio::test]
async fn year_bounds_are_inclusive() {
    let app = app();
    for year in [1950, 2022] {
        let mut payload = car_payload();
        payload["ano"] = json!(year);
        assert_eq!(post(&app, "/api/v1/car", payload).await.status, StatusCode::CREATED);
    }

    let mut payload = car_payload();
    payload["ano"] = json!(2023);
    let response = post(&app, "/api/v1/car", payload).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"], "ValidationError");
    assert_eq!(messages(&response.body), vec!["\"ano\" must be less than or equal to 2022"]);

    let mut payload = car_payload();
    payload["ano"] = json!(1949);
    let response = post(&app, "/api/v1/car", payload).await;
    assert_eq!(messages(&response.body), vec!["\"ano\" must be greater than or equal to 1950"]);
}

#[tokio::test]
async fn every_missing_field_is_reported() {
    let app = app();
    let response = post(&app, "/api/v1/car", json!({ "cor": "Azul", "acessorios": [] })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&response.body),
        vec![
            "\"modelo\" is required",
            "\"ano\" is required",
            "\"acessorios\" must contain at least 1 items",
            "\"quantidadePassageiros\" is required",
        ]
    );
    assert_eq!(response.body["details"][0]["field"], "modelo");
    assert_eq!(response.body["details"][0]["type"], "any.required");
}

#[tokio::test]
async fn malformed_id_is_rejected_before_lookup() {
    let app = app();
    let response = get(&app, "/api/v1/car/12").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Field 'id' is outside the standard format");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app();
    let response = get(&app, "/api/v1/car/6171508962f47a7a91938d30").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Value 6171508962f47a7a91938d30 not found");

    let response = delete(&app, "/api/v1/car/6171508962f47a7a91938d30").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_filters_by_accessory_and_model() {
    let app = app();
    post(&app, "/api/v1/car", car_payload()).await;

    let mut other = car_payload();
    other["modelo"] = json!("Fiat Uno");
    other["acessorios"] = json!([{ "descricao": "Som" }]);
    post(&app, "/api/v1/car", other).await;

    let by_accessory = get(&app, "/api/v1/car?descricao=Ar-condicionado").await;
    assert_eq!(by_accessory.status, StatusCode::OK);
    assert_eq!(by_accessory.body["total"], 1);
    let cars = by_accessory.body["veiculos"].as_array().unwrap();
    assert_eq!(cars[0]["modelo"], "GM S10 2.8");
    // A lista completa de acessórios volta, não só o que casou
    assert_eq!(cars[0]["acessorios"].as_array().unwrap().len(), 2);

    let by_model = get(&app, "/api/v1/car?modelo=Fiat%20Uno").await;
    assert_eq!(by_model.body["total"], 1);
    assert_eq!(by_model.body["veiculos"][0]["modelo"], "Fiat Uno");

    let everything = get(&app, "/api/v1/car").await;
    assert_eq!(everything.body["total"], 2);
    assert_eq!(everything.body["limit"], 10);
    assert_eq!(everything.body["offset"], 0);
    assert_eq!(everything.body["offsets"], 1);
}

#[tokio::test]
async fn pagination_window() {
    let app = app();
    for _ in 0..3 {
        post(&app, "/api/v1/car", car_payload()).await;
    }

    let page = get(&app, "/api/v1/car?limit=2&offset=2").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["veiculos"].as_array().unwrap().len(), 1);
    assert_eq!(page.body["total"], 3);
    assert_eq!(page.body["offsets"], 2);

    let aliased = get(&app, "/api/v1/car?size=1&start=0").await;
    assert_eq!(aliased.body["limit"], 1);
    assert_eq!(aliased.body["offsets"], 3);

    let invalid = get(&app, "/api/v1/car?limit=0").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_patch_and_delete() {
    let app = app();
    let created = post(&app, "/api/v1/car", car_payload()).await;
    let id = created.body["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/car/{id}");

    let mut replacement = car_payload();
    replacement["cor"] = json!("Preto");
    let updated = put(&app, &uri, replacement).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["cor"], "Preto");
    assert_eq!(updated.body["dataCriacao"], created.body["dataCriacao"]);

    let patched = send(&app, Method::PATCH, &uri, Some(json!({ "ano": 2010 })), None).await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["ano"], 2010);
    assert_eq!(patched.body["cor"], "Preto");

    let empty = send(&app, Method::PATCH, &uri, Some(json!({})), None).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["message"], "Request body is incomplete");

    assert_eq!(delete(&app, &uri).await.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn passenger_count_beyond_range_is_a_validation_error() {
    let app = app();
    let mut payload = car_payload();
    payload["quantidadePassageiros"] = json!(10_000_000_000u64);
    let response = post(&app, "/api/v1/car", payload).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"], "ValidationError");
    assert_eq!(
        messages(&response.body),
        vec!["\"quantidadePassageiros\" must be less than or equal to 4294967295"]
    );

    let listed = get(&app, "/api/v1/car?quantidadePassageiros=10000000000").await;
    assert_eq!(listed.status, StatusCode::BAD_REQUEST);
    assert_eq!(listed.body["name"], "ValidationError");
}
