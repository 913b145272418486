mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn create_hides_the_password() {
    let app = app();
    let response = post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.get("senha").is_none());
    assert_eq!(response.body["data_nascimento"], "03/03/2000");
    assert_eq!(response.body["habilitado"], "sim");

    let id = response.body["_id"].as_str().unwrap();
    let fetched = get(&app, &format!("/api/v1/people/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(fetched.body.get("senha").is_none());
}

#[tokio::test]
async fn minors_are_rejected() {
    let app = app();
    let mut payload = person_payload("131.147.860-49", "a@email.com");
    payload["data_nascimento"] = json!("01/01/2020");
    let response = post(&app, "/api/v1/people", payload).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Field 'data_nascimento' is outside the standard format");
}

#[tokio::test]
async fn invalid_cpf_checksum_is_rejected() {
    let app = app();
    let response = post(&app, "/api/v1/people", person_payload("131.147.860-48", "a@email.com")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"], "Bad Request");
    assert_eq!(response.body["message"], "CPF 131.147.860-48 is invalid");
}

#[tokio::test]
async fn cpf_and_email_must_be_unique() {
    let app = app();
    let first = post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let same_cpf = post(&app, "/api/v1/people", person_payload("131.147.860-49", "b@email.com")).await;
    assert_eq!(same_cpf.status, StatusCode::CONFLICT);
    assert_eq!(same_cpf.body["message"], "CPF 131.147.860-49 already in use");

    let same_email = post(&app, "/api/v1/people", person_payload("529.982.247-25", "a@email.com")).await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
    assert_eq!(same_email.body["message"], "Email a@email.com already in use");
}

#[tokio::test]
async fn payload_shape_errors_are_collected() {
    let app = app();
    let response = post(
        &app,
        "/api/v1/people",
        json!({
            "nome": "joaozinho",
            "cpf": "13114786049",
            "data_nascimento": "2000-03-03",
            "email": "nao-e-email",
            "senha": "123",
            "habilitado": "talvez"
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let messages = messages(&response.body);
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[1], "\"data_nascimento\" must be in DD/MM/YYYY format");
    assert_eq!(messages[2], "\"email\" must be a valid email");
    assert_eq!(messages[3], "\"senha\" length must be at least 6 characters long");
    assert_eq!(messages[4], "\"habilitado\" must be one of [sim, não]");
}

#[tokio::test]
async fn listing_by_name_returns_every_match() {
    let app = app();
    let people = [
        ("131.147.860-49", "p1@email.com"),
        ("529.982.247-25", "p2@email.com"),
        ("111.444.777-35", "p3@email.com"),
        ("390.533.447-05", "p4@email.com"),
        ("714.602.380-01", "p5@email.com"),
    ];
    for (cpf, email) in people {
        let created = post(&app, "/api/v1/people", person_payload(cpf, email)).await;
        assert_eq!(created.status, StatusCode::CREATED, "{cpf}");
    }

    let response = get(&app, "/api/v1/people?nome=joaozinho%20ciclano").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 5);
    let listed = response.body["pessoas"].as_array().unwrap();
    assert_eq!(listed.len(), 5);
    assert!(listed.iter().all(|p| p.get("senha").is_none()));

    let by_password = get(&app, "/api/v1/people?senha=123456").await;
    assert_eq!(by_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&by_password.body), vec!["\"senha\" is not allowed"]);
}

#[tokio::test]
async fn partial_update() {
    let app = app();
    let created = post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;
    let id = created.body["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/people/{id}");

    let updated = put(&app, &uri, json!({ "habilitado": "não" })).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["habilitado"], "não");
    assert_eq!(updated.body["cpf"], "131.147.860-49");

    // Reenviar o próprio e-mail não é conflito
    let same = put(&app, &uri, json!({ "email": "a@email.com" })).await;
    assert_eq!(same.status, StatusCode::OK);

    let empty = put(&app, &uri, json!({})).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["message"], "Request body is incomplete");

    let bad_id = put(&app, "/api/v1/people/12", json!({ "nome": "x" })).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["message"], "Field 'id' is outside the standard format");

    assert_eq!(delete(&app, &uri).await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn update_cannot_take_another_persons_identity() {
    let app = app();
    post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;
    let other = post(&app, "/api/v1/people", person_payload("529.982.247-25", "b@email.com")).await;
    let uri = format!("/api/v1/people/{}", other.body["_id"].as_str().unwrap());

    let cpf = put(&app, &uri, json!({ "cpf": "131.147.860-49" })).await;
    assert_eq!(cpf.status, StatusCode::CONFLICT);
    assert_eq!(cpf.body["message"], "CPF 131.147.860-49 already in use");

    let email = put(&app, &uri, json!({ "email": "a@email.com" })).await;
    assert_eq!(email.status, StatusCode::CONFLICT);
    assert_eq!(email.body["message"], "Email a@email.com already in use");

    let unchanged = get(&app, &uri).await;
    assert_eq!(unchanged.body["cpf"], "529.982.247-25");
    assert_eq!(unchanged.body["email"], "b@email.com");
}
