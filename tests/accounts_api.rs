//! End-to-end tests for the marketplace resources: accounts, produce
//! listings, warehouse requests, and feedback.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use common::test_server;

fn user_payload(email: &str) -> Value {
    json!({
        "name": "Priya Kumar",
        "address": "17 Orchard Road",
        "phone": "0123456789",
        "email": email,
        "role": "farmer"
    })
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn register_list_and_fetch_users() {
    let (server, _mailer) = test_server();

    let response = server
        .post("/register-user")
        .json(&user_payload("priya@example.com"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let all: Vec<Value> = server.get("/get-all-users").await.json();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["email"], "priya@example.com");

    let profile: Value = server.get(&format!("/get-user-profile/{id}")).await.json();
    assert_eq!(profile["role"], "farmer");

    server
        .get(&format!("/get-user-profile/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected() {
    let (server, _mailer) = test_server();
    server
        .post("/register-user")
        .json(&user_payload("priya@example.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/register-user")
        .json(&user_payload("priya@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "DUPLICATE_ERROR");
}

#[tokio::test]
async fn profile_update_carries_id_in_body() {
    let (server, _mailer) = test_server();
    let created: Value = server
        .post("/register-user")
        .json(&user_payload("priya@example.com"))
        .await
        .json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let mut payload = user_payload("priya@example.com");
    payload["id"] = json!(id);
    payload["address"] = json!("5 Paddy Field Way");
    let response = server.put("/update-user-profile").json(&payload).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["address"], "5 Paddy Field Way");

    // missing id is a validation failure, not a crash
    let response = server
        .put("/update-user-profile")
        .json(&user_payload("priya@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["errors"]["id"].is_string());
}

#[tokio::test]
async fn delete_user_then_fetch_is_404() {
    let (server, _mailer) = test_server();
    let created: Value = server
        .post("/register-user")
        .json(&user_payload("priya@example.com"))
        .await
        .json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/delete-user/{id}"))
        .await
        .assert_status_ok();
    server
        .get(&format!("/get-user-profile/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Produce listings
// =============================================================================

#[tokio::test]
async fn product_crud_round_trip() {
    let (server, _mailer) = test_server();

    let response = server
        .post("/create-products")
        .json(&json!({
            "name": "Heirloom Tomatoes",
            "category": "Vegetables",
            "price": 4.2,
            "quantity": 120,
            "productionCost": 2.5,
            "fairProfitMargin": 0.3,
            "farmer": "Priya Kumar"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let listed: Value = server.get("/get-products").await.json();
    assert_eq!(listed["message"], "Products retrieved successfully");
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let response = server
        .put(&format!("/update-products/{id}"))
        .json(&json!({"name": "Heirloom Tomatoes", "productionCost": 2.8, "price": 4.5}))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["data"]["productionCost"], 2.8);

    server
        .delete(&format!("/delete-products/{id}"))
        .await
        .assert_status_ok();
    let listed: Value = server.get("/get-products").await.json();
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_requires_name_and_production_cost() {
    let (server, _mailer) = test_server();
    let response = server
        .post("/create-products")
        .json(&json!({"category": "Vegetables"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["productionCost"].is_string());
}

// =============================================================================
// Warehouse requests
// =============================================================================

fn warehouse_payload() -> Value {
    json!({
        "name": "Green Valley Co-op",
        "address": "4 Silo Street",
        "contactName": "A. Fernando",
        "typeOfGoods": "Grain",
        "storageDuration": "3 months",
        "quantity": "40 tonnes",
        "specialRequirements": "Dry storage",
        "preferredLocation": "North depot",
        "dropOffDate": "2025-02-01",
        "pickUpDate": "2025-05-01"
    })
}

#[tokio::test]
async fn warehouse_request_crud_round_trip() {
    let (server, _mailer) = test_server();

    let response = server
        .post("/request-warehouse")
        .json(&warehouse_payload())
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["message"], "Warehouse request submitted successfully");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let all: Vec<Value> = server.get("/requests").await.json();
    assert_eq!(all.len(), 1);

    let mut payload = warehouse_payload();
    payload["preferredLocation"] = json!("South depot");
    let response = server
        .put(&format!("/update-request/{id}"))
        .json(&payload)
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["data"]["preferredLocation"], "South depot");

    server
        .delete(&format!("/delete-request/{id}"))
        .await
        .assert_status_ok();
    let all: Vec<Value> = server.get("/requests").await.json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn warehouse_request_requires_every_field() {
    let (server, _mailer) = test_server();
    let mut payload = warehouse_payload();
    payload.as_object_mut().unwrap().remove("typeOfGoods");
    payload["pickUpDate"] = json!("next spring");

    let response = server.post("/request-warehouse").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["errors"]["typeOfGoods"].is_string());
    assert_eq!(body["errors"]["pickUpDate"], "must be a valid date");
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn feedback_submit_list_and_average() {
    let (server, _mailer) = test_server();

    for (name, rating) in [("Sam Perera", 4.0), ("Nadia Silva", 5.0)] {
        let response = server
            .post("/feedback")
            .json(&json!({
                "fullName": name,
                "feedback": "Fresh produce, fast delivery",
                "rating": rating
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
    }

    let listed: Value = server.get("/feedback").await.json();
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["data"].as_array().unwrap().len(), 2);

    let average: Value = server.get("/feedback/average-rating").await.json();
    assert_eq!(average["count"], 2);
    assert_eq!(average["averageRating"], 4.5);
}

#[tokio::test]
async fn feedback_average_is_zero_when_empty() {
    let (server, _mailer) = test_server();
    let average: Value = server.get("/feedback/average-rating").await.json();
    assert_eq!(average["averageRating"], 0.0);
    assert_eq!(average["count"], 0);
}

#[tokio::test]
async fn feedback_rating_must_be_in_range() {
    let (server, _mailer) = test_server();
    let response = server
        .post("/feedback")
        .json(&json!({
            "fullName": "Sam Perera",
            "feedback": "ok",
            "rating": 6
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"]["rating"], "must be between 1 and 5");
}
