//! Integration tests for the booking endpoints' pre-database behavior:
//! authentication, role gates, and input validation, all exercised against
//! the production router and middleware stack.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use oficios_core::roles::Role;
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, json_request, read_json, token_for};

fn future_booking_body() -> serde_json::Value {
    json!({
        "provider_id": 1,
        "service_date": (Utc::now() + Duration::days(2)).to_rfc3339(),
        "description": "Reparar fuga en la cocina",
        "client_notes": "Urgencia: alta"
    })
}

#[tokio::test]
async fn every_protected_booking_endpoint_requires_auth() {
    let endpoints = [
        ("GET", "/api/v1/bookings", None),
        ("POST", "/api/v1/bookings", Some(future_booking_body())),
        ("GET", "/api/v1/bookings/1", None),
        (
            "PATCH",
            "/api/v1/bookings/1/status",
            Some(json!({ "status": "accepted" })),
        ),
        ("DELETE", "/api/v1/bookings/1", None),
    ];

    for (method, uri, body) in endpoints {
        let app = build_test_app();
        let response = app
            .oneshot(json_request(method, uri, None, body))
            .await
            .unwrap();
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert!(
            json["error"].is_string(),
            "{method} {uri} must carry an error field"
        );
    }
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected() {
    let app = build_test_app();
    let response = app
        .oneshot(json_request(
            "GET",
            "/api/v1/bookings",
            Some("not-a-real-token"),
            None,
        ))
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_with_unknown_role_is_rejected() {
    // Mint a structurally valid token whose role is outside the closed set.
    let token = oficios_api::auth::jwt::generate_access_token(
        7,
        "superuser",
        &common::test_config().jwt,
    )
    .unwrap();

    let app = build_test_app();
    let response = app
        .oneshot(json_request("GET", "/api/v1/bookings", Some(&token), None))
        .await
        .unwrap();
    let (status, _) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn booking_with_past_date_is_rejected_before_any_lookup() {
    let token = token_for(1, Role::Client);
    let body = json!({
        "provider_id": 1,
        "service_date": (Utc::now() - Duration::days(1)).to_rfc3339(),
        "description": "Reparar fuga en la cocina"
    });

    let app = build_test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            Some(&token),
            Some(body),
        ))
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("futuro"));
}

#[tokio::test]
async fn booking_with_service_date_now_is_rejected() {
    let token = token_for(1, Role::Client);
    let body = json!({
        "provider_id": 1,
        "service_date": Utc::now().to_rfc3339(),
        "description": "Reparar fuga en la cocina"
    });

    let app = build_test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            Some(&token),
            Some(body),
        ))
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("futuro"));
}

#[tokio::test]
async fn booking_without_description_is_rejected() {
    let token = token_for(1, Role::Client);
    let body = json!({
        "provider_id": 1,
        "service_date": (Utc::now() + Duration::days(2)).to_rfc3339(),
        "description": "   "
    });

    let app = build_test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            Some(&token),
            Some(body),
        ))
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("obligatorios"));
}

#[tokio::test]
async fn providers_may_not_create_bookings() {
    let token = token_for(2, Role::Provider);

    let app = build_test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            Some(&token),
            Some(future_booking_body()),
        ))
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn deletion_is_admin_only() {
    for role in [Role::Client, Role::Provider] {
        let token = token_for(3, role);
        let app = build_test_app();
        let response = app
            .oneshot(json_request(
                "DELETE",
                "/api/v1/bookings/1",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "role {:?}", role);
        assert!(json["error"].is_string());
    }
}
