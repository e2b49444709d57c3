mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn admin_routes_reject_missing_or_bad_tokens() {
    let app = TestApp::new().await;

    let res = app
        .request("POST", "/api/v1/admin/categories", Some(json!({ "kind": "ROOM", "name": "X" })))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/v1/admin/categories")
                .header("Authorization", "Bearer wrong-token")
                .header("Content-Type", "application/json")
                .body(axum::body::Body::from(
                    json!({ "kind": "ROOM", "name": "X" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rate_rule_must_target_exactly_one_attachment() {
    let app = TestApp::new().await;
    let (category_id, unit_id) = app.seed_unit("Target Villa").await;

    // Both set.
    let res = app
        .staff_request(
            "POST",
            "/api/v1/admin/rates",
            Some(json!({
                "facility_unit_id": unit_id,
                "facility_category_id": category_id,
                "price_type": "PER_NIGHT",
                "base_price": 100.0,
                "currency": "PHP",
                "effective_from": "2025-01-01"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Neither set.
    let res = app
        .staff_request(
            "POST",
            "/api/v1/admin/rates",
            Some(json!({
                "price_type": "PER_NIGHT",
                "base_price": 100.0,
                "currency": "PHP",
                "effective_from": "2025-01-01"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown price type.
    let res = app
        .staff_request(
            "POST",
            "/api/v1/admin/rates",
            Some(json!({
                "facility_unit_id": unit_id,
                "price_type": "PER_HOUR",
                "base_price": 100.0,
                "currency": "PHP",
                "effective_from": "2025-01-01"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_block_reopens_the_range() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_unit("Reopen Villa").await;
    app.seed_unit_rate(&unit_id, "PER_NIGHT", 2500.0).await;

    let res = app
        .staff_request(
            "POST",
            "/api/v1/admin/blocks",
            Some(json!({
                "facility_unit_id": unit_id,
                "start_date": "2025-06-10",
                "end_date": "2025-06-12",
                "reason": "Renovation"
            })),
        )
        .await;
    let block = parse_body(res).await;
    let block_id = block["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let res = app
        .staff_request("DELETE", &format!("/api/v1/admin/blocks/{}", block_id), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let (status, _) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_listing_hides_inactive_units() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_unit("Ghost Villa").await;

    sqlx::query("UPDATE facility_units SET is_active = 0 WHERE id = ?")
        .bind(&unit_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let res = app.request("GET", "/api/v1/facilities", None).await;
    let body = parse_body(res).await;
    assert!(body.as_array().unwrap().is_empty());

    // The admin listing still shows it.
    let res = app.staff_request("GET", "/api/v1/admin/facilities", None).await;
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
