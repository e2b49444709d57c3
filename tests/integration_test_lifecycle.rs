mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use serde_json::json;

async fn seed_priced_unit(app: &TestApp, name: &str) -> String {
    let (_, unit_id) = app.seed_unit(name).await;
    app.seed_unit_rate(&unit_id, "PER_NIGHT", 2500.0).await;
    unit_id
}

#[tokio::test]
async fn creating_a_booking_takes_a_timed_hold() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Hold Villa").await;

    let (status, body) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "AWAITING_PAYMENT");
    assert!(body["code"].as_str().unwrap().starts_with("RB-"));
    assert_eq!(body["total_amount"], 5850.0);
    assert_eq!(body["currency"], "PHP");
    assert!(body["expires_at"].as_str().is_some());
    assert_eq!(app.sent_mail_count(), 1);

    // The hold occupies the range immediately.
    let (status, _) = app
        .create_booking(&unit_id, "2025-06-11T00:00:00Z", "2025-06-13T00:00:00Z", "rival@example.com")
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn inactive_unit_cannot_be_booked() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Closed Villa").await;

    sqlx::query("UPDATE facility_units SET is_active = 0 WHERE id = ?")
        .bind(&unit_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not open for booking"));
}

#[tokio::test]
async fn payment_webhook_confirms_once_and_tolerates_replays() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Webhook Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    let code = booking["code"].as_str().unwrap().to_string();
    assert_eq!(app.sent_mail_count(), 1);

    let webhook = json!({
        "event_type": "payment.paid",
        "reference": code,
        "payment_ref": "pay_12345"
    });

    let res = app.request("POST", "/api/v1/payments/webhook", Some(webhook.clone())).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["received"], true);
    assert_eq!(app.sent_mail_count(), 2);

    // Replay: acknowledged, no second confirmation mail.
    let res = app.request("POST", "/api/v1/payments/webhook", Some(webhook)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["received"], true);
    assert_eq!(app.sent_mail_count(), 2);

    let res = app
        .staff_request("GET", &format!("/api/v1/cashier/verify?code={}", code), None)
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["status"], "CONFIRMED");
    assert_eq!(body["payment_ref"], "pay_12345");
}

#[tokio::test]
async fn unrelated_webhook_events_are_ignored() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Ignored Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    let code = booking["code"].as_str().unwrap().to_string();

    let res = app
        .request(
            "POST",
            "/api/v1/payments/webhook",
            Some(json!({ "event_type": "payment.failed", "reference": code })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .staff_request("GET", &format!("/api/v1/cashier/verify?code={}", code), None)
        .await;
    assert_eq!(parse_body(res).await["status"], "AWAITING_PAYMENT");
}

#[tokio::test]
async fn cancellation_requires_ownership_or_staff() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Cancel Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "owner@example.com")
        .await;
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();

    // Wrong email.
    let res = app
        .request(
            "POST",
            &format!("/api/v1/bookings/{}/cancel", booking_id),
            Some(json!({ "customer_email": "stranger@example.com" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Owner, case-insensitive.
    let res = app
        .request(
            "POST",
            &format!("/api/v1/bookings/{}/cancel", booking_id),
            Some(json!({ "customer_email": "OWNER@example.com", "reason": "change of plans" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "CANCELLED");

    // Cancelling again is a client error.
    let res = app
        .request(
            "POST",
            &format!("/api/v1/bookings/{}/cancel", booking_id),
            Some(json!({ "customer_email": "owner@example.com" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(parse_body(res).await["error"].as_str().unwrap().contains("already cancelled"));
}

#[tokio::test]
async fn staff_can_cancel_without_an_email() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Staff Cancel Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();

    let res = app
        .staff_request(
            "POST",
            &format!("/api/v1/bookings/{}/cancel", booking_id),
            Some(json!({ "reason": "overbooked" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    // The range opens up again.
    let (status, _) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "next@example.com")
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_hold_stops_occupying_and_cannot_confirm() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Expiry Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "late@example.com")
        .await;
    let code = booking["code"].as_str().unwrap().to_string();

    // Push the hold past its payment window.
    let past = Utc::now() - Duration::minutes(1);
    sqlx::query("UPDATE bookings SET expires_at = ? WHERE code = ?")
        .bind(past)
        .bind(&code)
        .execute(&app.pool)
        .await
        .unwrap();

    // The dates are bookable again even though the row still says
    // AWAITING_PAYMENT.
    let (status, _) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "prompt@example.com")
        .await;
    assert_eq!(status, StatusCode::OK);

    // And the lapsed hold can no longer be paid for.
    let res = app
        .request(
            "POST",
            "/api/v1/payments/webhook",
            Some(json!({ "event_type": "payment.paid", "reference": code })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(parse_body(res).await["error"].as_str().unwrap().contains("expired"));
}

#[tokio::test]
async fn expiry_reaper_cancels_stale_holds_and_returns_inventory() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Reaper Villa").await;

    app.staff_request(
        "POST",
        "/api/v1/admin/inventory",
        Some(json!({
            "facility_unit_id": unit_id,
            "day": "2025-06-10",
            "allotment": 1
        })),
    )
    .await;

    let (status, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-11T00:00:00Z", "guest@example.com")
        .await;
    assert_eq!(status, StatusCode::OK);
    let code = booking["code"].as_str().unwrap().to_string();

    let past = Utc::now() - Duration::minutes(1);
    sqlx::query("UPDATE bookings SET expires_at = ? WHERE code = ?")
        .bind(past)
        .bind(&code)
        .execute(&app.pool)
        .await
        .unwrap();

    let swept = app.state.bookings.cancel_expired().await.unwrap();
    assert_eq!(swept, 1);

    let res = app
        .staff_request("GET", &format!("/api/v1/cashier/verify?code={}", code), None)
        .await;
    assert_eq!(parse_body(res).await["status"], "CANCELLED");

    let remaining: i32 = sqlx::query_scalar(
        "SELECT remaining FROM inventory_days WHERE facility_unit_id = ? AND day = '2025-06-10'",
    )
    .bind(&unit_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn check_in_requires_a_confirmed_booking() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Desk Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    let code = booking["code"].as_str().unwrap().to_string();

    // Unauthenticated cashier access is rejected outright.
    let res = app
        .request("GET", &format!("/api/v1/cashier/verify?code={}", code), None)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Not yet paid.
    let res = app
        .staff_request("POST", "/api/v1/cashier/check-in", Some(json!({ "code": code })))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    app.request(
        "POST",
        "/api/v1/payments/webhook",
        Some(json!({ "event_type": "payment.paid", "reference": code })),
    )
    .await;

    let res = app
        .staff_request("POST", "/api/v1/cashier/check-in", Some(json!({ "code": code })))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(parse_body(res).await["checked_in_at"].as_str().is_some());

    // No double check-in.
    let res = app
        .staff_request("POST", "/api/v1/cashier/check-in", Some(json!({ "code": code })))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(parse_body(res).await["error"].as_str().unwrap().contains("already checked in"));
}

#[tokio::test]
async fn lookup_exposes_only_a_narrow_view() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Lookup Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "private@example.com")
        .await;
    let code = booking["code"].as_str().unwrap().to_string();

    let res = app
        .request("GET", &format!("/api/v1/bookings/lookup?code={}", code), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["code"], code.as_str());
    assert_eq!(body["status"], "AWAITING_PAYMENT");
    assert!(body.get("customer_email").is_none());
}

#[tokio::test]
async fn booking_mutations_leave_an_audit_trail() {
    let app = TestApp::new().await;
    let unit_id = seed_priced_unit(&app, "Audit Villa").await;

    let (_, booking) = app
        .create_booking(&unit_id, "2025-06-10T00:00:00Z", "2025-06-12T00:00:00Z", "guest@example.com")
        .await;
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();

    app.staff_request(
        "POST",
        &format!("/api/v1/bookings/{}/cancel", booking_id),
        Some(json!({ "reason": "test" })),
    )
    .await;

    let res = app
        .staff_request("GET", "/api/v1/admin/audit-logs?entity=Booking", None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let logs = parse_body(res).await;
    let actions: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"CREATE_BOOKING"));
    assert!(actions.contains(&"CANCEL_BOOKING"));
}
