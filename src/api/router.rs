use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, booking, cashier, facility, health, payment};
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public catalog
        .route("/api/v1/categories", get(facility::list_categories))
        .route("/api/v1/facilities", get(facility::list_units))
        .route("/api/v1/facilities/{unit_id}", get(facility::get_unit))
        .route("/api/v1/facilities/{unit_id}/availability", get(facility::check_availability))
        .route("/api/v1/facilities/{unit_id}/calendar", get(facility::get_calendar))

        // Guest booking flow
        .route("/api/v1/quotes", post(booking::quote))
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/lookup", get(booking::lookup_booking))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        // Payment provider callback
        .route("/api/v1/payments/webhook", post(payment::payment_webhook))

        // Front desk
        .route("/api/v1/cashier/verify", get(cashier::verify_booking))
        .route("/api/v1/cashier/check-in", post(cashier::check_in))

        // Staff administration
        .route("/api/v1/admin/categories", post(admin::create_category))
        .route("/api/v1/admin/facilities", post(admin::create_facility_unit).get(admin::list_all_units))
        .route("/api/v1/admin/rates", post(admin::create_rate_rule).get(admin::list_rate_rules))
        .route("/api/v1/admin/blocks", post(admin::create_block).get(admin::list_blocks))
        .route("/api/v1/admin/blocks/{block_id}", delete(admin::delete_block))
        .route("/api/v1/admin/inventory", post(admin::upsert_inventory))
        .route("/api/v1/admin/bookings", get(admin::list_bookings))
        .route("/api/v1/admin/audit-logs", get(admin::list_audit_logs))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
