use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::PaymentWebhookRequest;
use crate::api::dtos::responses::WebhookAck;
use crate::error::AppError;
use crate::state::AppState;

const PAID_EVENTS: [&str; 2] = ["payment.paid", "checkout_session.payment.paid"];

/// Payment provider callback. Deliveries are at-least-once and unordered,
/// so everything here has to tolerate replays.
pub async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PaymentWebhookRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !PAID_EVENTS.contains(&payload.event_type.as_str()) {
        info!("payment_webhook: ignoring event type {}", payload.event_type);
        return Ok(Json(WebhookAck { received: true }));
    }

    let (booking, transitioned) = state
        .bookings
        .confirm_payment(&payload.reference, payload.payment_ref.as_deref())
        .await?;

    if transitioned {
        info!("payment_webhook: booking {} confirmed", booking.code);
    } else {
        warn!("payment_webhook: duplicate delivery for {}, already confirmed", booking.code);
    }

    Ok(Json(WebhookAck { received: true }))
}
