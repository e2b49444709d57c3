use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::audit::AuditLog;
use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
use crate::domain::ports::{AuditLogRepository, BookingRepository, FacilityRepository, Mailer};
use crate::domain::services::availability::AvailabilityService;
use crate::domain::services::pricing::PricingService;
use crate::error::AppError;

/// Who is asking for a cancellation.
pub enum CancelActor {
    Staff,
    Customer { email: String },
}

/// Orchestrates quote -> hold -> confirm/cancel/expire. All state
/// transitions go through here so audit entries and guest notices stay
/// consistent.
pub struct BookingService {
    config: Config,
    facility_repo: Arc<dyn FacilityRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    availability: Arc<AvailabilityService>,
    pricing: Arc<PricingService>,
    mailer: Arc<dyn Mailer>,
}

impl BookingService {
    pub fn new(
        config: Config,
        facility_repo: Arc<dyn FacilityRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        audit_repo: Arc<dyn AuditLogRepository>,
        availability: Arc<AvailabilityService>,
        pricing: Arc<PricingService>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self { config, facility_repo, booking_repo, audit_repo, availability, pricing, mailer }
    }

    /// Availability first (reject fast), then pricing, then the hold
    /// insert. The insert re-verifies the range inside its transaction, so
    /// losing a race after the advisory check still comes back as a normal
    /// "not available" rejection.
    pub async fn create(&self, params: NewBookingParams) -> Result<Booking, AppError> {
        let unit = self
            .facility_repo
            .find_unit(&params.facility_unit_id)
            .await?
            .ok_or(AppError::NotFound("Facility unit not found".into()))?;

        if !unit.is_active {
            return Err(AppError::Validation("Facility is not open for booking".into()));
        }

        let check = self
            .availability
            .check(&unit.id, params.start_date, params.end_date)
            .await?;
        if !check.available {
            return Err(AppError::Unavailable(
                check.reason.unwrap_or_else(|| "Facility not available".into()),
            ));
        }

        let pricing = self
            .pricing
            .quote(&unit.id, params.start_date, params.end_date)
            .await?;

        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.hold_minutes);
        let booking = Booking::new_hold(params, &pricing, expires_at);

        let created = self.booking_repo.create_hold(&booking, now).await?;
        info!("Hold created: {} ({})", created.code, created.id);

        self.record_audit(
            "CREATE_BOOKING",
            &created.id,
            json!({ "code": created.code, "status": created.status }),
        )
        .await;

        self.notify(
            &created.customer_email,
            &format!("Booking hold {} - complete payment within {} minutes", created.code, self.config.hold_minutes),
            &format!(
                "Your booking {} for {} is held until {}. Total due: {} {}.",
                created.code, unit.name, expires_at, created.currency, created.total_amount
            ),
        )
        .await;

        Ok(created)
    }

    /// Idempotent payment confirmation. A duplicate webhook for an already
    /// confirmed booking is a no-op success; the bool reports whether this
    /// call performed the transition.
    pub async fn confirm_payment(
        &self,
        code: &str,
        payment_ref: Option<&str>,
    ) -> Result<(Booking, bool), AppError> {
        let booking = self
            .booking_repo
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        match booking.status() {
            Some(BookingStatus::Confirmed) => return Ok((booking, false)),
            Some(BookingStatus::Cancelled) => {
                return Err(AppError::Conflict("Cannot confirm a cancelled booking".into()));
            }
            Some(BookingStatus::Completed) => {
                return Err(AppError::Conflict("Booking is already completed".into()));
            }
            Some(BookingStatus::AwaitingPayment) if booking.is_expired(Utc::now()) => {
                return Err(AppError::Conflict("Booking hold has expired".into()));
            }
            Some(BookingStatus::AwaitingPayment) | Some(BookingStatus::Paid) => {}
            None => return Err(AppError::Internal),
        }

        match self.booking_repo.mark_confirmed(&booking.id, payment_ref).await? {
            Some(confirmed) => {
                info!("Booking confirmed: {}", confirmed.code);

                self.record_audit(
                    "CONFIRM_BOOKING",
                    &confirmed.id,
                    json!({ "code": confirmed.code, "payment_ref": payment_ref }),
                )
                .await;

                self.notify(
                    &confirmed.customer_email,
                    &format!("Booking confirmed - {}", confirmed.code),
                    &format!(
                        "Payment received. Your booking {} is confirmed. See you on {}.",
                        confirmed.code,
                        confirmed.start_date.date_naive()
                    ),
                )
                .await;

                Ok((confirmed, true))
            }
            // Lost a confirm/confirm race; re-read to tell the no-op apart
            // from a genuine state error.
            None => {
                let current = self
                    .booking_repo
                    .find_by_id(&booking.id)
                    .await?
                    .ok_or(AppError::NotFound("Booking not found".into()))?;

                if current.status() == Some(BookingStatus::Confirmed) {
                    Ok((current, false))
                } else {
                    Err(AppError::Conflict(format!(
                        "Booking cannot be confirmed from status {}",
                        current.status
                    )))
                }
            }
        }
    }

    pub async fn cancel(
        &self,
        booking_id: &str,
        actor: CancelActor,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        match actor {
            CancelActor::Staff => {}
            CancelActor::Customer { email } => {
                if !email.eq_ignore_ascii_case(&booking.customer_email) {
                    return Err(AppError::Forbidden("Not your booking".into()));
                }
            }
        }

        match booking.status() {
            Some(BookingStatus::Cancelled) => {
                return Err(AppError::Validation("Booking is already cancelled".into()));
            }
            Some(BookingStatus::Completed) => {
                return Err(AppError::Validation("Cannot cancel completed booking".into()));
            }
            _ => {}
        }

        let cancelled = self.booking_repo.cancel(&booking.id).await?;
        info!("Booking cancelled: {}", cancelled.code);

        self.record_audit(
            "CANCEL_BOOKING",
            &cancelled.id,
            json!({ "code": cancelled.code, "reason": reason }),
        )
        .await;

        self.notify(
            &cancelled.customer_email,
            &format!("Booking cancelled - {}", cancelled.code),
            &format!("Your booking {} has been cancelled.", cancelled.code),
        )
        .await;

        Ok(cancelled)
    }

    pub async fn check_in(&self, code: &str) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        match booking.status() {
            Some(BookingStatus::Paid) | Some(BookingStatus::Confirmed) => {}
            _ => {
                return Err(AppError::Validation(
                    "Booking must be paid or confirmed before check-in".into(),
                ));
            }
        }

        if booking.checked_in_at.is_some() {
            return Err(AppError::Validation("Guest is already checked in".into()));
        }

        let checked_in = self.booking_repo.mark_checked_in(&booking.id).await?;
        info!("Guest checked in: {}", checked_in.code);

        self.record_audit(
            "CHECK_IN",
            &checked_in.id,
            json!({ "code": checked_in.code }),
        )
        .await;

        Ok(checked_in)
    }

    /// Hygiene sweep: stale holds are already non-occupying by comparison,
    /// this just persists the fact and releases their inventory.
    pub async fn cancel_expired(&self) -> Result<u64, AppError> {
        self.booking_repo.cancel_expired(Utc::now()).await
    }

    // Audit and mail are best-effort: the booking mutation has committed,
    // a logging failure must not turn it into a client-facing error.
    async fn record_audit(&self, action: &str, entity_id: &str, data: serde_json::Value) {
        let entry = AuditLog::new(action, "Booking", entity_id, data);
        if let Err(e) = self.audit_repo.record(&entry).await {
            warn!("Failed to write audit log for {}: {:?}", action, e);
        }
    }

    async fn notify(&self, recipient: &str, subject: &str, body: &str) {
        if let Err(e) = self.mailer.send(recipient, subject, body).await {
            warn!("Failed to send notification '{}': {:?}", subject, e);
        }
    }
}
