use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

use crate::domain::services::pricing::PriceBreakdown;

pub const CODE_PREFIX: &str = "RB-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    AwaitingPayment,
    Paid,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::AwaitingPayment => "AWAITING_PAYMENT",
            BookingStatus::Paid => "PAID",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AWAITING_PAYMENT" => Some(BookingStatus::AwaitingPayment),
            "PAID" => Some(BookingStatus::Paid),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            "COMPLETED" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

/// The central transactional entity. A row in AWAITING_PAYMENT with a
/// future `expires_at` is a hold; expiry is never a stored state, only a
/// comparison against `expires_at`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub code: String,
    pub facility_unit_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub special_requests: Option<String>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub fee_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub payment_ref: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub facility_unit_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub special_requests: Option<String>,
}

impl Booking {
    pub fn new_hold(params: NewBookingParams, pricing: &PriceBreakdown, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: generate_code(),
            facility_unit_id: params.facility_unit_id,
            start_date: params.start_date,
            end_date: params.end_date,
            status: BookingStatus::AwaitingPayment.as_str().to_string(),
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            special_requests: params.special_requests,
            subtotal: pricing.subtotal,
            tax_amount: pricing.tax_amount,
            fee_amount: pricing.fee_amount,
            total_amount: pricing.total_amount,
            currency: pricing.currency.clone(),
            payment_ref: None,
            expires_at: Some(expires_at),
            checked_in_at: None,
            cancelled_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status() == Some(BookingStatus::AwaitingPayment)
            && self.expires_at.is_some_and(|exp| now > exp)
    }
}

/// Human-readable booking code. The random tail is large enough that
/// collisions are practically impossible; the UNIQUE index on
/// bookings.code is the backstop.
pub fn generate_code() -> String {
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    format!("{}{}", CODE_PREFIX, tail)
}
