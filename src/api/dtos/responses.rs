use crate::domain::services::pricing::PriceBreakdown;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct QuoteResponse {
    pub facility_unit_id: String,
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
}

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub booking_id: String,
    pub code: String,
    pub status: String,
    pub total_amount: f64,
    pub currency: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Narrow shape for unauthenticated code lookups. Guests confirm their
/// reservation exists without seeing anyone's contact details.
#[derive(Serialize)]
pub struct BookingLookupResponse {
    pub id: String,
    pub code: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub facility_unit_id: String,
    pub days: Vec<DayAvailability>,
}

#[derive(Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
