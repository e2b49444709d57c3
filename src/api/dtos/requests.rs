use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub facility_unit_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub facility_unit_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
    /// Required unless the caller is staff; must match the booking owner.
    pub customer_email: Option<String>,
}

#[derive(Deserialize)]
pub struct PaymentWebhookRequest {
    pub event_type: String,
    /// Provider echoes back the booking code we handed it at checkout.
    pub reference: String,
    pub payment_ref: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub code: String,
}

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateFacilityUnitRequest {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
}

#[derive(Deserialize)]
pub struct CreateRateRuleRequest {
    pub facility_unit_id: Option<String>,
    pub facility_category_id: Option<String>,
    pub price_type: String,
    pub base_price: f64,
    pub currency: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateBlockRequest {
    pub facility_unit_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct UpsertInventoryRequest {
    pub facility_unit_id: String,
    pub day: NaiveDate,
    pub allotment: i32,
    pub remaining: Option<i32>,
}
