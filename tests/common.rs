use clickstay_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::Mailer,
    domain::services::availability::AvailabilityService,
    domain::services::lifecycle::BookingService,
    domain::services::pricing::PricingService,
    domain::services::rates::RateService,
    error::AppError,
    infra::repositories::{
        sqlite_audit_repo::SqliteAuditRepo, sqlite_block_repo::SqliteBlockRepo,
        sqlite_booking_repo::SqliteBookingRepo, sqlite_facility_repo::SqliteFacilityRepo,
        sqlite_inventory_repo::SqliteInventoryRepo, sqlite_rate_repo::SqliteRateRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const STAFF_TOKEN: &str = "test-staff-token";

/// Captures outgoing mail so tests can assert on delivery counts.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<RecordingMailer>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            staff_api_token: STAFF_TOKEN.to_string(),
            hold_minutes: 15,
        };

        let mailer = Arc::new(RecordingMailer { sent: Mutex::new(Vec::new()) });

        let facility_repo = Arc::new(SqliteFacilityRepo::new(pool.clone()));
        let rate_repo = Arc::new(SqliteRateRepo::new(pool.clone()));
        let block_repo = Arc::new(SqliteBlockRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let inventory_repo = Arc::new(SqliteInventoryRepo::new(pool.clone()));
        let audit_repo = Arc::new(SqliteAuditRepo::new(pool.clone()));

        let availability = Arc::new(AvailabilityService::new(
            block_repo.clone(),
            booking_repo.clone(),
            inventory_repo.clone(),
        ));
        let rates = Arc::new(RateService::new(rate_repo.clone()));
        let pricing = Arc::new(PricingService::new(facility_repo.clone(), rates.clone()));
        let bookings = Arc::new(BookingService::new(
            config.clone(),
            facility_repo.clone(),
            booking_repo.clone(),
            audit_repo.clone(),
            availability.clone(),
            pricing.clone(),
            mailer.clone(),
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            facility_repo,
            rate_repo,
            block_repo,
            booking_repo,
            inventory_repo,
            audit_repo,
            availability,
            rates,
            pricing,
            bookings,
            mailer: mailer.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
        self.request_inner(method, uri, body, false).await
    }

    pub async fn staff_request(&self, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
        self.request_inner(method, uri, body, true).await
    }

    async fn request_inner(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        staff: bool,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if staff {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", STAFF_TOKEN));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Seeds a category + one active unit through the admin API.
    /// Returns (category_id, unit_id).
    pub async fn seed_unit(&self, name: &str) -> (String, String) {
        let res = self
            .staff_request(
                "POST",
                "/api/v1/admin/categories",
                Some(json!({ "kind": "ROOM", "name": format!("{} Category", name) })),
            )
            .await;
        assert!(res.status().is_success(), "seed category failed: {}", res.status());
        let category = parse_body(res).await;
        let category_id = category["id"].as_str().unwrap().to_string();

        let res = self
            .staff_request(
                "POST",
                "/api/v1/admin/facilities",
                Some(json!({
                    "category_id": category_id,
                    "name": name,
                    "capacity": 2
                })),
            )
            .await;
        assert!(res.status().is_success(), "seed unit failed: {}", res.status());
        let unit = parse_body(res).await;
        let unit_id = unit["id"].as_str().unwrap().to_string();

        (category_id, unit_id)
    }

    pub async fn seed_unit_rate(&self, unit_id: &str, price_type: &str, base_price: f64) {
        let res = self
            .staff_request(
                "POST",
                "/api/v1/admin/rates",
                Some(json!({
                    "facility_unit_id": unit_id,
                    "price_type": price_type,
                    "base_price": base_price,
                    "currency": "PHP",
                    "effective_from": "2020-01-01"
                })),
            )
            .await;
        assert!(res.status().is_success(), "seed rate failed: {}", res.status());
    }

    pub async fn seed_category_rate(&self, category_id: &str, base_price: f64, effective_from: &str) {
        let res = self
            .staff_request(
                "POST",
                "/api/v1/admin/rates",
                Some(json!({
                    "facility_category_id": category_id,
                    "price_type": "PER_NIGHT",
                    "base_price": base_price,
                    "currency": "PHP",
                    "effective_from": effective_from
                })),
            )
            .await;
        assert!(res.status().is_success(), "seed category rate failed: {}", res.status());
    }

    /// Creates a hold via the public API; returns status and body.
    pub async fn create_booking(
        &self,
        unit_id: &str,
        start: &str,
        end: &str,
        email: &str,
    ) -> (axum::http::StatusCode, Value) {
        let res = self
            .request(
                "POST",
                "/api/v1/bookings",
                Some(json!({
                    "facility_unit_id": unit_id,
                    "start_date": start,
                    "end_date": end,
                    "customer_name": "Test Guest",
                    "customer_email": email
                })),
            )
            .await;
        let status = res.status();
        let body = parse_body(res).await;
        (status, body)
    }

    pub fn sent_mail_count(&self) -> usize {
        self.mailer.sent.lock().unwrap().len()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
