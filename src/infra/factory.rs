use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::availability::AvailabilityService;
use crate::domain::services::lifecycle::BookingService;
use crate::domain::services::pricing::PricingService;
use crate::domain::services::rates::RateService;
use crate::infra::mailer::LogMailer;
use crate::infra::repositories::{
    postgres_audit_repo::PostgresAuditRepo, postgres_block_repo::PostgresBlockRepo,
    postgres_booking_repo::PostgresBookingRepo, postgres_facility_repo::PostgresFacilityRepo,
    postgres_inventory_repo::PostgresInventoryRepo, postgres_rate_repo::PostgresRateRepo,
    sqlite_audit_repo::SqliteAuditRepo, sqlite_block_repo::SqliteBlockRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_facility_repo::SqliteFacilityRepo,
    sqlite_inventory_repo::SqliteInventoryRepo, sqlite_rate_repo::SqliteRateRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        build_state(
            config,
            Arc::new(PostgresFacilityRepo::new(pool.clone())),
            Arc::new(PostgresRateRepo::new(pool.clone())),
            Arc::new(PostgresBlockRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool.clone())),
            Arc::new(PostgresInventoryRepo::new(pool.clone())),
            Arc::new(PostgresAuditRepo::new(pool)),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        build_state(
            config,
            Arc::new(SqliteFacilityRepo::new(pool.clone())),
            Arc::new(SqliteRateRepo::new(pool.clone())),
            Arc::new(SqliteBlockRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
            Arc::new(SqliteInventoryRepo::new(pool.clone())),
            Arc::new(SqliteAuditRepo::new(pool)),
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn build_state(
    config: &Config,
    facility_repo: Arc<dyn crate::domain::ports::FacilityRepository>,
    rate_repo: Arc<dyn crate::domain::ports::RateRuleRepository>,
    block_repo: Arc<dyn crate::domain::ports::AvailabilityBlockRepository>,
    booking_repo: Arc<dyn crate::domain::ports::BookingRepository>,
    inventory_repo: Arc<dyn crate::domain::ports::InventoryRepository>,
    audit_repo: Arc<dyn crate::domain::ports::AuditLogRepository>,
) -> AppState {
    let mailer: Arc<dyn crate::domain::ports::Mailer> = Arc::new(LogMailer);

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

    AppState {
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
        mailer,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
