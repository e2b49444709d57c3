use std::sync::Arc;
use crate::domain::ports::{
    AuditLogRepository, AvailabilityBlockRepository, BookingRepository,
    FacilityRepository, InventoryRepository, Mailer, RateRuleRepository,
};
use crate::domain::services::availability::AvailabilityService;
use crate::domain::services::lifecycle::BookingService;
use crate::domain::services::pricing::PricingService;
use crate::domain::services::rates::RateService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub facility_repo: Arc<dyn FacilityRepository>,
    pub rate_repo: Arc<dyn RateRuleRepository>,
    pub block_repo: Arc<dyn AvailabilityBlockRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub inventory_repo: Arc<dyn InventoryRepository>,
    pub audit_repo: Arc<dyn AuditLogRepository>,
    pub availability: Arc<AvailabilityService>,
    pub rates: Arc<RateService>,
    pub pricing: Arc<PricingService>,
    pub bookings: Arc<BookingService>,
    pub mailer: Arc<dyn Mailer>,
}
