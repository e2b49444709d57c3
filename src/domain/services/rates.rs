use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::models::facility::FacilityUnit;
use crate::domain::models::rate::RateRule;
use crate::domain::ports::RateRuleRepository;
use crate::error::AppError;

pub struct RateService {
    rate_repo: Arc<dyn RateRuleRepository>,
}

impl RateService {
    pub fn new(rate_repo: Arc<dyn RateRuleRepository>) -> Self {
        Self { rate_repo }
    }

    /// Unit-specific rules shadow category-level defaults; among candidates
    /// of the same specificity the latest effective_from wins (the repo
    /// orders for us). Administrative gaps or overlaps in effective windows
    /// have no further tie-break.
    pub async fn resolve(&self, unit: &FacilityUnit, on: NaiveDate) -> Result<RateRule, AppError> {
        if let Some(rule) = self.rate_repo.find_for_unit(&unit.id, on).await? {
            return Ok(rule);
        }

        if let Some(rule) = self.rate_repo.find_for_category(&unit.category_id, on).await? {
            return Ok(rule);
        }

        // A missing rate is a catalog misconfiguration the admin must fix,
        // never a silent zero-price booking.
        Err(AppError::Validation(format!(
            "No rate plan found for facility \"{}\". Please create a rate plan for this facility or its category.",
            unit.name
        )))
    }
}
