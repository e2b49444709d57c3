use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

/// Per-unit, per-day allotment counter. A unit with no rows for a day is
/// untracked for that day: simple overlap detection is the only gate.
/// Tracked days allow `allotment` concurrent occupants (shared halls).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct InventoryDay {
    pub facility_unit_id: String,
    pub day: NaiveDate,
    pub allotment: i32,
    pub remaining: i32,
}
