pub mod postgres_audit_repo;
pub mod postgres_block_repo;
pub mod postgres_booking_repo;
pub mod postgres_facility_repo;
pub mod postgres_inventory_repo;
pub mod postgres_rate_repo;
pub mod sqlite_audit_repo;
pub mod sqlite_block_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_facility_repo;
pub mod sqlite_inventory_repo;
pub mod sqlite_rate_repo;
