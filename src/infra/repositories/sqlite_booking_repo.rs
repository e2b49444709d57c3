use crate::domain::services::availability::tracked_day_bounds;
use crate::domain::{models::booking::Booking, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Decrements remaining for every tracked day of the range. Tracked days
/// that are already exhausted refuse the claim, failing the hold.
async fn claim_inventory(
    tx: &mut Transaction<'_, Sqlite>,
    unit_id: &str,
    first: NaiveDate,
    end_excl: NaiveDate,
) -> Result<(), AppError> {
    let tracked: i64 = sqlx::query(
        "SELECT COUNT(*) AS count FROM inventory_days WHERE facility_unit_id = ? AND day >= ? AND day < ?",
    )
    .bind(unit_id).bind(first).bind(end_excl)
    .fetch_one(&mut **tx).await.map_err(AppError::Database)?
    .get("count");

    if tracked == 0 {
        return Ok(());
    }

    let claimed = sqlx::query(
        "UPDATE inventory_days SET remaining = remaining - 1
         WHERE facility_unit_id = ? AND day >= ? AND day < ? AND remaining > 0",
    )
    .bind(unit_id).bind(first).bind(end_excl)
    .execute(&mut **tx).await.map_err(AppError::Database)?
    .rows_affected();

    if claimed != tracked as u64 {
        return Err(AppError::Unavailable("No inventory remaining for the selected dates".into()));
    }
    Ok(())
}

async fn release_inventory(
    tx: &mut Transaction<'_, Sqlite>,
    unit_id: &str,
    first: NaiveDate,
    end_excl: NaiveDate,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE inventory_days SET remaining = MIN(remaining + 1, allotment)
         WHERE facility_unit_id = ? AND day >= ? AND day < ?",
    )
    .bind(unit_id).bind(first).bind(end_excl)
    .execute(&mut **tx).await.map_err(AppError::Database)?;
    Ok(())
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_hold(&self, booking: &Booking, now: DateTime<Utc>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // The NOT EXISTS guard is the authoritative conflict check: SQLite
        // serializes writers, so whichever racing request runs second sees
        // the first one's row and inserts nothing.
        let inserted = sqlx::query(
            "INSERT INTO bookings (id, code, facility_unit_id, start_date, end_date, status,
                                   customer_name, customer_email, customer_phone, special_requests,
                                   subtotal, tax_amount, fee_amount, total_amount, currency,
                                   payment_ref, expires_at, checked_in_at, cancelled_at, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE NOT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE facility_unit_id = ? AND start_date < ? AND end_date > ?
                   AND (status IN ('PAID', 'CONFIRMED')
                        OR (status = 'AWAITING_PAYMENT' AND expires_at > ?))
             )",
        )
        .bind(&booking.id).bind(&booking.code).bind(&booking.facility_unit_id)
        .bind(booking.start_date).bind(booking.end_date).bind(&booking.status)
        .bind(&booking.customer_name).bind(&booking.customer_email)
        .bind(&booking.customer_phone).bind(&booking.special_requests)
        .bind(booking.subtotal).bind(booking.tax_amount).bind(booking.fee_amount)
        .bind(booking.total_amount).bind(&booking.currency)
        .bind(&booking.payment_ref).bind(booking.expires_at)
        .bind(booking.checked_in_at).bind(booking.cancelled_at).bind(booking.created_at)
        .bind(&booking.facility_unit_id).bind(booking.end_date).bind(booking.start_date).bind(now)
        .execute(&mut *tx).await.map_err(AppError::Database)?;

        if inserted.rows_affected() == 0 {
            return Err(AppError::Unavailable(
                "Facility is already booked for the selected dates".into(),
            ));
        }

        let (first, end_excl) = tracked_day_bounds(booking.start_date, booking.end_date);
        claim_inventory(&mut tx, &booking.facility_unit_id, first, end_excl).await?;

        let created = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(&booking.id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE code = ?")
            .bind(code).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_occupying_overlaps(
        &self,
        unit_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE facility_unit_id = ? AND start_date < ? AND end_date > ?
               AND (status IN ('PAID', 'CONFIRMED')
                    OR (status = 'AWAITING_PAYMENT' AND expires_at > ?))",
        )
        .bind(unit_id).bind(end).bind(start).bind(now)
        .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_confirmed(&self, id: &str, payment_ref: Option<&str>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'CONFIRMED', payment_ref = COALESCE(?, payment_ref)
             WHERE id = ? AND status IN ('AWAITING_PAYMENT', 'PAID')
             RETURNING *",
        )
        .bind(payment_ref).bind(id)
        .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cancelled = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'CANCELLED', cancelled_at = ? WHERE id = ? RETURNING *",
        )
        .bind(Utc::now()).bind(id)
        .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let (first, end_excl) = tracked_day_bounds(cancelled.start_date, cancelled.end_date);
        release_inventory(&mut tx, &cancelled.facility_unit_id, first, end_excl).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }

    async fn mark_checked_in(&self, id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET checked_in_at = ? WHERE id = ? RETURNING *",
        )
        .bind(Utc::now()).bind(id)
        .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn cancel_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let stale = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE status = 'AWAITING_PAYMENT' AND expires_at <= ?",
        )
        .bind(now)
        .fetch_all(&mut *tx).await.map_err(AppError::Database)?;

        for booking in &stale {
            sqlx::query("UPDATE bookings SET status = 'CANCELLED', cancelled_at = ? WHERE id = ?")
                .bind(now).bind(&booking.id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;

            let (first, end_excl) = tracked_day_bounds(booking.start_date, booking.end_date);
            release_inventory(&mut tx, &booking.facility_unit_id, first, end_excl).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(stale.len() as u64)
    }
}
