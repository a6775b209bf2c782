use anyhow::{Context, anyhow};
use async_trait::async_trait;
use hsrp_core::{
    Booking, BookingDraft, BookingStatus, BookingStore, StatusUpdate, StoreError, VehicleCategory,
};
use sqlx::{PgPool, Row, postgres::PgRow};

/// Postgres-backed booking store. Writes are whole-field updates, which is
/// what makes duplicate verification triggers last-write-wins.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn booking_from_row(row: &PgRow) -> anyhow::Result<Booking> {
    let status_raw: String = row.try_get("status")?;
    let status: BookingStatus = status_raw
        .parse()
        .map_err(|err| anyhow!("stored status is not recognized: {err}"))?;
    let category_raw: String = row.try_get("vehicle_category")?;
    let category: VehicleCategory = category_raw
        .parse()
        .map_err(|err| anyhow!("stored category is not recognized: {err}"))?;

    Ok(Booking {
        id: row.try_get("id")?,
        order_id: row.try_get("order_id")?,
        owner_full_name: row.try_get("owner_full_name")?,
        owner_mobile: row.try_get("owner_mobile")?,
        owner_email: row.try_get("owner_email")?,
        owner_aadhaar: row.try_get("owner_aadhaar")?,
        owner_address: row.try_get("owner_address")?,
        owner_state: row.try_get("owner_state")?,
        owner_pincode: row.try_get("owner_pincode")?,
        vehicle_registration_number: row.try_get("vehicle_registration_number")?,
        engine_number: row.try_get("engine_number")?,
        chassis_number: row.try_get("chassis_number")?,
        vehicle_make: row.try_get("vehicle_make")?,
        vehicle_model: row.try_get("vehicle_model")?,
        manufacturing_year: row.try_get("manufacturing_year")?,
        category,
        amount: row.try_get("amount")?,
        status,
        payment_proof: row.try_get("payment_proof")?,
        verification_reason: row.try_get("verification_reason")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const BOOKING_COLUMNS: &str = "id, order_id, owner_full_name, owner_mobile, owner_email, \
     owner_aadhaar, owner_address, owner_state, owner_pincode, \
     vehicle_registration_number, engine_number, chassis_number, vehicle_make, \
     vehicle_model, manufacturing_year, vehicle_category, amount, status, \
     payment_proof, verification_reason, created_at, updated_at";

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, StoreError> {
        let details = &draft.details;
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                order_id, owner_full_name, owner_mobile, owner_email, owner_aadhaar,
                owner_address, owner_state, owner_pincode, vehicle_registration_number,
                engine_number, chassis_number, vehicle_make, vehicle_model,
                manufacturing_year, vehicle_category, amount, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $18)
            RETURNING id
            "#,
        )
        .bind(&draft.order_id)
        .bind(&details.owner_full_name)
        .bind(&details.owner_mobile)
        .bind(&details.owner_email)
        .bind(&details.owner_aadhaar)
        .bind(&details.owner_address)
        .bind(&details.owner_state)
        .bind(&details.owner_pincode)
        .bind(&details.vehicle_registration_number)
        .bind(&details.engine_number)
        .bind(&details.chassis_number)
        .bind(&details.vehicle_make)
        .bind(&details.vehicle_model)
        .bind(&details.manufacturing_year)
        .bind(details.category.as_str())
        .bind(draft.amount)
        .bind(draft.status.as_str())
        .bind(draft.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::Conflict
            } else {
                StoreError::Backend(anyhow::Error::new(err).context("failed to insert booking"))
            }
        })?;

        let id: i64 = row
            .try_get("id")
            .context("insert did not return an id")
            .map_err(StoreError::Backend)?;
        Ok(Booking::from_draft(id, draft))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StoreError::Backend(anyhow::Error::new(err)))?;

        row.as_ref()
            .map(booking_from_row)
            .transpose()
            .map_err(StoreError::Backend)
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StoreError::Backend(anyhow::Error::new(err)))?;

        row.as_ref()
            .map(booking_from_row)
            .transpose()
            .map_err(StoreError::Backend)
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE owner_mobile = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(mobile)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StoreError::Backend(anyhow::Error::new(err)))?;

        rows.iter()
            .map(booking_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(StoreError::Backend)
    }

    async fn update_status(&self, id: i64, update: StatusUpdate) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2,
                verification_reason = COALESCE($3, verification_reason),
                payment_proof = COALESCE($4, payment_proof),
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.status.as_str())
        .bind(update.verification_reason)
        .bind(update.payment_proof)
        .bind(update.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            StoreError::Backend(anyhow::Error::new(err).context("failed to update booking status"))
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StoreError::Backend(anyhow::Error::new(err)))?;

        rows.iter()
            .map(booking_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(StoreError::Backend)
    }
}
