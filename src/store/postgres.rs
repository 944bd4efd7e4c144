use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::{RegistrationTx, ShowStore, StoreError};
use crate::models::{
    FullShowDetail, FullShowDetailRow, NewPrice, NewSchedule, NewSeat, NewShowDetail, ShowDetail,
};

// Postgres caps a statement at 65535 bind parameters; seats bind 4 each.
const SEAT_CHUNK: usize = 10_000;
const SCHEDULE_CHUNK: usize = 20_000;

const FULL_SHOW_DETAIL_SQL: &str = r#"
    SELECT
        sd.show_detail_id,
        sd.show_detail_api_id,
        sd.show_detail_area,
        sd.show_detail_cast,
        sd.show_detail_category,
        sd.show_detail_name,
        sd.show_detail_poster_image_path,
        sd.show_detail_runtime,
        sd.show_detail_state,
        sd.hall_id,
        h.hall_name,
        t.theater_id,
        t.theater_name,
        COALESCE((
            SELECT json_agg(json_build_object(
                'seat_class', p.price_by_seat_class_seat_class,
                'price', p.price_by_seat_class_price
            ) ORDER BY p.price_by_seat_class_id)
            FROM price_by_seat_class p
            WHERE p.show_detail_id = sd.show_detail_id
        ), '[]'::json) AS prices,
        COALESCE((
            SELECT json_agg(json_build_object(
                'seat_id', s.seat_id,
                'col', s.seat_col,
                'row', s.seat_row,
                'seat_class', s.seat_class
            ) ORDER BY s.seat_id)
            FROM seat s
            WHERE s.show_detail_id = sd.show_detail_id
        ), '[]'::json) AS seats,
        COALESCE((
            SELECT json_agg(json_build_object(
                'date_time', sc.show_schedule_date_time
            ) ORDER BY sc.show_schedule_id)
            FROM show_schedule sc
            WHERE sc.show_detail_id = sd.show_detail_id
        ), '[]'::json) AS schedules
    FROM show_detail sd
    JOIN hall h ON h.hall_id = sd.hall_id
    JOIN theater t ON t.theater_id = h.theater_id
    WHERE sd.show_detail_id = $1
"#;

/// Integrity violations become [`StoreError::Constraint`]; the rest stay raw.
fn write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() {
            return StoreError::Constraint(db.message().to_string());
        }
    }
    StoreError::Database(err)
}

#[derive(Clone)]
pub struct PgShowStore {
    pool: PgPool,
}

impl PgShowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ShowStore for PgShowStore {
    type Tx = PgRegistrationTx;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgRegistrationTx { tx })
    }

    // Single statement, so the parent and its children come from one snapshot.
    async fn full_show_detail(&self, show_detail_id: i64) -> Result<Option<FullShowDetail>, StoreError> {
        let row = sqlx::query_as::<_, FullShowDetailRow>(FULL_SHOW_DETAIL_SQL)
            .bind(show_detail_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(FullShowDetail::from))
    }
}

pub struct PgRegistrationTx {
    tx: Transaction<'static, Postgres>,
}

impl RegistrationTx for PgRegistrationTx {
    async fn insert_show_detail(&mut self, show_detail: &NewShowDetail) -> Result<ShowDetail, StoreError> {
        let created = sqlx::query_as::<_, ShowDetail>(
            r#"
            INSERT INTO show_detail (
                show_detail_api_id, show_detail_area, show_detail_cast, show_detail_category,
                show_detail_name, show_detail_poster_image_path, show_detail_runtime,
                show_detail_state, hall_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&show_detail.api_id)
        .bind(show_detail.area)
        .bind(&show_detail.cast)
        .bind(show_detail.category)
        .bind(&show_detail.name)
        .bind(&show_detail.poster_image_path)
        .bind(&show_detail.runtime)
        .bind(show_detail.state)
        .bind(show_detail.hall_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(write_error)?;

        Ok(created)
    }

    async fn insert_price(&mut self, show_detail_id: i64, price: &NewPrice) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO price_by_seat_class
                (show_detail_id, price_by_seat_class_seat_class, price_by_seat_class_price)
             VALUES ($1, $2, $3)",
        )
        .bind(show_detail_id)
        .bind(price.seat_class)
        .bind(price.price)
        .execute(&mut *self.tx)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn insert_seats(&mut self, show_detail_id: i64, seats: &[NewSeat]) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for chunk in seats.chunks(SEAT_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO seat (seat_col, seat_row, seat_class, show_detail_id) ",
            );
            builder.push_values(chunk, |mut row, seat| {
                row.push_bind(seat.col)
                    .push_bind(seat.row)
                    .push_bind(seat.seat_class)
                    .push_bind(show_detail_id);
            });
            inserted += builder.build().execute(&mut *self.tx).await.map_err(write_error)?.rows_affected();
        }
        Ok(inserted)
    }

    async fn insert_schedules(
        &mut self,
        show_detail_id: i64,
        schedules: &[NewSchedule],
    ) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for chunk in schedules.chunks(SCHEDULE_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO show_schedule (show_schedule_date_time, show_detail_id) ",
            );
            builder.push_values(chunk, |mut row, schedule| {
                row.push_bind(schedule.date_time).push_bind(show_detail_id);
            });
            inserted += builder.build().execute(&mut *self.tx).await.map_err(write_error)?.rows_affected();
        }
        Ok(inserted)
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(write_error)?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
