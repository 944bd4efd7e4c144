//! Storage seam for show registration.
//!
//! A [`ShowStore`] hands out [`RegistrationTx`] units of work for the write
//! path and serves the composite read. The Postgres implementation lives in
//! [`postgres`]; tests run the same service code against an in-memory store.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use std::future::Future;

use crate::models::{FullShowDetail, NewPrice, NewSchedule, NewSeat, NewShowDetail, ShowDetail};

pub use postgres::PgShowStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    /// A write broke a key, foreign-key or check constraint.
    #[error("{0}")]
    Constraint(String),
}

pub trait ShowStore: Send + Sync {
    type Tx: RegistrationTx;

    /// Opens a unit of work. Nothing written through it is visible until commit.
    fn begin(&self) -> impl Future<Output = Result<Self::Tx, StoreError>> + Send;

    /// Reads a show with hall, theater and all dependent rows as one snapshot.
    fn full_show_detail(
        &self,
        show_detail_id: i64,
    ) -> impl Future<Output = Result<Option<FullShowDetail>, StoreError>> + Send;
}

/// Ordered writes of one registration. The parent insert must return the
/// generated identity before any dependent row is written.
pub trait RegistrationTx: Send {
    fn insert_show_detail(
        &mut self,
        show_detail: &NewShowDetail,
    ) -> impl Future<Output = Result<ShowDetail, StoreError>> + Send;

    fn insert_price(
        &mut self,
        show_detail_id: i64,
        price: &NewPrice,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Inserts every seat in bulk, all stamped with `show_detail_id`.
    fn insert_seats(
        &mut self,
        show_detail_id: i64,
        seats: &[NewSeat],
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn insert_schedules(
        &mut self,
        show_detail_id: i64,
        schedules: &[NewSchedule],
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn commit(self) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn rollback(self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
