//! In-memory show store for tests.
//!
//! Rows written through a [`MemoryTx`] are staged and only applied on commit.
//! Identities come from shared counters that advance even when a unit of work
//! is rolled back, as database sequences do.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{RegistrationTx, ShowStore, StoreError};
use crate::models::{
    FullShowDetail, Hall, HallSummary, NewPrice, NewSchedule, NewSeat, NewShowDetail,
    PriceBySeatClass, PriceEntry, ScheduleEntry, Seat, SeatEntry, ShowDetail, ShowSchedule,
    Theater,
};

/// Write step at which a unit of work can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    ShowDetail,
    Price,
    Seats,
    Schedules,
    Commit,
}

#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub theaters: Vec<Theater>,
    pub halls: Vec<Hall>,
    pub show_details: Vec<ShowDetail>,
    pub prices: Vec<PriceBySeatClass>,
    pub seats: Vec<Seat>,
    pub schedules: Vec<ShowSchedule>,
}

#[derive(Debug, Default)]
struct Shared {
    tables: Tables,
    next_id: i64,
    fail_at: Option<FailAt>,
}

impl Shared {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryShowStore {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryShowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hall(self, theater: Theater, hall: Hall) -> Self {
        if let Ok(mut shared) = self.shared.lock() {
            shared.tables.theaters.push(theater);
            shared.tables.halls.push(hall);
        }
        self
    }

    /// Every unit of work opened after this call fails at `step`.
    pub fn fail_at(&self, step: Option<FailAt>) {
        if let Ok(mut shared) = self.shared.lock() {
            shared.fail_at = step;
        }
    }

    pub fn snapshot(&self) -> Tables {
        self.shared
            .lock()
            .map(|shared| shared.tables.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Shared>, StoreError> {
        lock(&self.shared)
    }
}

fn lock(shared: &Mutex<Shared>) -> Result<MutexGuard<'_, Shared>, StoreError> {
    shared
        .lock()
        .map_err(|_| StoreError::Constraint("memory store poisoned".to_string()))
}

fn injected(step: FailAt) -> StoreError {
    StoreError::Constraint(format!("injected failure at {step:?}"))
}

impl ShowStore for MemoryShowStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let fail_at = self.lock()?.fail_at;
        Ok(MemoryTx {
            shared: Arc::clone(&self.shared),
            staged: Tables::default(),
            fail_at,
        })
    }

    async fn full_show_detail(&self, show_detail_id: i64) -> Result<Option<FullShowDetail>, StoreError> {
        let shared = self.lock()?;
        let tables = &shared.tables;

        let Some(show_detail) = tables
            .show_details
            .iter()
            .find(|s| s.show_detail_id == show_detail_id)
            .cloned()
        else {
            return Ok(None);
        };
        let hall = tables
            .halls
            .iter()
            .find(|h| h.hall_id == show_detail.hall_id)
            .ok_or_else(|| StoreError::Constraint("dangling hall_id".to_string()))?;
        let theater = tables
            .theaters
            .iter()
            .find(|t| t.theater_id == hall.theater_id)
            .ok_or_else(|| StoreError::Constraint("dangling theater_id".to_string()))?;

        Ok(Some(FullShowDetail {
            theater: theater.clone(),
            hall: HallSummary {
                hall_id: hall.hall_id,
                hall_name: hall.hall_name.clone(),
            },
            prices: tables
                .prices
                .iter()
                .filter(|p| p.show_detail_id == show_detail_id)
                .map(|p| PriceEntry { seat_class: p.seat_class, price: p.price })
                .collect(),
            seats: tables
                .seats
                .iter()
                .filter(|s| s.show_detail_id == show_detail_id)
                .map(|s| SeatEntry { seat_id: s.seat_id, col: s.col, row: s.row, seat_class: s.seat_class })
                .collect(),
            schedules: tables
                .schedules
                .iter()
                .filter(|s| s.show_detail_id == show_detail_id)
                .map(|s| ScheduleEntry { date_time: s.date_time })
                .collect(),
            show_detail,
        }))
    }
}

pub struct MemoryTx {
    shared: Arc<Mutex<Shared>>,
    staged: Tables,
    fail_at: Option<FailAt>,
}

impl MemoryTx {
    fn check(&self, step: FailAt) -> Result<(), StoreError> {
        match self.fail_at {
            Some(fail) if fail == step => Err(injected(step)),
            _ => Ok(()),
        }
    }

    fn parent_staged(&self, show_detail_id: i64) -> Result<(), StoreError> {
        if self.staged.show_details.iter().any(|s| s.show_detail_id == show_detail_id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "show_detail_id {show_detail_id} does not reference a show in this unit of work"
            )))
        }
    }
}

impl RegistrationTx for MemoryTx {
    async fn insert_show_detail(&mut self, show_detail: &NewShowDetail) -> Result<ShowDetail, StoreError> {
        self.check(FailAt::ShowDetail)?;
        let mut shared = lock(&self.shared)?;
        if !shared.tables.halls.iter().any(|h| h.hall_id == show_detail.hall_id) {
            return Err(StoreError::Constraint(format!(
                "hall_id {} violates foreign key constraint",
                show_detail.hall_id
            )));
        }

        let created = ShowDetail {
            show_detail_id: shared.next_id(),
            api_id: show_detail.api_id.clone(),
            area: show_detail.area,
            cast: show_detail.cast.clone(),
            category: show_detail.category,
            name: show_detail.name.clone(),
            poster_image_path: show_detail.poster_image_path.clone(),
            runtime: show_detail.runtime.clone(),
            state: show_detail.state,
            hall_id: show_detail.hall_id,
        };
        drop(shared);

        self.staged.show_details.push(created.clone());
        Ok(created)
    }

    async fn insert_price(&mut self, show_detail_id: i64, price: &NewPrice) -> Result<(), StoreError> {
        self.check(FailAt::Price)?;
        self.parent_staged(show_detail_id)?;
        let id = lock(&self.shared)?.next_id();
        self.staged.prices.push(PriceBySeatClass {
            price_by_seat_class_id: id,
            show_detail_id,
            seat_class: price.seat_class,
            price: price.price,
        });
        Ok(())
    }

    async fn insert_seats(&mut self, show_detail_id: i64, seats: &[NewSeat]) -> Result<u64, StoreError> {
        self.check(FailAt::Seats)?;
        self.parent_staged(show_detail_id)?;
        let mut shared = lock(&self.shared)?;
        let rows: Vec<Seat> = seats
            .iter()
            .map(|seat| Seat {
                seat_id: shared.next_id(),
                col: seat.col,
                row: seat.row,
                seat_class: seat.seat_class,
                show_detail_id,
            })
            .collect();
        drop(shared);

        let count = rows.len() as u64;
        self.staged.seats.extend(rows);
        Ok(count)
    }

    async fn insert_schedules(
        &mut self,
        show_detail_id: i64,
        schedules: &[NewSchedule],
    ) -> Result<u64, StoreError> {
        self.check(FailAt::Schedules)?;
        self.parent_staged(show_detail_id)?;
        let mut shared = lock(&self.shared)?;
        let rows: Vec<ShowSchedule> = schedules
            .iter()
            .map(|schedule| ShowSchedule {
                show_schedule_id: shared.next_id(),
                date_time: schedule.date_time,
                show_detail_id,
            })
            .collect();
        drop(shared);

        let count = rows.len() as u64;
        self.staged.schedules.extend(rows);
        Ok(count)
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.check(FailAt::Commit)?;
        let mut shared = lock(&self.shared)?;
        let tables = &mut shared.tables;
        tables.show_details.extend(self.staged.show_details);
        tables.prices.extend(self.staged.prices);
        tables.seats.extend(self.staged.seats);
        tables.schedules.extend(self.staged.schedules);
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}
