//! registration.rs
//!
//! Show registration workflow.
//!
//! - `register_show` writes a show detail and all of its dependent rows
//!   (seat-class prices, seats, schedules) as one unit of work. The parent
//!   insert resolves the generated `show_detail_id` first; every dependent
//!   row is stamped with it. Any failure rolls the whole unit back.
//! - `get_full_show_detail` reads the show back with hall, theater and all
//!   dependent rows in one snapshot.

use tracing::{error, info, warn};

use crate::models::{FullShowDetail, ShowDetail, ShowRegistration};
use crate::store::{RegistrationTx, ShowStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Error during show registration: {0}")]
    InvalidRegistration(String),
    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: &'static str, id: i64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub async fn register_show<S: ShowStore>(
    store: &S,
    registration: &ShowRegistration,
) -> Result<ShowDetail, RegistrationError> {
    let mut tx = store.begin().await.map_err(|e| {
        error!("register_show: failed to open transaction: {}", e);
        RegistrationError::InvalidRegistration(e.to_string())
    })?;

    let show = match write_registration(&mut tx, registration).await {
        Ok(show) => show,
        Err(e) => {
            error!("register_show: write failed, rolling back: {}", e);
            if let Err(rollback_err) = tx.rollback().await {
                warn!("register_show: rollback failed: {}", rollback_err);
            }
            return Err(RegistrationError::InvalidRegistration(e.to_string()));
        }
    };

    // A failed commit leaves nothing behind; the transaction is gone either way.
    tx.commit().await.map_err(|e| {
        error!("register_show: commit failed for show {}: {}", show.show_detail_id, e);
        RegistrationError::InvalidRegistration(e.to_string())
    })?;

    info!(
        "Registered show {} ({}): {} prices, {} seats, {} schedules",
        show.show_detail_id,
        show.name,
        registration.prices.len(),
        registration.seats.len(),
        registration.schedules.len()
    );

    Ok(show)
}

async fn write_registration<T: RegistrationTx>(
    tx: &mut T,
    registration: &ShowRegistration,
) -> Result<ShowDetail, StoreError> {
    let show = tx.insert_show_detail(&registration.show_detail).await?;
    let show_detail_id = show.show_detail_id;

    for price in &registration.prices {
        tx.insert_price(show_detail_id, price).await?;
    }
    tx.insert_seats(show_detail_id, &registration.seats).await?;
    tx.insert_schedules(show_detail_id, &registration.schedules).await?;

    Ok(show)
}

pub async fn get_full_show_detail<S: ShowStore>(
    store: &S,
    show_detail_id: i64,
) -> Result<FullShowDetail, RegistrationError> {
    store
        .full_show_detail(show_detail_id)
        .await?
        .ok_or(RegistrationError::EntityNotFound {
            entity: "ShowDetail",
            id: show_detail_id,
        })
}
