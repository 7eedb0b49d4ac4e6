//! Cart maintenance.
//!
//! Every product page view creates a fresh cart, so abandoned empty carts
//! pile up. `prune` deletes the ones older than a cutoff.

use chrono::{DateTime, Duration, Utc};
use tienda_storefront::db::{CartStore, PgCartStore};

use super::{CommandError, connect};

/// Creation cutoff for carts older than `hours`.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` if `hours` is out of range.
pub fn cutoff(now: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>, CommandError> {
    now.checked_sub_signed(Duration::hours(i64::from(hours)))
        .ok_or_else(|| CommandError::InvalidArgument(format!("{hours} hours is out of range")))
}

/// Delete empty carts created more than `older_than_hours` ago.
///
/// # Errors
///
/// Returns `CommandError` if a database operation fails.
pub async fn prune(older_than_hours: u32) -> Result<(), CommandError> {
    let created_before = cutoff(Utc::now(), older_than_hours)?;
    let store = PgCartStore::new(connect().await?);

    let removed = store.prune_empty(created_before).await?;
    tracing::info!(removed, %created_before, "Pruned empty carts");
    Ok(())
}
