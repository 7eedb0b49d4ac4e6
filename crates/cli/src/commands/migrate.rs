//! Database migration command.
//!
//! Applies the migrations embedded from `crates/storefront/migrations/`.
//!
//! ```bash
//! tienda-cli migrate
//! ```

use tienda_storefront::db::MIGRATOR;

use super::{CommandError, connect};

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!(
        migrations = MIGRATOR.iter().count(),
        "Running storefront migrations..."
    );
    MIGRATOR.run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
