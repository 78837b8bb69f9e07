pub mod invoice_repo;
pub mod models;
pub mod order_client;
pub mod supplier_repo;

use diesel::pg::PgConnection;

use crate::db::DbPool;
use crate::domain::errors::DomainError;

pub use invoice_repo::DieselInvoiceRepository;
pub use order_client::HttpOrderClient;
pub use supplier_repo::DieselSupplierRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Runs a Diesel closure on the blocking pool with a pooled connection.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, f: F) -> Result<T, DomainError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| DomainError::Storage(format!("database task failed: {}", e)))?
}

#[cfg(test)]
pub(crate) mod test_db;
