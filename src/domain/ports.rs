use async_trait::async_trait;

use super::errors::DomainError;
use super::invoice::{Invoice, InvoiceStatus, NewInvoice};
use super::supplier::{NewSupplier, Supplier};

#[async_trait]
pub trait SupplierRepository: Send + Sync + 'static {
    /// Fails with `InvalidInput` when the email is already registered.
    async fn create(&self, supplier: NewSupplier) -> Result<Supplier, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, DomainError>;
    async fn exists(&self, id: i64) -> Result<bool, DomainError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
    async fn list(&self) -> Result<Vec<Supplier>, DomainError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync + 'static {
    /// Writes the invoice and all of its order references atomically.
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, DomainError>;
    async fn list(&self) -> Result<Vec<Invoice>, DomainError>;
    async fn list_by_supplier(&self, supplier_id: i64) -> Result<Vec<Invoice>, DomainError>;
    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, DomainError>;
    /// Returns `false` when no invoice had that id.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Outcome of asking the order service whether an order exists.
///
/// `Unknown` covers every failure to get a usable answer (timeouts, refused
/// connections, unexpected statuses, unparseable bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderVerification {
    Exists,
    NotFound,
    Unknown,
}

#[async_trait]
pub trait OrderVerifier: Send + Sync + 'static {
    /// Single attempt, never fails.
    async fn verify(&self, order_id: i64) -> OrderVerification;
}
