pub mod invoice_service;
pub mod supplier_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use invoice_service::InvoiceService;
pub use supplier_service::SupplierService;
