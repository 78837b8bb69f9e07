pub mod invoices;
pub mod suppliers;
