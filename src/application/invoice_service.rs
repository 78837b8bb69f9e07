use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};

use crate::domain::discount::DiscountPolicy;
use crate::domain::errors::DomainError;
use crate::domain::invoice::{
    fits_amount_column, Invoice, InvoiceStatus, NewInvoice, OrderReference, MAX_AMOUNT,
};
use crate::domain::ports::{InvoiceRepository, OrderVerification, OrderVerifier, SupplierRepository};

#[derive(Clone)]
pub struct InvoiceService {
    suppliers: Arc<dyn SupplierRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    orders: Arc<dyn OrderVerifier>,
    discounts: DiscountPolicy,
}

impl InvoiceService {
    pub fn new(
        suppliers: Arc<dyn SupplierRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        orders: Arc<dyn OrderVerifier>,
        discounts: DiscountPolicy,
    ) -> Self {
        Self {
            suppliers,
            invoices,
            orders,
            discounts,
        }
    }

    /// Issues an invoice for `supplier_id` covering `orders`.
    ///
    /// Order verification is advisory: a missing or unreachable order is
    /// logged and the invoice is still written. Only invalid input aborts
    /// before the write.
    pub async fn create_invoice(
        &self,
        supplier_id: i64,
        orders: Vec<OrderReference>,
    ) -> Result<Invoice, DomainError> {
        log::info!("Creating invoice for supplier {}", supplier_id);

        if !self.suppliers.exists(supplier_id).await? {
            return Err(DomainError::invalid(format!(
                "Supplier with id {} does not exist",
                supplier_id
            )));
        }
        validate_order_references(&orders)?;

        for order in &orders {
            match self.orders.verify(order.order_id).await {
                OrderVerification::Exists => {}
                OrderVerification::NotFound => log::warn!(
                    "Order {} not found in order service, invoicing it anyway",
                    order.order_id
                ),
                OrderVerification::Unknown => log::warn!(
                    "Order {} could not be verified, invoicing it anyway",
                    order.order_id
                ),
            }
        }

        let subtotal: BigDecimal = orders.iter().map(|o| &o.total).sum();
        let total = self.discounts.apply(&subtotal);
        if !fits_amount_column(&total) {
            return Err(DomainError::invalid(format!(
                "Invoice total {} exceeds the maximum of {}",
                total, MAX_AMOUNT
            )));
        }

        let invoice = self
            .invoices
            .create(NewInvoice {
                supplier_id,
                orders,
                total,
            })
            .await?;

        log::info!(
            "Invoice {} created: subtotal {}, total {}",
            invoice.id,
            subtotal,
            invoice.total
        );
        Ok(invoice)
    }

    pub async fn get_invoice(&self, id: i64) -> Result<Invoice, DomainError> {
        self.invoices
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Invoice",
                id,
            })
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, DomainError> {
        self.invoices.list().await
    }

    pub async fn list_invoices_for_supplier(
        &self,
        supplier_id: i64,
    ) -> Result<Vec<Invoice>, DomainError> {
        self.invoices.list_by_supplier(supplier_id).await
    }

    pub async fn list_invoices_by_status(
        &self,
        status: InvoiceStatus,
    ) -> Result<Vec<Invoice>, DomainError> {
        self.invoices.list_by_status(status).await
    }

    /// Removes the invoice together with its order references.
    pub async fn delete_invoice(&self, id: i64) -> Result<(), DomainError> {
        if self.invoices.delete(id).await? {
            log::info!("Invoice {} deleted", id);
            Ok(())
        } else {
            Err(DomainError::NotFound {
                entity: "Invoice",
                id,
            })
        }
    }
}

fn validate_order_references(orders: &[OrderReference]) -> Result<(), DomainError> {
    if orders.is_empty() {
        return Err(DomainError::invalid(
            "An invoice must reference at least one order",
        ));
    }
    for order in orders {
        if order.total <= BigDecimal::zero() {
            return Err(DomainError::invalid(format!(
                "Order {} total must be greater than 0",
                order.order_id
            )));
        }
        // numeric(12, 2) would silently round anything finer
        if order.total.with_scale(2) != order.total {
            return Err(DomainError::invalid(format!(
                "Order {} total has more than two decimal places",
                order.order_id
            )));
        }
        if !fits_amount_column(&order.total) {
            return Err(DomainError::invalid(format!(
                "Order {} total exceeds the maximum of {}",
                order.order_id, MAX_AMOUNT
            )));
        }
    }
    Ok(())
}
