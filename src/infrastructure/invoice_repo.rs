use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::invoice::{Invoice, InvoiceStatus, NewInvoice, OrderReference};
use crate::domain::ports::InvoiceRepository;
use crate::schema::{facturas, pedidos_referencias};

use super::models::{InvoiceRow, NewInvoiceRow, NewOrderReferenceRow, OrderReferenceRow};
use super::with_conn;

#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_invoice(row: InvoiceRow, lines: Vec<OrderReferenceRow>) -> Result<Invoice, DomainError> {
    let status = row
        .status
        .parse::<InvoiceStatus>()
        .map_err(DomainError::Storage)?;
    Ok(Invoice {
        id: row.id,
        supplier_id: row.supplier_id,
        orders: lines
            .into_iter()
            .map(|l| OrderReference {
                order_id: l.order_id,
                total: l.total,
            })
            .collect(),
        total: row.total,
        created_at: row.created_at,
        status,
    })
}

/// Loads the order references of `rows` in one query and attaches them,
/// keeping insertion order within each invoice.
fn hydrate(conn: &mut PgConnection, rows: Vec<InvoiceRow>) -> Result<Vec<Invoice>, DomainError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let lines = pedidos_referencias::table
        .filter(pedidos_referencias::factura_id.eq_any(ids))
        .select(OrderReferenceRow::as_select())
        .order(pedidos_referencias::id.asc())
        .load(conn)?;

    let mut by_invoice: HashMap<i64, Vec<OrderReferenceRow>> = HashMap::new();
    for line in lines {
        by_invoice.entry(line.invoice_id).or_default().push(line);
    }

    rows.into_iter()
        .map(|row| {
            let lines = by_invoice.remove(&row.id).unwrap_or_default();
            to_invoice(row, lines)
        })
        .collect()
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError> {
        with_conn(&self.pool, move |conn| {
            conn.transaction::<_, DomainError, _>(|conn| {
                // 1. Insert the invoice header
                let header = diesel::insert_into(facturas::table)
                    .values(&NewInvoiceRow {
                        supplier_id: invoice.supplier_id,
                        total: invoice.total.clone(),
                        status: InvoiceStatus::Pending.as_str().to_string(),
                    })
                    .returning(InvoiceRow::as_returning())
                    .get_result::<InvoiceRow>(conn)?;

                // 2. Insert the order references, in input order
                let new_lines: Vec<NewOrderReferenceRow> = invoice
                    .orders
                    .iter()
                    .map(|o| NewOrderReferenceRow {
                        invoice_id: header.id,
                        order_id: o.order_id,
                        total: o.total.clone(),
                    })
                    .collect();
                let lines = diesel::insert_into(pedidos_referencias::table)
                    .values(&new_lines)
                    .returning(OrderReferenceRow::as_returning())
                    .get_results::<OrderReferenceRow>(conn)?;

                to_invoice(header, lines)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, DomainError> {
        with_conn(&self.pool, move |conn| {
            let row = facturas::table
                .find(id)
                .select(InvoiceRow::as_select())
                .first(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            Ok(hydrate(conn, vec![row])?.pop())
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        with_conn(&self.pool, |conn| {
            let rows = facturas::table
                .select(InvoiceRow::as_select())
                .order(facturas::id.asc())
                .load(conn)?;
            hydrate(conn, rows)
        })
        .await
    }

    async fn list_by_supplier(&self, supplier_id: i64) -> Result<Vec<Invoice>, DomainError> {
        with_conn(&self.pool, move |conn| {
            let rows = facturas::table
                .filter(facturas::proveedor_id.eq(supplier_id))
                .select(InvoiceRow::as_select())
                .order(facturas::id.asc())
                .load(conn)?;
            hydrate(conn, rows)
        })
        .await
    }

    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, DomainError> {
        with_conn(&self.pool, move |conn| {
            let rows = facturas::table
                .filter(facturas::estado.eq(status.as_str()))
                .select(InvoiceRow::as_select())
                .order(facturas::id.asc())
                .load(conn)?;
            hydrate(conn, rows)
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        with_conn(&self.pool, move |conn| {
            conn.transaction::<_, DomainError, _>(|conn| {
                diesel::delete(
                    pedidos_referencias::table.filter(pedidos_referencias::factura_id.eq(id)),
                )
                .execute(conn)?;
                let deleted = diesel::delete(facturas::table.find(id)).execute(conn)?;
                Ok(deleted > 0)
            })
        })
        .await
    }
}
