use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::{facturas, pedidos_referencias, proveedores};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = proveedores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupplierRow {
    pub id: i64,
    #[diesel(column_name = nombre)]
    pub name: String,
    #[diesel(column_name = correo)]
    pub email: String,
    #[diesel(column_name = fecha_registro)]
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = proveedores)]
pub struct NewSupplierRow<'a> {
    #[diesel(column_name = nombre)]
    pub name: &'a str,
    #[diesel(column_name = correo)]
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = facturas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvoiceRow {
    pub id: i64,
    #[diesel(column_name = proveedor_id)]
    pub supplier_id: i64,
    #[diesel(column_name = total_factura)]
    pub total: BigDecimal,
    #[diesel(column_name = fecha_factura)]
    pub created_at: DateTime<Utc>,
    #[diesel(column_name = estado)]
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = facturas)]
pub struct NewInvoiceRow {
    #[diesel(column_name = proveedor_id)]
    pub supplier_id: i64,
    #[diesel(column_name = total_factura)]
    pub total: BigDecimal,
    #[diesel(column_name = estado)]
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pedidos_referencias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderReferenceRow {
    pub id: i64,
    #[diesel(column_name = factura_id)]
    pub invoice_id: i64,
    #[diesel(column_name = pedido_id)]
    pub order_id: i64,
    pub total: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pedidos_referencias)]
pub struct NewOrderReferenceRow {
    #[diesel(column_name = factura_id)]
    pub invoice_id: i64,
    #[diesel(column_name = pedido_id)]
    pub order_id: i64,
    pub total: BigDecimal,
}
