use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::InvoiceService;
use crate::domain::invoice::{fits_amount_column, Invoice, InvoiceStatus, OrderReference};
use crate::errors::{AppError, ErrorResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderReferenceRequest {
    #[serde(rename = "pedidoId")]
    #[validate(required(message = "El ID del pedido es obligatorio"))]
    pub order_id: Option<i64>,
    /// Decimal amount as a string to avoid floating-point issues, e.g. "100.00"
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(example = "100.00")]
    pub total: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInvoiceRequest {
    #[serde(rename = "proveedorId")]
    #[validate(required(message = "El ID del proveedor es obligatorio"))]
    pub supplier_id: Option<i64>,
    #[serde(rename = "pedidos", default)]
    #[validate(
        length(min = 1, message = "La factura debe tener al menos un pedido"),
        nested
    )]
    pub orders: Vec<OrderReferenceRequest>,
}

fn validate_positive_amount(value: &str) -> Result<(), ValidationError> {
    let mut err = ValidationError::new("amount");
    match BigDecimal::from_str(value.trim()) {
        Ok(amount) if amount <= BigDecimal::zero() => {
            err.message = Some("El total debe ser mayor a 0".into());
            Err(err)
        }
        Ok(amount) if !fits_amount_column(&amount) => {
            err.message = Some("El total excede el máximo permitido".into());
            Err(err)
        }
        Ok(_) => Ok(()),
        Err(_) => {
            err.message = Some("El total debe ser un número decimal".into());
            Err(err)
        }
    }
}

impl CreateInvoiceRequest {
    fn into_domain(self) -> Result<(i64, Vec<OrderReference>), AppError> {
        let supplier_id = self
            .supplier_id
            .ok_or_else(|| AppError::BadRequest("El ID del proveedor es obligatorio".into()))?;
        let orders = self
            .orders
            .into_iter()
            .map(|o| {
                let order_id = o
                    .order_id
                    .ok_or_else(|| AppError::BadRequest("El ID del pedido es obligatorio".into()))?;
                let total = BigDecimal::from_str(o.total.trim()).map_err(|e| {
                    AppError::BadRequest(format!("Invalid total '{}': {}", o.total, e))
                })?;
                Ok(OrderReference { order_id, total })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok((supplier_id, orders))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderReferenceResponse {
    #[serde(rename = "pedidoId")]
    pub order_id: i64,
    #[schema(value_type = String, example = "100.00")]
    pub total: BigDecimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: i64,
    #[serde(rename = "proveedorId")]
    pub supplier_id: i64,
    #[serde(rename = "pedidos")]
    pub orders: Vec<OrderReferenceResponse>,
    #[serde(rename = "totalFactura")]
    #[schema(value_type = String, example = "315.00")]
    pub total: BigDecimal,
    #[serde(rename = "fechaFactura")]
    pub created_at: String,
    #[serde(rename = "estado")]
    pub status: InvoiceStatus,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        InvoiceResponse {
            id: invoice.id,
            supplier_id: invoice.supplier_id,
            orders: invoice
                .orders
                .into_iter()
                .map(|o| OrderReferenceResponse {
                    order_id: o.order_id,
                    total: o.total,
                })
                .collect(),
            total: invoice.total,
            created_at: invoice.created_at.to_rfc3339(),
            status: invoice.status,
        }
    }
}

pub(crate) fn to_responses(invoices: Vec<Invoice>) -> Vec<InvoiceResponse> {
    invoices.into_iter().map(InvoiceResponse::from).collect()
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInvoicesParams {
    /// Only invoices in this status.
    pub estado: Option<InvoiceStatus>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /facturas
///
/// Issues an invoice for an existing supplier. Referenced orders are checked
/// against the order service on a best-effort basis; the total is the sum of
/// the order totals after the tiered discount.
#[utoipa::path(
    post,
    path = "/facturas",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "facturas"
)]
pub async fn create_invoice(
    service: web::Data<InvoiceService>,
    body: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;
    let (supplier_id, orders) = body.into_domain()?;

    let invoice = service.create_invoice(supplier_id, orders).await?;

    Ok(HttpResponse::Created().json(InvoiceResponse::from(invoice)))
}

/// GET /facturas
///
/// Lists every invoice ordered by id, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/facturas",
    params(ListInvoicesParams),
    responses(
        (status = 200, description = "Invoices", body = [InvoiceResponse]),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "facturas"
)]
pub async fn list_invoices(
    service: web::Data<InvoiceService>,
    query: web::Query<ListInvoicesParams>,
) -> Result<HttpResponse, AppError> {
    let invoices = match query.into_inner().estado {
        Some(status) => service.list_invoices_by_status(status).await?,
        None => service.list_invoices().await?,
    };
    Ok(HttpResponse::Ok().json(to_responses(invoices)))
}

/// GET /facturas/{id}
#[utoipa::path(
    get,
    path = "/facturas/{id}",
    params(
        ("id" = i64, Path, description = "Invoice id"),
    ),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "facturas"
)]
pub async fn get_invoice(
    service: web::Data<InvoiceService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// DELETE /facturas/{id}
///
/// Deletes the invoice and its order references.
#[utoipa::path(
    delete,
    path = "/facturas/{id}",
    params(
        ("id" = i64, Path, description = "Invoice id"),
    ),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 404, description = "Invoice not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "facturas"
)]
pub async fn delete_invoice(
    service: web::Data<InvoiceService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_invoice(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
