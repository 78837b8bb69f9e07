use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::{InvoiceService, SupplierService};
use crate::domain::supplier::Supplier;
use crate::errors::{AppError, ErrorResponse};

use super::invoices::{to_responses, InvoiceResponse};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    #[serde(rename = "nombre", default)]
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Distribuidora Andina")]
    pub name: String,
    #[serde(rename = "correo", default)]
    #[validate(email(message = "El correo debe ser válido"))]
    #[schema(example = "ventas@andina.com")]
    pub email: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("El nombre es obligatorio".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierResponse {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "fechaRegistro")]
    pub registered_at: String,
}

impl From<Supplier> for SupplierResponse {
    fn from(s: Supplier) -> Self {
        SupplierResponse {
            id: s.id,
            name: s.name,
            email: s.email,
            registered_at: s.registered_at.to_rfc3339(),
        }
    }
}

/// POST /api/proveedores
#[utoipa::path(
    post,
    path = "/api/proveedores",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier registered", body = SupplierResponse),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "proveedores"
)]
pub async fn create_supplier(
    service: web::Data<SupplierService>,
    body: web::Json<CreateSupplierRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let supplier = service.create_supplier(&body.name, &body.email).await?;

    Ok(HttpResponse::Created().json(SupplierResponse::from(supplier)))
}

/// GET /api/proveedores
#[utoipa::path(
    get,
    path = "/api/proveedores",
    responses(
        (status = 200, description = "Registered suppliers", body = [SupplierResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "proveedores"
)]
pub async fn list_suppliers(service: web::Data<SupplierService>) -> Result<HttpResponse, AppError> {
    let suppliers: Vec<SupplierResponse> = service
        .list_suppliers()
        .await?
        .into_iter()
        .map(SupplierResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(suppliers))
}

/// GET /api/proveedores/{id}
#[utoipa::path(
    get,
    path = "/api/proveedores/{id}",
    params(
        ("id" = i64, Path, description = "Supplier id"),
    ),
    responses(
        (status = 200, description = "Supplier found", body = SupplierResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "proveedores"
)]
pub async fn get_supplier(
    service: web::Data<SupplierService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let supplier = service.get_supplier(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SupplierResponse::from(supplier)))
}

/// GET /api/proveedores/{id}/facturas
///
/// Invoices issued to the supplier, ordered by id. 404 when the supplier
/// itself is unknown.
#[utoipa::path(
    get,
    path = "/api/proveedores/{id}/facturas",
    params(
        ("id" = i64, Path, description = "Supplier id"),
    ),
    responses(
        (status = 200, description = "Invoices of the supplier", body = [InvoiceResponse]),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "proveedores"
)]
pub async fn list_supplier_invoices(
    suppliers: web::Data<SupplierService>,
    invoices: web::Data<InvoiceService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let supplier = suppliers.get_supplier(path.into_inner()).await?;
    let found = invoices.list_invoices_for_supplier(supplier.id).await?;
    Ok(HttpResponse::Ok().json(to_responses(found)))
}
