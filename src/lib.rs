pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{InvoiceService, SupplierService};
use domain::discount::DiscountPolicy;
use domain::ports::OrderVerifier;
use errors::AppError;
use infrastructure::{DieselInvoiceRepository, DieselSupplierRepository};

pub use config::AppConfig;
pub use db::{create_pool, DbPool};
pub use infrastructure::HttpOrderClient;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::delete_invoice,
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::list_supplier_invoices,
    ),
    components(schemas(
        handlers::invoices::CreateInvoiceRequest,
        handlers::invoices::OrderReferenceRequest,
        handlers::invoices::InvoiceResponse,
        handlers::invoices::OrderReferenceResponse,
        handlers::suppliers::CreateSupplierRequest,
        handlers::suppliers::SupplierResponse,
        domain::invoice::InvoiceStatus,
        errors::ErrorResponse,
    )),
    tags(
        (name = "facturas", description = "Supplier invoices"),
        (name = "proveedores", description = "Supplier registry"),
    )
)]
pub struct ApiDoc;

/// Services shared by every worker of the HTTP server.
#[derive(Clone)]
pub struct AppServices {
    pub suppliers: SupplierService,
    pub invoices: InvoiceService,
}

impl AppServices {
    /// Wires the Diesel repositories on `pool` with the given order verifier.
    pub fn new(pool: DbPool, orders: Arc<dyn OrderVerifier>, discounts: DiscountPolicy) -> Self {
        let suppliers = Arc::new(DieselSupplierRepository::new(pool.clone()));
        let invoices = Arc::new(DieselInvoiceRepository::new(pool));
        Self {
            suppliers: SupplierService::new(suppliers.clone()),
            invoices: InvoiceService::new(suppliers, invoices, orders, discounts),
        }
    }

    /// Registers shared state, extractor error handlers, routes and the
    /// Swagger UI.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.suppliers.clone()))
            .app_data(web::Data::new(self.invoices.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Malformed request body: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid query: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid path: {}", err)).into()
            }))
            .service(
                web::scope("/facturas")
                    .route("", web::post().to(handlers::invoices::create_invoice))
                    .route("", web::get().to(handlers::invoices::list_invoices))
                    .route("/{id}", web::get().to(handlers::invoices::get_invoice))
                    .route("/{id}", web::delete().to(handlers::invoices::delete_invoice)),
            )
            .service(
                web::scope("/api/proveedores")
                    .route("", web::post().to(handlers::suppliers::create_supplier))
                    .route("", web::get().to(handlers::suppliers::list_suppliers))
                    .route("/{id}", web::get().to(handlers::suppliers::get_supplier))
                    .route(
                        "/{id}/facturas",
                        web::get().to(handlers::suppliers::list_supplier_invoices),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
    }
}

/// Cross-origin policy for browser clients: only `allowed_origins`, with
/// credentials, any request header and a one hour preflight cache.
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    services: AppServices,
    cors_origins: Vec<String>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_origins))
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .bind((host.to_string(), port))?
    .run())
}
