use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use invoicing_service::{build_server, create_pool, run_migrations, AppConfig, AppServices, HttpOrderClient};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let orders = HttpOrderClient::new(&config.order_service_url, config.order_service_timeout)
        .map_err(io::Error::other)?;
    log::info!(
        "Verifying orders against {} (timeout {:?})",
        config.order_service_url,
        config.order_service_timeout
    );

    let services = AppServices::new(pool, Arc::new(orders), config.discount_policy);

    log::info!("CORS allowed origins: {:?}", config.cors_allowed_origins);
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(services, config.cors_allowed_origins, &config.host, config.port)?.await
}
