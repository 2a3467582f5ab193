pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod mappers;
pub mod models;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::beer_order_service::BeerOrderService;
use application::beer_service::BeerService;
use application::customer_service::CustomerService;
use domain::errors::DomainError;
use infrastructure::beer_repo::DieselBeerRepository;
use infrastructure::order_repo::{DieselBeerOrderRepository, DieselCustomerRepository};

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), DomainError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::Internal(format!("database migrations failed: {}", e)))?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let beers = web::Data::new(BeerService::new(DieselBeerRepository::new(pool.clone())));
    let customers = web::Data::new(CustomerService::new(DieselCustomerRepository::new(
        pool.clone(),
    )));
    let orders = web::Data::new(BeerOrderService::new(
        DieselBeerOrderRepository::new(pool.clone()),
        DieselCustomerRepository::new(pool),
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(beers.clone())
            .app_data(customers.clone())
            .app_data(orders.clone())
            .wrap(Logger::default())
            .configure(
                handlers::configure::<
                    DieselBeerRepository,
                    DieselCustomerRepository,
                    DieselBeerOrderRepository,
                >,
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", handlers::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
