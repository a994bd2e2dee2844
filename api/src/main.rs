//! B2B Commerce API Server
//!
//! Business accounts, a product catalog, and order placement with referral cashback.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresBusinessUserRepository, PostgresCategoryRepository, PostgresOfferRepository,
    PostgresOrderRepository, PostgresProductRepository,
};
use app::{BusinessUserService, CatalogService, OrderService};
use config::{Config, RateLimit};
use domain::ports::{
    BusinessUserRepository, CategoryRepository, OfferRepository, OrderRepository,
    ProductRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub business_user_service: Arc<BusinessUserService<dyn BusinessUserRepository>>,
    pub catalog_service:
        Arc<CatalogService<dyn CategoryRepository, dyn ProductRepository, dyn OfferRepository>>,
    pub order_service: Arc<
        OrderService<dyn BusinessUserRepository, dyn ProductRepository, dyn OrderRepository>,
    >,
}

impl AppState {
    /// Wire services over one set of repositories
    pub fn new(
        users: Arc<dyn BusinessUserRepository>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        offers: Arc<dyn OfferRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            business_user_service: Arc::new(BusinessUserService::new(users.clone())),
            catalog_service: Arc::new(CatalogService::new(categories, products.clone(), offers)),
            order_service: Arc::new(OrderService::new(users, products, orders)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router; phone lookups are rate limited per peer IP when `rate_limit` is set
pub fn build_router(state: AppState, rate_limit: Option<RateLimit>) -> anyhow::Result<Router> {
    // Phone lookups allow enumerating accounts
    let mut lookup_routes = Router::new()
        .route("/get_user_by_phone/", post(handlers::lookup_user_by_phone))
        .route(
            "/business_user/:phone/",
            get(handlers::get_business_user_by_phone)
                .delete(handlers::delete_business_user_by_phone),
        );

    if let Some(limit) = rate_limit {
        // PeerIpKeyExtractor reads the socket address, so the server must be
        // started with connect info
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(limit.per_second)
                .burst_size(limit.burst_size)
                .finish()
                .context("invalid lookup rate limit")?,
        );
        lookup_routes = lookup_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let app = Router::new()
        .route("/health", get(health))
        // Order workflow
        .route("/orders/create_order/", post(handlers::create_order))
        .route(
            "/orders/by_customer/:company_name/",
            get(handlers::orders_by_customer),
        )
        .merge(lookup_routes)
        // Business users
        .route(
            "/business_users/",
            get(handlers::list_business_users).post(handlers::create_business_user),
        )
        .route(
            "/business_users/:id/",
            get(handlers::get_business_user)
                .put(handlers::put_business_user)
                .patch(handlers::patch_business_user)
                .delete(handlers::delete_business_user),
        )
        // Catalog
        .route(
            "/categories/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/:id/",
            get(handlers::get_category)
                .put(handlers::put_category)
                .patch(handlers::patch_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/products/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id/",
            get(handlers::get_product)
                .put(handlers::put_product)
                .patch(handlers::patch_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/offers/",
            get(handlers::list_offers).post(handlers::create_offer),
        )
        .route(
            "/offers/:id/",
            get(handlers::get_offer)
                .put(handlers::put_offer)
                .patch(handlers::patch_offer)
                .delete(handlers::delete_offer),
        )
        // Orders
        .route("/orders/", get(handlers::list_orders))
        .route(
            "/orders/:id/",
            get(handlers::get_order)
                .patch(handlers::patch_order)
                .delete(handlers::delete_order),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,b2b_commerce_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting B2B Commerce API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters and services
    let state = AppState::new(
        Arc::new(PostgresBusinessUserRepository::new(db.clone())),
        Arc::new(PostgresCategoryRepository::new(db.clone())),
        Arc::new(PostgresProductRepository::new(db.clone())),
        Arc::new(PostgresOfferRepository::new(db.clone())),
        Arc::new(PostgresOrderRepository::new(db)),
    );

    match config.rate_limit {
        Some(limit) => tracing::info!(
            per_second = limit.per_second,
            burst = limit.burst_size,
            "Phone lookup rate limiting enabled"
        ),
        None => tracing::warn!("Phone lookup rate limiting disabled"),
    }

    let app = build_router(state, config.rate_limit)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
