use auction_lifecycle::{
    build_router,
    config::AppConfig,
    jobs::auction_recovery::recover_pending_closures,
    services::{auction_store::SeaOrmAuctionStore, lifecycle::LifecycleScheduler},
    AppState,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,auction_lifecycle=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        auction_interval_ms = config.lifecycle.auction_interval.as_millis() as u64,
        "Loaded configuration"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let store = Arc::new(SeaOrmAuctionStore::new(db));
    let scheduler = LifecycleScheduler::new(store, config.lifecycle);

    // Re-arm closures lost with the previous process
    if let Err(e) = recover_pending_closures(&scheduler).await {
        tracing::error!(error = %e, "Failed to recover pending auction closures");
    }

    let app = build_router(AppState { scheduler });

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        "Server listening on {}",
        listener.local_addr().expect("Listener has no local address")
    );

    axum::serve(listener, app).await.expect("Server error");
}
