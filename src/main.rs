use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use deal_machine::config::{DatabaseConfig, EnvironmentConfig};
use deal_machine::{create_router, database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Logging
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 Deal Machine - Wholesale Vehicle Auctions API");
    info!("================================================");

    // Database
    let db_config = DatabaseConfig::from_env()?;
    let pool = match database::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error connecting to the database: {}", e);
            return Err(e);
        }
    };
    database::run_migrations(&pool).await?;

    if config.admin_api_key.is_none() {
        if config.is_production() {
            anyhow::bail!("ADMIN_API_KEY must be set in production");
        }
        warn!("⚠️ ADMIN_API_KEY not set, admin routes are open");
    }

    let app_state = AppState::new(pool, config.clone())?;
    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Public endpoints:");
    info!("   GET   /health - Health check");
    info!("   GET   /api/listings - Live listings");
    info!("   GET   /api/listings/:id - Vehicle detail");
    info!("   GET   /api/results - Past sale results");
    info!("📅 Admin - Sale events:");
    info!("   GET   /api/sale-events - List sale events");
    info!("   POST  /api/sale-events - Create sale event");
    info!("   GET   /api/sale-events/:id - Sale event with vehicles");
    info!("   PATCH /api/sale-events/:id - Update sale event");
    info!("🚙 Admin - Vehicles:");
    info!("   GET   /api/vehicles - List vehicles");
    info!("   POST  /api/vehicles - Create vehicle");
    info!("   GET   /api/vehicles/:id - Get vehicle");
    info!("   PATCH /api/vehicles/:id - Update vehicle");
    info!("   POST  /api/vehicles/:id/sell - Mark sold");
    info!("   POST  /api/vehicles/:id/relist - Relist sold vehicle");
    info!("🎬 Admin - Media:");
    info!("   GET   /api/vin-decode?vin= - Decode VIN");
    info!("   POST  /api/upload - Upload walkthrough video");
    info!("   POST  /api/analyze-video - AI condition disclosure");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Terminate signal received, shutting down...");
        },
    }
}
