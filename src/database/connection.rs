//! PostgreSQL connection
//!
//! Opens the pool and applies the embedded migrations.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Connect using `config`, logging a masked URL
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🗄️ Connecting to {}", mask_database_url(&config.url));
    let pool = config.create_pool().await?;
    info!("✅ Database connected (max {} connections)", config.max_connections);
    Ok(pool)
}

/// Run the migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("🔄 Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Migrations applied");
    Ok(())
}

/// Hide credentials in a database URL before logging it
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
}
