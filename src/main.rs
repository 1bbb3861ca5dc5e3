//! CMDB bootstrap: load configuration, connect, and bring the schema up to
//! date. The service crates carry the actual operations; this binary only
//! prepares a working database.

use anyhow::Result;
use tracing::{info, warn};

use common::utils::logging::init_logging_default;
use migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging_default();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    common::env::ensure_env(&config_path, "data").await?;

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config load failed ({e}); using defaults with environment overrides");
            let mut cfg = configs::AppConfig::default();
            cfg.normalize_and_validate()?;
            cfg
        }
    };

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(functions = ?cfg.inventory.functions, "cmdb schema ready");
    Ok(())
}
