use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Inventory-wide closed choice lists that the schema cannot express.
/// `functions` is the allowed value set for `asset.function`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { functions: default_functions() }
    }
}

fn default_functions() -> Vec<String> {
    ["WEB", "DB", "CACHE", "MQ", "BIGDATA", "OTHER"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        self.inventory.validate()?;
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML may omit the URL; fall back to the environment
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or via DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl InventoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.functions.is_empty() {
            return Err(anyhow!("inventory.functions must list at least one function"));
        }
        if self.functions.iter().any(|f| f.trim().is_empty()) {
            return Err(anyhow!("inventory.functions entries must be non-empty"));
        }
        Ok(())
    }

    pub fn is_valid_function(&self, value: &str) -> bool {
        self.functions.iter().any(|f| f == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inventory_accepts_web() {
        let inv = InventoryConfig::default();
        assert!(inv.is_valid_function("WEB"));
        assert!(!inv.is_valid_function("web"));
        assert!(inv.validate().is_ok());
    }

    #[test]
    fn database_url_scheme_checked() {
        let mut cfg = DatabaseConfig::default();
        cfg.url = "mysql://nope".into();
        cfg.min_connections = 1;
        cfg.max_connections = 2;
        cfg.connect_timeout_secs = 5;
        cfg.acquire_timeout_secs = 5;
        assert!(cfg.validate().is_err());
        cfg.url = "postgres://ok".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_function_list_rejected() {
        let inv = InventoryConfig { functions: vec![] };
        assert!(inv.validate().is_err());
    }
}
