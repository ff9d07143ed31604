use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Pgwire,
    JsonFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Fixture file read by the `json_file` store.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    #[serde(default = "max_per_page")]
    pub max_per_page: u32,
}

fn default_per_page() -> u32 {
    200
}

fn max_per_page() -> u32 {
    400
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: max_per_page(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub pagination: PaginationConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.store.kind {
            StoreKind::Pgwire if self.database.is_none() => {
                anyhow::bail!("store.kind = \"pgwire\" requires a [database] section")
            }
            StoreKind::JsonFile if self.store.path.is_none() => {
                anyhow::bail!("store.kind = \"json_file\" requires store.path")
            }
            _ => {}
        }

        let p = &self.pagination;
        if p.max_per_page == 0 || p.default_per_page == 0 || p.default_per_page > p.max_per_page {
            anyhow::bail!(
                "pagination.default_per_page ({}) must be within 1..={}",
                p.default_per_page,
                p.max_per_page
            );
        }

        Ok(())
    }
}
