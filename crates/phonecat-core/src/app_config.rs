use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding the shop-scrape CSV exports (variant A).
    pub shop_data_dir: PathBuf,
    /// Directory holding the price-comparator CSV exports (variant B).
    pub comparator_data_dir: PathBuf,
    /// Optional YAML override for the built-in brand/color lexicon.
    pub lexicon_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}
