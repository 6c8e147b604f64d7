pub mod app_config;
pub mod config;
pub mod facets;
pub mod lexicon;
pub mod listings;
pub mod products;
pub mod selection;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{FacetCount, FacetCounts, FacetSnapshot, FacetValues};
pub use lexicon::{load_lexicon, ColorAlias, Lexicon};
pub use listings::{ComparatorListing, ShopListing};
pub use products::{Catalogued, ComparatorProduct, Product};
pub use selection::{FilterSelection, PriceRange, PriceRangeError};

use thiserror::Error;

/// Maximum number of products returned by any aggregation or filter pass.
pub const PAGE_CAP: usize = 180;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read lexicon file {path}: {source}")]
    LexiconFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file: {0}")]
    LexiconFileParse(#[source] serde_yaml::Error),

    #[error("lexicon validation failed: {0}")]
    Validation(String),
}
