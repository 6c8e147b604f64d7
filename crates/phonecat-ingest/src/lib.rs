//! CSV ingestion for the shop-scrape and price-comparator datasets.

pub mod comparator;
pub mod error;
mod files;
pub mod shops;

pub use comparator::{read_comparator_listings, read_comparator_listings_from};
pub use error::IngestError;
pub use shops::{read_shop_listings, read_shop_listings_from};
