//! Consolidation and faceted filtering over scraped phone listings.
//!
//! Listings enter through [`normalize`] (comparator rows) or [`aggregate`]
//! (shop rows) and leave as products; [`facets`], [`filter`] and
//! [`incremental`] then derive the filter metadata served to the front end.

pub mod aggregate;
pub mod error;
pub mod facets;
pub mod filter;
pub mod incremental;
pub mod normalize;

pub use aggregate::{aggregate, Aggregator, MergeOutcome};
pub use error::{BatchOutcome, RowError, SkipStats};
pub use facets::{extract_facets_counted, extract_facets_full};
pub use filter::{apply_filters, filter_listings, listing_matches, matches};
pub use incremental::update_facets;
pub use normalize::{clean_price, normalize_all, normalize_page, split_supplier, Normalizer};
