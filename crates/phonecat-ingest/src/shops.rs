//! Reader for the shop-scrape dataset.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use phonecat_core::ShopListing;

use crate::error::IngestError;
use crate::files::{read_dir_records, read_records, STREAM_LABEL};

const RETIRED: &str = "retired";

/// Columns identifying one listing across repeated scrapes.
type ScrapeKey = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn scrape_key(row: &ShopListing) -> ScrapeKey {
    (
        row.reference_detail.clone(),
        row.ad_title.clone(),
        row.ad_url.clone(),
        row.shop.clone(),
        row.modele.clone(),
        row.marque.clone(),
        row.ram.clone(),
        row.stockage.clone(),
        row.couleur.clone(),
        row.options.clone(),
    )
}

/// Reads every `*.csv` file in `dir` and returns the latest scrape of each
/// listing. See [`read_shop_listings_from`] for the row rules.
///
/// # Errors
///
/// Returns [`IngestError`] when the directory or a file cannot be read or a
/// file is not valid CSV.
pub fn read_shop_listings(dir: &Path) -> Result<Vec<ShopListing>, IngestError> {
    let rows = read_dir_records(dir, true)?;
    Ok(latest_scrapes(rows, dir))
}

/// Reads shop listings from one CSV stream.
///
/// Headers are reduced to their last dot-separated segment. Rows marked
/// `retired` are dropped, and rows repeating the same listing collapse into
/// one carrying the most recent `reference_global`, `ad_price` and
/// `ad_stocks` plus the latest `date_scrapy`. Output is ordered by listing
/// identity.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] when the stream is not valid CSV.
pub fn read_shop_listings_from<R: Read>(reader: R) -> Result<Vec<ShopListing>, IngestError> {
    let origin = Path::new(STREAM_LABEL);
    let rows = read_records(reader, origin, true)?;
    Ok(latest_scrapes(rows, origin))
}

fn latest_scrapes(mut rows: Vec<ShopListing>, origin: &Path) -> Vec<ShopListing> {
    let total = rows.len();
    rows.retain(|row| row.ad_stocks != RETIRED);
    if rows.is_empty() {
        tracing::info!(source = %origin.display(), "no shop listings to process");
        return rows;
    }

    // Stable, so equal dates keep file order and the first file wins.
    rows.sort_by(|a, b| b.date_scrapy.cmp(&a.date_scrapy));

    let retained = rows.len();
    let mut latest: BTreeMap<ScrapeKey, ShopListing> = BTreeMap::new();
    for row in rows {
        latest.entry(scrape_key(&row)).or_insert(row);
    }

    tracing::info!(
        source = %origin.display(),
        total,
        retired = total - retained,
        listings = latest.len(),
        "loaded shop listings"
    );

    latest.into_values().collect()
}
