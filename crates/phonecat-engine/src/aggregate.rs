//! Consolidation of shop listings into products.

use std::collections::HashMap;

use phonecat_core::{Product, ShopListing, PAGE_CAP};

use crate::error::{BatchOutcome, RowError, SkipStats};
use crate::normalize::clean_price;

/// Identity of a product: listings agreeing on all six attributes are the
/// same phone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProductKey {
    model: String,
    brand: String,
    ram: String,
    storage: String,
    color: String,
    options: String,
}

impl ProductKey {
    fn of(listing: &ShopListing) -> Self {
        Self {
            model: listing.modele.clone(),
            brand: listing.marque.clone(),
            ram: listing.ram.clone(),
            storage: listing.stockage.clone(),
            color: listing.couleur.clone(),
            options: listing.options.clone(),
        }
    }
}

/// What happened to a listing handed to [`Aggregator::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The listing started a new product.
    Created,
    /// The listing was merged into an existing product.
    Merged,
    /// The listing belongs to a new product but the cap is already reached.
    DroppedAtCap,
}

/// Single-pass grouping of [`ShopListing`]s into [`Product`]s.
///
/// At most `cap` distinct products are created; once full, listings for
/// unseen products are dropped while listings for known products keep
/// merging.
#[derive(Debug)]
pub struct Aggregator {
    products: Vec<Product>,
    index: HashMap<ProductKey, usize>,
    cap: usize,
    skipped: SkipStats,
    dropped_at_cap: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::with_cap(PAGE_CAP)
    }
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            cap,
            skipped: SkipStats::default(),
            dropped_at_cap: 0,
        }
    }

    /// Number of distinct products accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.products.len() >= self.cap
    }

    /// Merges one listing.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::InvalidPrice`] if the listing's price cannot be
    /// parsed. The error is also tallied in the skip statistics.
    pub fn push(&mut self, listing: &ShopListing) -> Result<MergeOutcome, RowError> {
        let price = clean_price(&listing.ad_price).inspect_err(|e| self.skipped.record(e))?;
        let key = ProductKey::of(listing);

        if let Some(&slot) = self.index.get(&key) {
            let product = &mut self.products[slot];
            product.ad_urls.push(listing.ad_url.clone());
            product.shops.push(listing.shop.clone());
            product.stock_statuses.push(listing.ad_stocks.clone());
            product.scrape_dates.push(listing.date_scrapy.clone());
            product.all_prices.push(price);
            product.min_price = product.min_price.min(price);
            product.max_price = product.max_price.max(price);
            return Ok(MergeOutcome::Merged);
        }

        if self.is_full() {
            self.dropped_at_cap += 1;
            return Ok(MergeOutcome::DroppedAtCap);
        }

        self.index.insert(key, self.products.len());
        self.products.push(Product {
            model: listing.modele.clone(),
            brand: listing.marque.clone(),
            ram: listing.ram.clone(),
            storage: listing.stockage.clone(),
            color: listing.couleur.clone(),
            options: listing.options.clone(),
            reference_global: listing.reference_global.clone(),
            reference_detail: listing.reference_detail.clone(),
            ad_title: listing.ad_title.clone(),
            ad_urls: vec![listing.ad_url.clone()],
            shops: vec![listing.shop.clone()],
            stock_statuses: vec![listing.ad_stocks.clone()],
            scrape_dates: vec![listing.date_scrapy.clone()],
            all_prices: vec![price],
            min_price: price,
            max_price: price,
        });
        Ok(MergeOutcome::Created)
    }

    /// Products in creation order plus the skip tally.
    #[must_use]
    pub fn finish(self) -> BatchOutcome<Product> {
        tracing::debug!(
            products = self.products.len(),
            skipped = self.skipped.total(),
            dropped_at_cap = self.dropped_at_cap,
            "aggregated shop listings"
        );
        BatchOutcome {
            items: self.products,
            skipped: self.skipped,
        }
    }
}

/// Groups shop listings into at most 180 products.
#[must_use]
pub fn aggregate(rows: &[ShopListing]) -> BatchOutcome<Product> {
    let mut aggregator = Aggregator::new();
    for (row, listing) in rows.iter().enumerate() {
        if let Err(error) = aggregator.push(listing) {
            tracing::warn!(row, %error, "skipping shop listing");
        }
    }
    aggregator.finish()
}
