use serde::{Deserialize, Serialize};

/// Read-only view over a consolidated catalog entry, shared by both source
/// variants so faceting and filtering can run over either.
pub trait Catalogued {
    fn min_price(&self) -> f64;
    fn max_price(&self) -> f64;
    fn stock_statuses(&self) -> &[String];
    fn shops(&self) -> &[String];
    fn brand(&self) -> &str;
    fn color(&self) -> &str;
}

/// A phone consolidated from one or more [`ShopListing`](crate::ShopListing)s
/// sharing the same model, brand, ram, storage, color and options.
///
/// The per-listing vectors are parallel: index `i` of `ad_urls`, `shops`,
/// `stock_statuses`, `scrape_dates` and `all_prices` describe the same listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "modele")]
    pub model: String,
    #[serde(rename = "marque")]
    pub brand: String,
    pub ram: String,
    #[serde(rename = "stockage")]
    pub storage: String,
    #[serde(rename = "couleur")]
    pub color: String,
    pub options: String,
    pub reference_global: String,
    pub reference_detail: String,
    pub ad_title: String,
    #[serde(rename = "ad_url")]
    pub ad_urls: Vec<String>,
    #[serde(rename = "shop")]
    pub shops: Vec<String>,
    #[serde(rename = "ad_stocks")]
    pub stock_statuses: Vec<String>,
    #[serde(rename = "date_scrapy")]
    pub scrape_dates: Vec<String>,
    pub all_prices: Vec<f64>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Product {
    /// Number of listings merged into this product.
    #[must_use]
    pub fn listing_count(&self) -> usize {
        self.all_prices.len()
    }
}

impl Catalogued for Product {
    fn min_price(&self) -> f64 {
        self.min_price
    }

    fn max_price(&self) -> f64 {
        self.max_price
    }

    fn stock_statuses(&self) -> &[String] {
        &self.stock_statuses
    }

    fn shops(&self) -> &[String] {
        &self.shops
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn color(&self) -> &str {
        &self.color
    }
}

/// A phone from the price-comparator dataset, normalized from a single
/// [`ComparatorListing`](crate::ComparatorListing).
///
/// `shops`, `ad_titles`, `stock_statuses` and `detail_prices` are parallel
/// and hold at most one entry per shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorProduct {
    #[serde(rename = "titre_article")]
    pub title: String,
    pub ad_href: String,
    pub ad_image: String,
    #[serde(rename = "description_article")]
    pub description: String,
    #[serde(rename = "prix_detail")]
    pub detail_prices: Vec<f64>,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(rename = "shop")]
    pub shops: Vec<String>,
    pub ad_titles: Vec<String>,
    #[serde(rename = "stocks")]
    pub stock_statuses: Vec<String>,
    #[serde(rename = "marque")]
    pub brand: String,
    #[serde(rename = "couleur")]
    pub color: String,
    #[serde(rename = "modele")]
    pub model: String,
}

impl Catalogued for ComparatorProduct {
    fn min_price(&self) -> f64 {
        self.min_price
    }

    fn max_price(&self) -> f64 {
        self.max_price
    }

    fn stock_statuses(&self) -> &[String] {
        &self.stock_statuses
    }

    fn shops(&self) -> &[String] {
        &self.shops
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn color(&self) -> &str {
        &self.color
    }
}
