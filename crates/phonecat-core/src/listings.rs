use serde::{Deserialize, Serialize};

/// One row of the shop-scrape dataset: an advertisement for a phone on a
/// single shop, with attribute columns already split out by the scraper.
///
/// Every column is optional on input; missing or null cells become `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopListing {
    pub reference_global: String,
    pub reference_detail: String,
    pub ad_title: String,
    pub ad_url: String,
    pub shop: String,
    pub modele: String,
    pub marque: String,
    pub ram: String,
    pub stockage: String,
    pub couleur: String,
    pub options: String,
    /// Raw price text, e.g. `"1 299 DT"`.
    pub ad_price: String,
    pub ad_stocks: String,
    pub date_scrapy: String,
}

/// One row of the price-comparator dataset: a phone compared across several
/// shops, with the per-shop values packed into comma-separated cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorListing {
    pub titre_article: String,
    pub ad_href: String,
    pub ad_image: String,
    pub description_article: String,
    /// Lowest advertised price, raw text.
    pub price: String,
    /// One raw price per shop, comma-separated.
    pub prix_detail: String,
    /// `shop:ad title` pairs, comma-separated.
    pub fournisseur: String,
    /// One stock status per shop, comma-separated.
    pub stocks: String,
}
