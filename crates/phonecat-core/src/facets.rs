use serde::{Deserialize, Serialize};

/// One counted facet bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: usize,
}

/// Filter metadata surfaced to the front end: price bounds plus the values
/// available for each facet.
///
/// `V` is `String` for the full-table listing ([`FacetValues`]) and
/// [`FacetCount`] for the counted listing ([`FacetCounts`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSnapshot<V> {
    #[serde(rename = "min_ad_price")]
    pub min_price: f64,
    #[serde(rename = "max_ad_price")]
    pub max_price: f64,
    pub ram: Vec<V>,
    #[serde(rename = "stockage")]
    pub storage: Vec<V>,
    #[serde(rename = "ad_stocks")]
    pub stock_status: Vec<V>,
    #[serde(rename = "couleur")]
    pub color: Vec<V>,
    pub shop: Vec<V>,
    #[serde(rename = "marque")]
    pub brand: Vec<V>,
}

pub type FacetValues = FacetSnapshot<String>;
pub type FacetCounts = FacetSnapshot<FacetCount>;

impl<V> Default for FacetSnapshot<V> {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: 0.0,
            ram: Vec::new(),
            storage: Vec::new(),
            stock_status: Vec::new(),
            color: Vec::new(),
            shop: Vec::new(),
            brand: Vec::new(),
        }
    }
}

impl<V> FacetSnapshot<V> {
    /// `true` for the zeroed snapshot produced from an empty dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ram.is_empty()
            && self.storage.is_empty()
            && self.stock_status.is_empty()
            && self.color.is_empty()
            && self.shop.is_empty()
            && self.brand.is_empty()
    }
}
