use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriceRangeError {
    #[error("price bounds must be finite numbers")]
    NotFinite,

    #[error("price range is not ascending: {min} > {max}")]
    Descending { min: f64, max: f64 },
}

/// Inclusive `[min, max]` price window, exchanged as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns [`PriceRangeError`] if either bound is NaN/infinite or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, PriceRangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PriceRangeError::NotFinite);
        }
        if min > max {
            return Err(PriceRangeError::Descending { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl TryFrom<[f64; 2]> for PriceRange {
    type Error = PriceRangeError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for [f64; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// The filter values currently chosen in the front end.
///
/// Every facet is a set: order on the wire is irrelevant and an empty set
/// means the facet is unrestricted. An absent price range is unrestricted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    #[serde(rename = "priceRange", skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    pub status: BTreeSet<String>,
    pub offer: BTreeSet<String>,
    pub ram: BTreeSet<String>,
    #[serde(rename = "stockage")]
    pub storage: BTreeSet<String>,
    pub shop: BTreeSet<String>,
    #[serde(rename = "marque")]
    pub brand: BTreeSet<String>,
    pub color: BTreeSet<String>,
}

impl FilterSelection {
    /// `true` when no facet or price restriction is set.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.price_range.is_none()
            && self.status.is_empty()
            && self.offer.is_empty()
            && self.ram.is_empty()
            && self.storage.is_empty()
            && self.shop.is_empty()
            && self.brand.is_empty()
            && self.color.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_rejects_descending_bounds() {
        assert_eq!(
            PriceRange::new(500.0, 100.0),
            Err(PriceRangeError::Descending {
                min: 500.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn price_range_rejects_nan() {
        assert_eq!(
            PriceRange::new(f64::NAN, 100.0),
            Err(PriceRangeError::NotFinite)
        );
    }

    #[test]
    fn price_range_contains_is_inclusive() {
        let range = PriceRange::new(100.0, 200.0).unwrap();
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.01));
        assert!(!range.contains(99.99));
    }

    #[test]
    fn selection_deserializes_front_end_payload() {
        let selection: FilterSelection = serde_json::from_str(
            r#"{
                "priceRange": [100, 900],
                "status": ["en stock"],
                "offer": [],
                "ram": ["4go"],
                "stockage": ["64gb", "128gb"],
                "shop": ["shop-b", "shop-a"],
                "marque": ["samsung"],
                "color": ["black"]
            }"#,
        )
        .expect("deserialize");

        let range = selection.price_range.expect("price range");
        assert!((range.min() - 100.0).abs() < f64::EPSILON);
        assert!((range.max() - 900.0).abs() < f64::EPSILON);
        assert!(selection.status.contains("en stock"));
        assert!(selection.offer.is_empty());
        assert_eq!(selection.storage.len(), 2);
        assert!(selection.brand.contains("samsung"));
    }

    #[test]
    fn selection_absent_keys_are_unrestricted() {
        let selection: FilterSelection = serde_json::from_str("{}").expect("deserialize");
        assert!(selection.is_unrestricted());
    }

    #[test]
    fn selection_rejects_descending_price_range() {
        let result = serde_json::from_str::<FilterSelection>(r#"{"priceRange": [900, 100]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn selection_sets_compare_ignoring_order() {
        let a: FilterSelection =
            serde_json::from_str(r#"{"shop": ["shop-a", "shop-b"]}"#).expect("a");
        let b: FilterSelection =
            serde_json::from_str(r#"{"shop": ["shop-b", "shop-a", "shop-a"]}"#).expect("b");
        assert_eq!(a.shop, b.shop);
    }

    #[test]
    fn selection_serializes_price_range_as_pair() {
        let selection = FilterSelection {
            price_range: Some(PriceRange::new(10.0, 20.0).unwrap()),
            ..FilterSelection::default()
        };
        let json = serde_json::to_value(&selection).expect("serialize");
        assert_eq!(json["priceRange"], serde_json::json!([10.0, 20.0]));
        assert_eq!(json["marque"], serde_json::json!([]));
    }
}
