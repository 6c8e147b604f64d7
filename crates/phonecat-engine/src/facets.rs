//! Facet extraction: the filter metadata (distinct values, optional counts
//! and price bounds) derived from a dataset.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use phonecat_core::{Catalogued, FacetCount, FacetCounts, FacetValues, ShopListing};

use crate::normalize::clean_price;

/// Stock status the scraper writes for withdrawn ads; never offered as a facet.
const RETIRED_STATUS: &str = "RETIRED";

/// Builds the full-table facet listing over raw shop rows.
///
/// - ram: distinct values ending in `go`, ascending by their number
/// - storage: distinct values ending in `gb`, ascending by their number
/// - color, stock status, shop: distinct values, lexicographic
/// - brand: distinct values in first-seen order
///
/// Empty values are ignored everywhere. Rows with an unparseable price do
/// not contribute to the price bounds. An empty dataset yields a zeroed
/// snapshot.
#[must_use]
pub fn extract_facets_full(rows: &[ShopListing]) -> FacetValues {
    if rows.is_empty() {
        tracing::info!("no shop listings available for facet extraction");
        return FacetValues::default();
    }

    let (min_price, max_price) =
        price_bounds(rows.iter().filter_map(|r| clean_price(&r.ad_price).ok()));

    let mut ram = distinct_first_seen(rows.iter().map(|r| r.ram.as_str()));
    ram.retain(|v| v.ends_with("go"));
    sort_by_magnitude(&mut ram);

    let mut storage = distinct_first_seen(rows.iter().map(|r| r.stockage.as_str()));
    storage.retain(|v| v.ends_with("gb"));
    sort_by_magnitude(&mut storage);

    let mut stock_status = distinct_first_seen(rows.iter().map(|r| r.ad_stocks.as_str()));
    stock_status.retain(|v| v != RETIRED_STATUS);
    stock_status.sort();

    let mut color = distinct_first_seen(rows.iter().map(|r| r.couleur.as_str()));
    color.sort();

    let mut shop = distinct_first_seen(rows.iter().map(|r| r.shop.as_str()));
    shop.sort();

    // Brand keeps first-seen order.
    let brand = distinct_first_seen(rows.iter().map(|r| r.marque.as_str()));

    FacetValues {
        min_price,
        max_price,
        ram,
        storage,
        stock_status,
        color,
        shop,
        brand,
    }
}

/// Builds the counted facet listing over consolidated products.
///
/// A product counts once towards each distinct stock status and shop it
/// lists, and once towards its brand and color. Buckets are sorted by name.
/// Price bounds are the lowest `min_price` and highest `max_price`. ram and
/// storage are not counted and come back empty.
#[must_use]
pub fn extract_facets_counted<P: Catalogued>(products: &[P]) -> FacetCounts {
    if products.is_empty() {
        tracing::info!("no products available for facet counting");
        return FacetCounts::default();
    }

    let min_price = products
        .iter()
        .map(|p| p.min_price())
        .fold(f64::INFINITY, f64::min);
    let max_price = products
        .iter()
        .map(|p| p.max_price())
        .fold(f64::NEG_INFINITY, f64::max);

    FacetCounts {
        min_price,
        max_price,
        ram: Vec::new(),
        storage: Vec::new(),
        stock_status: count_stock_statuses(products),
        color: count_colors(products),
        shop: count_shops(products),
        brand: count_brands(products),
    }
}

pub(crate) fn count_stock_statuses<P: Catalogued>(products: &[P]) -> Vec<FacetCount> {
    count_values(products, |p| p.stock_statuses().iter().map(String::as_str))
}

pub(crate) fn count_shops<P: Catalogued>(products: &[P]) -> Vec<FacetCount> {
    count_values(products, |p| p.shops().iter().map(String::as_str))
}

pub(crate) fn count_brands<P: Catalogued>(products: &[P]) -> Vec<FacetCount> {
    count_values(products, |p| std::iter::once(p.brand()))
}

pub(crate) fn count_colors<P: Catalogued>(products: &[P]) -> Vec<FacetCount> {
    count_values(products, |p| std::iter::once(p.color()))
}

/// Counts, per non-empty value, how many products carry it at least once.
fn count_values<'a, P, F, I>(products: &'a [P], values_of: F) -> Vec<FacetCount>
where
    F: Fn(&'a P) -> I,
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product in products {
        let distinct: BTreeSet<&str> = values_of(product)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect();
        for value in distinct {
            *counts.entry(value).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| FacetCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

fn price_bounds(prices: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    if min.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

/// Distinct non-empty values in first-seen order.
fn distinct_first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(ToOwned::to_owned)
        .collect()
}

/// The number formed by every digit in the value, e.g. `"128gb"` → 128.
/// Values without digits rank first.
fn magnitude(value: &str) -> u64 {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

/// Stable ascending sort by [`magnitude`]; equal magnitudes keep input order.
fn sort_by_magnitude(values: &mut [String]) {
    values.sort_by_key(|v| magnitude(v));
}
