//! Multi-criteria filtering of products and raw shop listings.

use std::collections::BTreeSet;

use phonecat_core::{Catalogued, FilterSelection, PriceRange, ShopListing, PAGE_CAP};

use crate::normalize::clean_price;

fn accepts(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn accepts_any(set: &BTreeSet<String>, values: &[String]) -> bool {
    set.is_empty() || values.iter().any(|v| set.contains(v))
}

/// A product passes when either end of its own price range lies inside the
/// selected range.
fn matches_price<P: Catalogued>(product: &P, range: Option<&PriceRange>) -> bool {
    range.is_none_or(|r| r.contains(product.min_price()) || r.contains(product.max_price()))
}

/// Whether `product` satisfies every restriction in `selection`.
///
/// Checks run cheapest-first and stop at the first failure: price, stock
/// status, shop, brand, color. `offer`, `ram` and `storage` do not apply to
/// consolidated products.
#[must_use]
pub fn matches<P: Catalogued>(product: &P, selection: &FilterSelection) -> bool {
    matches_price(product, selection.price_range.as_ref())
        && accepts_any(&selection.status, product.stock_statuses())
        && accepts_any(&selection.shop, product.shops())
        && accepts(&selection.brand, product.brand())
        && accepts(&selection.color, product.color())
}

/// Returns, in input order, the first 180 products matching `selection`.
/// Products after the 180th match are never examined.
#[must_use]
pub fn apply_filters<P: Catalogued + Clone>(products: &[P], selection: &FilterSelection) -> Vec<P> {
    let mut matched = Vec::new();
    for product in products {
        if !matches(product, selection) {
            continue;
        }
        matched.push(product.clone());
        if matched.len() >= PAGE_CAP {
            tracing::debug!("filter result cap reached");
            break;
        }
    }
    matched
}

/// Whether a raw shop listing satisfies `selection`.
///
/// Unlike [`matches`], every facet applies: `offer` is matched against the
/// listing's options. A listing with an unparseable price fails any price
/// restriction.
#[must_use]
pub fn listing_matches(listing: &ShopListing, selection: &FilterSelection) -> bool {
    let price_ok = selection.price_range.as_ref().is_none_or(|range| {
        clean_price(&listing.ad_price).is_ok_and(|price| range.contains(price))
    });

    price_ok
        && accepts(&selection.status, &listing.ad_stocks)
        && accepts(&selection.offer, &listing.options)
        && accepts(&selection.ram, &listing.ram)
        && accepts(&selection.storage, &listing.stockage)
        && accepts(&selection.shop, &listing.shop)
        && accepts(&selection.brand, &listing.marque)
        && accepts(&selection.color, &listing.couleur)
}

/// Filters raw shop listings ahead of aggregation. Not capped: the
/// aggregator applies the product cap.
#[must_use]
pub fn filter_listings(rows: &[ShopListing], selection: &FilterSelection) -> Vec<ShopListing> {
    if selection.is_unrestricted() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| listing_matches(row, selection))
        .cloned()
        .collect()
}
