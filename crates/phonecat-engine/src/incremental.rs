//! Partial facet recomputation after a filter change.

use phonecat_core::{Catalogued, FacetCounts, FilterSelection};

use crate::facets::{count_brands, count_colors, count_shops, count_stock_statuses};

/// Refreshes a counted facet snapshot after the selection changed from
/// `old` to `new`.
///
/// Only facets whose own selection changed are recounted from `products`
/// (already filtered under `new`); the rest keep their previous values even
/// if other facet changes made them stale. ram, storage and the price bounds
/// are always carried over.
#[must_use]
pub fn update_facets<P: Catalogued>(
    products: &[P],
    new: &FilterSelection,
    old: &FilterSelection,
    snapshot: &FacetCounts,
) -> FacetCounts {
    let mut updated = snapshot.clone();

    let stock_changed = old.status != new.status;
    let color_changed = old.color != new.color;
    let shop_changed = old.shop != new.shop;
    let brand_changed = old.brand != new.brand;

    if stock_changed {
        updated.stock_status = count_stock_statuses(products);
    }
    if color_changed {
        updated.color = count_colors(products);
    }
    if shop_changed {
        updated.shop = count_shops(products);
    }
    if brand_changed {
        updated.brand = count_brands(products);
    }

    tracing::debug!(
        stock_changed,
        color_changed,
        shop_changed,
        brand_changed,
        products = products.len(),
        "updated facet snapshot"
    );

    updated
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use phonecat_core::{FacetCount, Product};

    use super::*;

    fn product(shop: &str, stock: &str, brand: &str, color: &str) -> Product {
        Product {
            model: "Galaxy A14".to_string(),
            brand: brand.to_string(),
            ram: "4go".to_string(),
            storage: "64gb".to_string(),
            color: color.to_string(),
            options: String::new(),
            reference_global: String::new(),
            reference_detail: String::new(),
            ad_title: String::new(),
            ad_urls: vec![String::new()],
            shops: vec![shop.to_string()],
            stock_statuses: vec![stock.to_string()],
            scrape_dates: vec![String::new()],
            all_prices: vec![100.0],
            min_price: 100.0,
            max_price: 100.0,
        }
    }

    fn bucket(name: &str, count: usize) -> FacetCount {
        FacetCount {
            name: name.to_string(),
            count,
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn previous_snapshot() -> FacetCounts {
        FacetCounts {
            min_price: 50.0,
            max_price: 2000.0,
            ram: vec![bucket("4go", 9)],
            storage: vec![bucket("64gb", 9)],
            stock_status: vec![bucket("en stock", 9)],
            color: vec![bucket("black", 5), bucket("white", 4)],
            shop: vec![bucket("shop-a", 6), bucket("shop-b", 3)],
            brand: vec![bucket("apple", 4), bucket("samsung", 5)],
        }
    }

    #[test]
    fn unchanged_selection_returns_snapshot_untouched() {
        let products = vec![product("shop-a", "en stock", "samsung", "black")];
        let selection = FilterSelection::default();
        let snapshot = previous_snapshot();
        assert_eq!(
            update_facets(&products, &selection, &selection, &snapshot),
            snapshot
        );
    }

    #[test]
    fn only_the_changed_facet_is_recounted() {
        let products = vec![
            product("shop-a", "en stock", "samsung", "black"),
            product("shop-b", "en stock", "samsung", "white"),
        ];
        let old = FilterSelection {
            shop: set(&["shop-a", "shop-b"]),
            ..FilterSelection::default()
        };
        let new = FilterSelection {
            shop: set(&["shop-b", "shop-a"]),
            brand: set(&["samsung"]),
            ..FilterSelection::default()
        };
        let snapshot = previous_snapshot();

        let updated = update_facets(&products, &new, &old, &snapshot);

        assert_eq!(updated.shop, snapshot.shop);
        assert_eq!(updated.brand, vec![bucket("samsung", 2)]);
        assert_eq!(updated.color, snapshot.color);
        assert_eq!(updated.stock_status, snapshot.stock_status);
    }

    #[test]
    fn ram_storage_and_prices_are_carried_over() {
        let products = vec![product("shop-c", "epuise", "oppo", "blue")];
        let old = FilterSelection::default();
        let new = FilterSelection {
            status: set(&["epuise"]),
            color: set(&["blue"]),
            shop: set(&["shop-c"]),
            brand: set(&["oppo"]),
            ..FilterSelection::default()
        };
        let snapshot = previous_snapshot();

        let updated = update_facets(&products, &new, &old, &snapshot);

        assert_eq!(updated.stock_status, vec![bucket("epuise", 1)]);
        assert_eq!(updated.color, vec![bucket("blue", 1)]);
        assert_eq!(updated.shop, vec![bucket("shop-c", 1)]);
        assert_eq!(updated.brand, vec![bucket("oppo", 1)]);
        assert_eq!(updated.ram, snapshot.ram);
        assert_eq!(updated.storage, snapshot.storage);
        assert!((updated.min_price - 50.0).abs() < f64::EPSILON);
        assert!((updated.max_price - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clearing_a_facet_counts_as_a_change() {
        let products = vec![product("shop-a", "en stock", "samsung", "black")];
        let old = FilterSelection {
            color: set(&["white"]),
            ..FilterSelection::default()
        };
        let new = FilterSelection::default();
        let updated = update_facets(&products, &new, &old, &previous_snapshot());
        assert_eq!(updated.color, vec![bucket("black", 1)]);
    }
}
