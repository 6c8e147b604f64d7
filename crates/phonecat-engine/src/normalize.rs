//! Row normalization for the price-comparator dataset.
//!
//! Turns one [`ComparatorListing`] into a [`ComparatorProduct`]: prices are
//! cleaned, the packed per-shop cells are split and de-duplicated by shop,
//! and brand, color and model are inferred from the title through the
//! [`Lexicon`].

use std::collections::HashSet;
use std::sync::LazyLock;

use phonecat_core::{ComparatorListing, ComparatorProduct, Lexicon, PAGE_CAP};
use regex::Regex;

use crate::error::{BatchOutcome, RowError, SkipStats};

/// Capacity noise such as `128gb`, `4 go` or `8g`.
static CAPACITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\s*(?:gb|go|g)\b").expect("valid regex"));

/// Parses a scraped price such as `"1 299 DT"` into a number.
///
/// Whitespace anywhere in the text and a trailing `DT` currency marker are
/// ignored. Already-clean numeric text parses to itself.
///
/// # Errors
///
/// Returns [`RowError::InvalidPrice`] if the remainder is not a finite number.
pub fn clean_price(text: &str) -> Result<f64, RowError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    strip_currency(&compact)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowError::InvalidPrice {
            raw: text.to_string(),
        })
}

fn strip_currency(compact: &str) -> &str {
    let split = compact.len().saturating_sub(2);
    match compact.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case("dt") => &compact[..split],
        _ => compact,
    }
}

/// Splits a comma-separated cell into trimmed entries. A blank cell holds no
/// entries at all.
fn split_list(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        Vec::new()
    } else {
        text.split(',').map(str::trim).collect()
    }
}

/// Splits a supplier cell (`"shop-a:Galaxy A14, shop-b:A14 4/64"`) into
/// parallel shop and ad-title lists.
///
/// # Errors
///
/// Returns [`RowError::MalformedSupplierField`] on the first entry without a
/// `:` separator; the whole row must then be skipped.
pub fn split_supplier(text: &str) -> Result<(Vec<String>, Vec<String>), RowError> {
    let entries = split_list(text);
    let mut shops = Vec::with_capacity(entries.len());
    let mut titles = Vec::with_capacity(entries.len());

    for entry in entries {
        let (shop, title) =
            entry
                .split_once(':')
                .ok_or_else(|| RowError::MalformedSupplierField {
                    entry: entry.to_string(),
                })?;
        shops.push(shop.trim().to_string());
        titles.push(title.trim().to_string());
    }

    Ok((shops, titles))
}

#[derive(Debug, Clone, PartialEq)]
struct ShopOffer {
    shop: String,
    title: String,
    stock: String,
    price: f64,
}

/// Keeps the first offer seen for each shop, in first-seen order.
fn dedup_by_shop(offers: Vec<ShopOffer>) -> Vec<ShopOffer> {
    let mut seen = HashSet::new();
    offers
        .into_iter()
        .filter(|offer| seen.insert(offer.shop.clone()))
        .collect()
}

fn trim_word(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().map(trim_word)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"galaxy a14s"` becomes `"Galaxy A14S"`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alphabetic = false;
    for c in text.chars() {
        if prev_alphabetic {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alphabetic = c.is_alphabetic();
    }
    out
}

/// Title-based attribute inference backed by a shared [`Lexicon`].
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    lexicon: &'a Lexicon,
    brands: HashSet<&'a str>,
    /// Color spellings in both languages plus stop words.
    noise_words: HashSet<&'a str>,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub fn new(lexicon: &'a Lexicon) -> Self {
        let brands = lexicon.brands.iter().map(String::as_str).collect();
        let noise_words = lexicon
            .color_spellings()
            .chain(lexicon.stop_words.iter().map(String::as_str))
            .collect();
        Self {
            lexicon,
            brands,
            noise_words,
        }
    }

    /// Returns the first title word, left to right, that is a known brand,
    /// or `""` when none is.
    #[must_use]
    pub fn identify_brand(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        let found = words(&lower).find(|word| self.brands.contains(*word));
        found.map(ToOwned::to_owned).unwrap_or_default()
    }

    /// Returns the canonical name of the first lexicon color whose source or
    /// canonical spelling appears as a word in the title, or `""`.
    #[must_use]
    pub fn identify_color(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        let present: HashSet<&str> = words(&lower).collect();
        self.lexicon
            .colors
            .iter()
            .find(|alias| {
                present.contains(alias.source.as_str())
                    || present.contains(alias.canonical.as_str())
            })
            .map(|alias| alias.canonical.clone())
            .unwrap_or_default()
    }

    /// Derives a model name by removing color words, the brand, stop words
    /// and capacity tokens from the title, then title-casing what is left.
    ///
    /// Best effort: identical input always yields identical output, nothing
    /// more is promised.
    #[must_use]
    pub fn extract_model(&self, title: &str, color: &str, brand: &str) -> String {
        let lower = title.to_lowercase();
        let stripped = CAPACITY_RE.replace_all(&lower, " ");
        let brand = brand.trim().to_lowercase();
        let color = color.trim().to_lowercase();

        let kept: Vec<&str> = stripped
            .split_whitespace()
            .filter(|token| {
                let word = trim_word(token);
                let is_noise = self.noise_words.contains(word)
                    || (!brand.is_empty() && word == brand)
                    || (!color.is_empty() && word == color);
                !is_noise
            })
            .collect();

        title_case(&kept.join(" "))
    }

    /// Normalizes one comparator row.
    ///
    /// # Errors
    ///
    /// Returns a [`RowError`] describing why the row must be skipped.
    pub fn normalize_listing(
        &self,
        listing: &ComparatorListing,
    ) -> Result<ComparatorProduct, RowError> {
        // A blank price cell is one unparseable price, not an empty list.
        let detail_prices = listing
            .prix_detail
            .split(',')
            .map(clean_price)
            .collect::<Result<Vec<_>, _>>()?;
        let min_price = clean_price(&listing.price)?;
        let (shops, ad_titles) = split_supplier(&listing.fournisseur)?;
        let stocks = split_list(&listing.stocks);

        if shops.len() != stocks.len() || shops.len() != detail_prices.len() {
            return Err(RowError::FieldLengthMismatch {
                shops: shops.len(),
                stocks: stocks.len(),
                prices: detail_prices.len(),
            });
        }

        let offers = dedup_by_shop(
            shops
                .into_iter()
                .zip(ad_titles)
                .zip(stocks)
                .zip(detail_prices)
                .map(|(((shop, title), stock), price)| ShopOffer {
                    shop,
                    title,
                    stock: stock.to_string(),
                    price,
                })
                .collect(),
        );

        let max_price = offers.iter().map(|o| o.price).fold(min_price, f64::max);

        let brand = self.identify_brand(&listing.titre_article);
        let color = self.identify_color(&listing.titre_article);
        let model = self.extract_model(&listing.titre_article, &color, &brand);

        let mut product = ComparatorProduct {
            title: listing.titre_article.clone(),
            ad_href: listing.ad_href.clone(),
            ad_image: listing.ad_image.clone(),
            description: listing.description_article.clone(),
            detail_prices: Vec::with_capacity(offers.len()),
            min_price,
            max_price,
            shops: Vec::with_capacity(offers.len()),
            ad_titles: Vec::with_capacity(offers.len()),
            stock_statuses: Vec::with_capacity(offers.len()),
            brand,
            color,
            model,
        };
        for offer in offers {
            product.shops.push(offer.shop);
            product.ad_titles.push(offer.title);
            product.stock_statuses.push(offer.stock);
            product.detail_prices.push(offer.price);
        }

        Ok(product)
    }
}

fn normalize_rows(
    normalizer: &Normalizer<'_>,
    rows: &[ComparatorListing],
    first_row: usize,
    limit: Option<usize>,
) -> BatchOutcome<ComparatorProduct> {
    let mut items = Vec::new();
    let mut skipped = SkipStats::default();

    for (offset, row) in rows.iter().enumerate() {
        if limit.is_some_and(|max| items.len() >= max) {
            break;
        }
        match normalizer.normalize_listing(row) {
            Ok(product) => items.push(product),
            Err(error) => {
                tracing::warn!(row = first_row + offset, %error, "skipping comparator row");
                skipped.record(&error);
            }
        }
    }

    tracing::debug!(
        accepted = items.len(),
        skipped = skipped.total(),
        "normalized comparator rows"
    );

    BatchOutcome { items, skipped }
}

/// Normalizes every comparator row, dropping rows that fail validation.
#[must_use]
pub fn normalize_all(
    listings: &[ComparatorListing],
    lexicon: &Lexicon,
) -> BatchOutcome<ComparatorProduct> {
    normalize_rows(&Normalizer::new(lexicon), listings, 0, None)
}

/// Normalizes one page of comparator rows.
///
/// Page `p` starts at row `p * 180` and yields at most as many products as
/// the window `[p * 180, p * 180 + 180)` holds rows. Skipped rows do not use
/// up the budget: scanning continues past the window end until the budget is
/// met or the input runs out.
#[must_use]
pub fn normalize_page(
    listings: &[ComparatorListing],
    page_index: usize,
    lexicon: &Lexicon,
) -> BatchOutcome<ComparatorProduct> {
    let start = page_index.saturating_mul(PAGE_CAP);
    if start >= listings.len() {
        return BatchOutcome {
            items: Vec::new(),
            skipped: SkipStats::default(),
        };
    }

    let budget = (listings.len() - start).min(PAGE_CAP);
    normalize_rows(
        &Normalizer::new(lexicon),
        &listings[start..],
        start,
        Some(budget),
    )
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
