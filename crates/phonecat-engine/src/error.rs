use serde::Serialize;
use thiserror::Error;

/// Why a single input row was dropped. Never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("invalid price \"{raw}\"")]
    InvalidPrice { raw: String },

    #[error("malformed supplier entry \"{entry}\": expected shop:title")]
    MalformedSupplierField { entry: String },

    #[error(
        "per-shop fields differ in length: {shops} shops, {stocks} stock statuses, {prices} prices"
    )]
    FieldLengthMismatch {
        shops: usize,
        stocks: usize,
        prices: usize,
    },
}

/// Per-reason tally of rows dropped during one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    pub invalid_price: usize,
    pub malformed_supplier: usize,
    pub length_mismatch: usize,
}

impl SkipStats {
    pub fn record(&mut self, error: &RowError) {
        match error {
            RowError::InvalidPrice { .. } => self.invalid_price += 1,
            RowError::MalformedSupplierField { .. } => self.malformed_supplier += 1,
            RowError::FieldLengthMismatch { .. } => self.length_mismatch += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.invalid_price + self.malformed_supplier + self.length_mismatch
    }
}

/// Output of a batch pass: the accepted items plus what was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub items: Vec<T>,
    pub skipped: SkipStats,
}

impl<T> BatchOutcome<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_stats_tallies_each_reason() {
        let mut stats = SkipStats::default();
        stats.record(&RowError::InvalidPrice {
            raw: "n/a".to_string(),
        });
        stats.record(&RowError::InvalidPrice {
            raw: String::new(),
        });
        stats.record(&RowError::MalformedSupplierField {
            entry: "shop-a".to_string(),
        });
        stats.record(&RowError::FieldLengthMismatch {
            shops: 2,
            stocks: 1,
            prices: 2,
        });
        assert_eq!(stats.invalid_price, 2);
        assert_eq!(stats.malformed_supplier, 1);
        assert_eq!(stats.length_mismatch, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn row_error_messages_name_the_offending_value() {
        let err = RowError::MalformedSupplierField {
            entry: "shop-a".to_string(),
        };
        assert!(err.to_string().contains("\"shop-a\""));
    }

    #[test]
    fn skip_stats_serialize_per_reason() {
        let stats = SkipStats {
            invalid_price: 3,
            malformed_supplier: 0,
            length_mismatch: 1,
        };
        let json = serde_json::to_value(stats).expect("serialize");
        assert_eq!(json["invalid_price"], 3);
        assert_eq!(json["length_mismatch"], 1);
    }
}
