//! Reader for the price-comparator dataset.

use std::io::Read;
use std::path::Path;

use phonecat_core::ComparatorListing;

use crate::error::IngestError;
use crate::files::{read_dir_records, read_records, STREAM_LABEL};

/// Reads every `*.csv` file in `dir` (name order), keeping rows in file
/// order.
///
/// # Errors
///
/// Returns [`IngestError`] when the directory or a file cannot be read or a
/// file is not valid CSV.
pub fn read_comparator_listings(dir: &Path) -> Result<Vec<ComparatorListing>, IngestError> {
    let rows: Vec<ComparatorListing> = read_dir_records(dir, false)?;
    log_loaded(&rows, dir);
    Ok(rows)
}

/// Reads comparator listings from one CSV stream.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] when the stream is not valid CSV.
pub fn read_comparator_listings_from<R: Read>(
    reader: R,
) -> Result<Vec<ComparatorListing>, IngestError> {
    let origin = Path::new(STREAM_LABEL);
    let rows: Vec<ComparatorListing> = read_records(reader, origin, false)?;
    log_loaded(&rows, origin);
    Ok(rows)
}

fn log_loaded(rows: &[ComparatorListing], origin: &Path) {
    if rows.is_empty() {
        tracing::info!(source = %origin.display(), "no comparator listings to process");
    } else {
        tracing::info!(source = %origin.display(), rows = rows.len(), "loaded comparator listings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_stream_order_and_quoted_lists() {
        let data = "titre_article,ad_href,ad_image,description_article,price,prix_detail,fournisseur,stocks\n\
Oppo Reno 8,h1,i1,d1,999 DT,\"999 DT,1 049 DT\",\"shop-a:Reno,shop-b:Reno 8\",\"en stock,epuise\"\n\
Redmi 12,h2,i2,d2,499 DT,499 DT,shop-c:Redmi,en stock\n";
        let rows = read_comparator_listings_from(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].titre_article, "Oppo Reno 8");
        assert_eq!(rows[0].prix_detail, "999 DT,1 049 DT");
        assert_eq!(rows[0].fournisseur, "shop-a:Reno,shop-b:Reno 8");
        assert_eq!(rows[1].titre_article, "Redmi 12");
    }

    #[test]
    fn empty_stream_yields_no_rows() {
        let rows = read_comparator_listings_from("titre_article,price\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }
}
