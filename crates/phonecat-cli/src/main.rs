use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use phonecat_core::{AppConfig, ComparatorListing, FilterSelection, Lexicon, ShopListing};
use phonecat_engine::{
    aggregate, apply_filters, extract_facets_counted, extract_facets_full, filter_listings,
    normalize_all, normalize_page,
};
use phonecat_ingest::{
    read_comparator_listings, read_comparator_listings_from, read_shop_listings,
    read_shop_listings_from,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "phonecat-cli")]
#[command(about = "Consolidate and filter scraped phone listings")]
struct Cli {
    /// Read the dataset as one CSV document from stdin instead of the
    /// configured data directory.
    #[arg(long, global = true)]
    stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Consolidate shop listings into at most 180 products.
    Aggregate,
    /// Normalize one 180-row page of comparator listings.
    Page {
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Print the facet snapshot for a dataset.
    Facets {
        #[arg(long, value_enum, default_value_t = Source::Shops)]
        source: Source,
        /// Count products per facet value. Comparator facets are always
        /// counted.
        #[arg(long)]
        counted: bool,
    },
    /// Apply a JSON filter selection and print the matching products.
    Filter {
        #[arg(long)]
        selection: PathBuf,
        #[arg(long, value_enum, default_value_t = Source::Comparator)]
        source: Source,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Shops,
    Comparator,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = phonecat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let lexicon = match &config.lexicon_path {
        Some(path) => phonecat_core::load_lexicon(path)?,
        None => Lexicon::default(),
    };
    let data = DataSource {
        config: &config,
        stdin: cli.stdin,
    };

    match cli.command {
        Commands::Aggregate => print_json(&aggregate(&data.shop_rows()?).into_items()),
        Commands::Page { index } => {
            let rows = data.comparator_rows()?;
            print_json(&normalize_page(&rows, index, &lexicon).into_items())
        }
        Commands::Facets { source, counted } => match source {
            Source::Shops if counted => {
                let products = aggregate(&data.shop_rows()?).into_items();
                print_json(&extract_facets_counted(&products))
            }
            Source::Shops => print_json(&extract_facets_full(&data.shop_rows()?)),
            Source::Comparator => {
                let products = normalize_all(&data.comparator_rows()?, &lexicon).into_items();
                print_json(&extract_facets_counted(&products))
            }
        },
        Commands::Filter { selection, source } => {
            let selection = read_selection(&selection)?;
            match source {
                Source::Shops => {
                    let rows = data.shop_rows()?;
                    print_json(&aggregate(&filter_listings(&rows, &selection)).into_items())
                }
                Source::Comparator => {
                    let products = normalize_all(&data.comparator_rows()?, &lexicon).into_items();
                    print_json(&apply_filters(&products, &selection))
                }
            }
        }
    }
}

struct DataSource<'a> {
    config: &'a AppConfig,
    stdin: bool,
}

impl DataSource<'_> {
    fn shop_rows(&self) -> anyhow::Result<Vec<ShopListing>> {
        if self.stdin {
            return Ok(read_shop_listings_from(io::stdin().lock())?);
        }
        read_shop_listings(&self.config.shop_data_dir).with_context(|| {
            format!(
                "reading shop listings from {}",
                self.config.shop_data_dir.display()
            )
        })
    }

    fn comparator_rows(&self) -> anyhow::Result<Vec<ComparatorListing>> {
        if self.stdin {
            return Ok(read_comparator_listings_from(io::stdin().lock())?);
        }
        read_comparator_listings(&self.config.comparator_data_dir).with_context(|| {
            format!(
                "reading comparator listings from {}",
                self.config.comparator_data_dir.display()
            )
        })
    }
}

fn read_selection(path: &Path) -> anyhow::Result<FilterSelection> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading selection file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing selection file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests;
