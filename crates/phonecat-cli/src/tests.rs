use super::*;

#[test]
fn parses_aggregate_command() {
    let cli = Cli::try_parse_from(["phonecat-cli", "aggregate"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Aggregate));
    assert!(!cli.stdin);
}

#[test]
fn page_index_defaults_to_zero() {
    let cli = Cli::try_parse_from(["phonecat-cli", "page"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Page { index: 0 }));
}

#[test]
fn parses_page_index() {
    let cli = Cli::try_parse_from(["phonecat-cli", "page", "--index", "3"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Page { index: 3 }));
}

#[test]
fn negative_page_index_is_rejected() {
    assert!(Cli::try_parse_from(["phonecat-cli", "page", "--index", "-1"]).is_err());
}

#[test]
fn facets_default_to_full_shop_snapshot() {
    let cli = Cli::try_parse_from(["phonecat-cli", "facets"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Facets {
            source: Source::Shops,
            counted: false
        }
    ));
}

#[test]
fn parses_counted_comparator_facets() {
    let cli = Cli::try_parse_from(["phonecat-cli", "facets", "--source", "comparator", "--counted"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Facets {
            source: Source::Comparator,
            counted: true
        }
    ));
}

#[test]
fn filter_requires_selection_file() {
    assert!(Cli::try_parse_from(["phonecat-cli", "filter"]).is_err());
}

#[test]
fn parses_filter_with_stdin_flag_after_subcommand() {
    let cli = Cli::try_parse_from([
        "phonecat-cli",
        "filter",
        "--selection",
        "sel.json",
        "--source",
        "shops",
        "--stdin",
    ])
    .expect("expected valid cli args");
    assert!(cli.stdin);
    match cli.command {
        Commands::Filter { selection, source } => {
            assert_eq!(selection, PathBuf::from("sel.json"));
            assert_eq!(source, Source::Shops);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn unknown_source_is_rejected() {
    assert!(Cli::try_parse_from(["phonecat-cli", "facets", "--source", "web"]).is_err());
}

#[test]
fn read_selection_parses_front_end_keys() {
    let path = std::env::temp_dir().join(format!("phonecat-selection-{}.json", std::process::id()));
    fs::write(&path, r#"{"priceRange":[100,900],"marque":["samsung"],"stockage":["128gb"]}"#)
        .expect("write selection");
    let selection = read_selection(&path).expect("selection parses");
    let _ = fs::remove_file(&path);

    assert!(selection.brand.contains("samsung"));
    assert!(selection.storage.contains("128gb"));
    let range = selection.price_range.expect("price range");
    assert!((range.min() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn read_selection_reports_missing_file() {
    let err = read_selection(Path::new("/nonexistent/phonecat/selection.json")).unwrap_err();
    assert!(err.to_string().contains("reading selection file"));
}
