use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A color spelling found in listing titles mapped to the canonical name
/// surfaced by the color facet, e.g. `noir` → `black`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorAlias {
    pub source: String,
    pub canonical: String,
}

/// Lookup tables used to infer brand, color and model from a listing title.
///
/// Built once at startup and shared read-only. Color order is significant:
/// the first alias found in a title wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub brands: Vec<String>,
    pub colors: Vec<ColorAlias>,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

const DEFAULT_BRANDS: &[&str] = &[
    "samsung", "apple", "iphone", "huawei", "infinix", "oppo", "xiaomi", "redmi", "realme",
    "tecno", "itel", "nokia", "honor", "vivo", "motorola", "oneplus", "google", "lenovo",
    "alcatel", "zte", "logicom", "evertek", "ipro", "nothing",
];

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("noir", "black"),
    ("noire", "black"),
    ("blanc", "white"),
    ("blanche", "white"),
    ("bleu", "blue"),
    ("bleue", "blue"),
    ("rouge", "red"),
    ("vert", "green"),
    ("verte", "green"),
    ("gris", "gray"),
    ("grise", "gray"),
    ("argent", "silver"),
    ("doré", "gold"),
    ("dorée", "gold"),
    ("jaune", "yellow"),
    ("rose", "pink"),
    ("violet", "purple"),
    ("orange", "orange"),
    ("marron", "brown"),
    ("turquoise", "turquoise"),
    ("beige", "beige"),
];

const DEFAULT_STOP_WORDS: &[&str] = &["smartphone", "téléphone"];

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS.iter().map(|s| (*s).to_string()).collect(),
            colors: DEFAULT_COLORS
                .iter()
                .map(|(source, canonical)| ColorAlias {
                    source: (*source).to_string(),
                    canonical: (*canonical).to_string(),
                })
                .collect(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Lexicon {
    /// Every color spelling in both languages, source spellings first.
    pub fn color_spellings(&self) -> impl Iterator<Item = &str> {
        self.colors
            .iter()
            .flat_map(|c| [c.source.as_str(), c.canonical.as_str()])
    }

    /// Lower-cases and trims every entry in place.
    fn normalize(&mut self) {
        for brand in &mut self.brands {
            *brand = brand.trim().to_lowercase();
        }
        for color in &mut self.colors {
            color.source = color.source.trim().to_lowercase();
            color.canonical = color.canonical.trim().to_lowercase();
        }
        for word in &mut self.stop_words {
            *word = word.trim().to_lowercase();
        }
    }
}

/// Load, normalize and validate a lexicon from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut lexicon: Lexicon =
        serde_yaml::from_str(&content).map_err(ConfigError::LexiconFileParse)?;
    lexicon.normalize();

    validate_lexicon(&lexicon)?;

    Ok(lexicon)
}

fn validate_lexicon(lexicon: &Lexicon) -> Result<(), ConfigError> {
    if lexicon.brands.is_empty() {
        return Err(ConfigError::Validation(
            "lexicon must list at least one brand".to_string(),
        ));
    }

    let mut seen_brands = HashSet::new();
    for brand in &lexicon.brands {
        if brand.is_empty() {
            return Err(ConfigError::Validation(
                "brand entry must be non-empty".to_string(),
            ));
        }
        if brand.split_whitespace().count() != 1 {
            return Err(ConfigError::Validation(format!(
                "brand '{brand}' must be a single word"
            )));
        }
        if !seen_brands.insert(brand.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand: '{brand}'"
            )));
        }
    }

    let mut seen_sources = HashSet::new();
    for color in &lexicon.colors {
        if color.source.is_empty() || color.canonical.is_empty() {
            return Err(ConfigError::Validation(
                "color alias must have both a source and a canonical name".to_string(),
            ));
        }
        if color.source.split_whitespace().count() != 1
            || color.canonical.split_whitespace().count() != 1
        {
            return Err(ConfigError::Validation(format!(
                "color alias '{}' -> '{}' must use single words",
                color.source, color.canonical
            )));
        }
        if !seen_sources.insert(color.source.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate color source name: '{}'",
                color.source
            )));
        }
    }

    if lexicon.stop_words.iter().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "stop word entry must be non-empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(source: &str, canonical: &str) -> ColorAlias {
        ColorAlias {
            source: source.to_string(),
            canonical: canonical.to_string(),
        }
    }

    #[test]
    fn default_lexicon_is_valid() {
        assert!(validate_lexicon(&Lexicon::default()).is_ok());
    }

    #[test]
    fn default_lexicon_maps_noir_to_black_first() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.colors[0], alias("noir", "black"));
    }

    #[test]
    fn color_spellings_lists_both_languages() {
        let lexicon = Lexicon {
            brands: vec!["samsung".to_string()],
            colors: vec![alias("noir", "black"), alias("bleu", "blue")],
            stop_words: vec![],
        };
        let spellings: Vec<&str> = lexicon.color_spellings().collect();
        assert_eq!(spellings, vec!["noir", "black", "bleu", "blue"]);
    }

    #[test]
    fn validate_rejects_duplicate_brand() {
        let lexicon = Lexicon {
            brands: vec!["samsung".to_string(), "samsung".to_string()],
            colors: vec![],
            stop_words: vec![],
        };
        let err = validate_lexicon(&lexicon).unwrap_err();
        assert!(err.to_string().contains("duplicate brand"));
    }

    #[test]
    fn validate_rejects_multi_word_brand() {
        let lexicon = Lexicon {
            brands: vec!["one plus".to_string()],
            colors: vec![],
            stop_words: vec![],
        };
        let err = validate_lexicon(&lexicon).unwrap_err();
        assert!(err.to_string().contains("single word"));
    }

    #[test]
    fn validate_rejects_duplicate_color_source() {
        let lexicon = Lexicon {
            brands: vec!["apple".to_string()],
            colors: vec![alias("noir", "black"), alias("noir", "dark")],
            stop_words: vec![],
        };
        let err = validate_lexicon(&lexicon).unwrap_err();
        assert!(err.to_string().contains("duplicate color source"));
    }

    #[test]
    fn validate_rejects_multi_word_color() {
        let lexicon = Lexicon {
            brands: vec!["apple".to_string()],
            colors: vec![alias("bleu nuit", "navy")],
            stop_words: vec![],
        };
        let err = validate_lexicon(&lexicon).unwrap_err();
        assert!(err.to_string().contains("single words"));
    }

    #[test]
    fn validate_rejects_empty_brand_list() {
        let lexicon = Lexicon {
            brands: vec![],
            colors: vec![],
            stop_words: vec![],
        };
        assert!(validate_lexicon(&lexicon).is_err());
    }

    #[test]
    fn normalize_lowercases_entries() {
        let mut lexicon = Lexicon {
            brands: vec![" Samsung ".to_string()],
            colors: vec![alias("Noir", "BLACK")],
            stop_words: vec!["Smartphone".to_string()],
        };
        lexicon.normalize();
        assert_eq!(lexicon.brands, vec!["samsung"]);
        assert_eq!(lexicon.colors, vec![alias("noir", "black")]);
        assert_eq!(lexicon.stop_words, vec!["smartphone"]);
    }

    #[test]
    fn load_lexicon_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("lexicon.yaml");
        let result = load_lexicon(&path);
        assert!(result.is_ok(), "failed to load lexicon.yaml: {result:?}");
        let lexicon = result.unwrap();
        assert!(lexicon.brands.contains(&"samsung".to_string()));
        assert!(!lexicon.colors.is_empty());
    }

    #[test]
    fn load_lexicon_reports_missing_file() {
        let path = std::env::temp_dir().join(format!("lexicon-{}.yaml", uuid::Uuid::new_v4()));
        let err = load_lexicon(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LexiconFileIo { .. }));
    }

    #[test]
    fn load_lexicon_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("lexicon-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "brands: [unterminated").unwrap();
        let err = load_lexicon(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::LexiconFileParse(_)));
    }
}
