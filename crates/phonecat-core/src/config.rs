use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PHONECAT_ENV", "development"))?;
    let bind_addr = parse_addr("PHONECAT_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("PHONECAT_LOG_LEVEL", "info");
    let shop_data_dir = PathBuf::from(or_default("PHONECAT_SHOP_DATA_DIR", "./data/scrapping"));
    let comparator_data_dir = PathBuf::from(or_default(
        "PHONECAT_COMPARATOR_DATA_DIR",
        "./data/scrapping_Primini",
    ));
    let lexicon_path = lookup("PHONECAT_LEXICON_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let cors_origins = parse_origins(&or_default("PHONECAT_CORS_ORIGINS", "http://0.0.0.0:4200"))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop_data_dir,
        comparator_data_dir,
        lexicon_path,
        cors_origins,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PHONECAT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Splits a comma-separated origin list. At least one origin is required and
/// each must carry an `http://` or `https://` scheme.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PHONECAT_CORS_ORIGINS".to_string(),
            reason: "at least one origin is required".to_string(),
        });
    }

    if let Some(bad) = origins
        .iter()
        .find(|o| !o.starts_with("http://") && !o.starts_with("https://"))
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "PHONECAT_CORS_ORIGINS".to_string(),
            reason: format!("origin \"{bad}\" must start with http:// or https://"),
        });
    }

    Ok(origins)
}
