//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AdeConfig;
use super::secret::secret_string;
use crate::domain::errors::AdeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AdeConfig
/// 4. Applies environment variable overrides (ADE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `AdeError::Configuration` if the file is missing or unreadable, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ade_bridge::config::loader::load_config;
///
/// let config = load_config("ade-bridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AdeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AdeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AdeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AdeConfig = toml::from_str(&contents)
        .map_err(|e| AdeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AdeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. SQL templates never use `${`, so the
/// substitution is safe over the whole file.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AdeError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AdeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ADE_* prefix
///
/// Flat sections follow `ADE_<SECTION>_<KEY>` (`ADE_API_MAX_PAGE_SIZE`).
/// Location credentials are per store, so they use the sanitized location
/// path: `ADE_LOCATION_<SCHEME>_<ID>_DB_PASSWORD` with every
/// non-alphanumeric character mapped to `_` (`be.herd`/`farm-1` gives
/// `ADE_LOCATION_BE_HERD_FARM_1_DB_PASSWORD`).
fn apply_env_overrides(config: &mut AdeConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ADE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ADE_API_DEFAULT_PAGE_SIZE") {
        config.api.default_page_size = parse_override("ADE_API_DEFAULT_PAGE_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("ADE_API_MAX_PAGE_SIZE") {
        config.api.max_page_size = parse_override("ADE_API_MAX_PAGE_SIZE", &val)?;
    }

    for (scheme, ids) in config.locations.iter_mut() {
        for (id, location) in ids.iter_mut() {
            let prefix = location_env_prefix(scheme, id);
            if let Ok(val) = std::env::var(format!("{prefix}_DB_URL")) {
                location.db_url = val;
            }
            if let Ok(val) = std::env::var(format!("{prefix}_DB_USER")) {
                location.db_user = Some(val);
            }
            if let Ok(val) = std::env::var(format!("{prefix}_DB_PASSWORD")) {
                location.db_password = Some(secret_string(val));
            }
        }
    }

    if let Ok(val) = std::env::var("ADE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ADE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ADE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AdeError::Configuration(format!("{name} must be an integer, got '{value}'")))
}

/// `ADE_LOCATION_<SCHEME>_<ID>` for one directory entry
pub fn location_env_prefix(scheme: &str, id: &str) -> String {
    let sanitize = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    };
    format!("ADE_LOCATION_{}_{}", sanitize(scheme), sanitize(id))
}
