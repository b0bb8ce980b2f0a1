//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DerrickConfig;
use crate::config::secret_string;
use crate::domain::errors::DerrickError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DerrickConfig
/// 4. Applies environment variable overrides (DERRICK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use derrick::config::loader::load_config;
///
/// let config = load_config("derrick.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DerrickConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DerrickError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DerrickError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Performs the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<DerrickConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DerrickConfig = toml::from_str(&contents)
        .map_err(|e| DerrickError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DerrickError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DerrickError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

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
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DerrickError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DERRICK_* prefix
///
/// Environment variables follow the pattern: DERRICK_<SECTION>_<KEY>
/// For example: DERRICK_PATHS_INPUT_DIR, DERRICK_LOAD_USE_DATABASE
fn apply_env_overrides(config: &mut DerrickConfig) {
    if let Ok(val) = std::env::var("DERRICK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Paths overrides
    if let Ok(val) = std::env::var("DERRICK_PATHS_INPUT_DIR") {
        config.paths.input_dir = val;
    }
    if let Ok(val) = std::env::var("DERRICK_PATHS_PROCESSED_DIR") {
        config.paths.processed_dir = val;
    }
    if let Ok(val) = std::env::var("DERRICK_PATHS_ERROR_DIR") {
        config.paths.error_dir = val;
    }
    if let Ok(val) = std::env::var("DERRICK_PATHS_FILE_EXTENSION") {
        config.paths.file_extension = val;
    }

    if let Ok(val) = std::env::var("DERRICK_LOAD_USE_DATABASE") {
        config.load.use_database = val.parse().unwrap_or(config.load.use_database);
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("DERRICK_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("DERRICK_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
        if let Ok(val) = std::env::var("DERRICK_POSTGRESQL_CONNECTION_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                pg_config.connection_timeout_seconds = timeout;
            }
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DERRICK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DERRICK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DERRICK_UNIT_TEST_VAR", "test_value");
        let input = "password = \"${DERRICK_UNIT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("DERRICK_UNIT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DERRICK_UNIT_MISSING_VAR");
        let input = "password = \"${DERRICK_UNIT_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("DERRICK_UNIT_COMMENTED_VAR");
        let input = "# connection_string = \"${DERRICK_UNIT_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[paths]
input_dir = "data/input"
processed_dir = "data/processed"
error_dir = "data/error"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.paths.input_dir, "data/input");
        assert_eq!(config.paths.file_extension, "csv");
        assert!(config.postgresql.is_none());
    }
}
