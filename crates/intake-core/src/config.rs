use crate::app_config::{AppConfig, Environment, SheetsConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let drive_access_token = require("INTAKE_DRIVE_ACCESS_TOKEN")?;
    let env = parse_environment(&or_default("INTAKE_ENV", "development"))?;
    let log_level = or_default("INTAKE_LOG_LEVEL", "info");

    let drive_api_base = or_default(
        "INTAKE_DRIVE_API_BASE",
        "https://www.googleapis.com/drive/v3",
    );
    let drive_upload_base = or_default(
        "INTAKE_DRIVE_UPLOAD_BASE",
        "https://www.googleapis.com/upload/drive/v3",
    );
    let drive_root_folder_name = optional("INTAKE_DRIVE_ROOT_FOLDER_NAME");

    let request_timeout_secs = parse_u64("INTAKE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("INTAKE_USER_AGENT", "intake/0.1 (product-intake)");
    let fetch_max_retries = parse_u32("INTAKE_FETCH_MAX_RETRIES", "3")?;
    if fetch_max_retries == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INTAKE_FETCH_MAX_RETRIES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let fetch_retry_delay_ms = parse_u64("INTAKE_FETCH_RETRY_DELAY_MS", "1000")?;
    let folder_list_limit = parse_u32("INTAKE_FOLDER_LIST_LIMIT", "1000")?;
    // A zero limit hides existing children and restarts numbering at 1.
    if folder_list_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INTAKE_FOLDER_LIST_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let sheets = optional("INTAKE_SHEETS_SPREADSHEET_ID").map(|spreadsheet_id| SheetsConfig {
        spreadsheet_id,
        tab: or_default("INTAKE_SHEETS_TAB", "Products"),
        api_base: or_default("INTAKE_SHEETS_API_BASE", "https://sheets.googleapis.com/v4"),
    });

    Ok(AppConfig {
        env,
        log_level,
        drive_access_token,
        drive_api_base,
        drive_upload_base,
        drive_root_folder_name,
        request_timeout_secs,
        user_agent,
        fetch_max_retries,
        fetch_retry_delay_ms,
        folder_list_limit,
        sheets,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INTAKE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
