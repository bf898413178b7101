use std::env::VarError;

use crate::app_config::{AppConfig, Environment, ProviderConfig};
use crate::credentials::{load_aws_credentials, AwsCredentials};
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

/// Load only the provider settings (credentials, region, timeouts).
///
/// Does not require `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError` if provider credentials are missing or values are invalid.
pub fn load_provider_config() -> Result<ProviderConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_provider_config(&|key| std::env::var(key))
}

fn invalid(var: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

fn require<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn parse_or_default<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    or_default(lookup, var, default)
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(var, e))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    use rust_decimal::Decimal;
    use std::net::SocketAddr;

    let database_url = require(&lookup, "DATABASE_URL")?;
    let env = parse_environment(&or_default(&lookup, "SENTIMERGE_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_or_default(&lookup, "SENTIMERGE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default(&lookup, "SENTIMERGE_LOG_LEVEL", "info");

    let db_max_connections = parse_or_default(&lookup, "SENTIMERGE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_or_default(&lookup, "SENTIMERGE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs =
        parse_or_default(&lookup, "SENTIMERGE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let monthly_budget_usd: Decimal =
        parse_or_default(&lookup, "SENTIMERGE_MONTHLY_BUDGET_USD", "10")?;
    if monthly_budget_usd.is_sign_negative() {
        return Err(invalid(
            "SENTIMERGE_MONTHLY_BUDGET_USD",
            "budget must not be negative",
        ));
    }

    let providers = build_provider_config(&lookup)?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        monthly_budget_usd,
        providers,
    })
}

fn build_provider_config<F>(lookup: &F) -> Result<ProviderConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let aws_credentials = match lookup("SENTIMERGE_AWS_KEY_FILE") {
        Ok(path) if !path.trim().is_empty() => load_aws_credentials(std::path::Path::new(&path))?,
        _ => AwsCredentials {
            access_key_id: require(lookup, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: require(lookup, "AWS_SECRET_ACCESS_KEY")?,
        },
    };

    Ok(ProviderConfig {
        aws_credentials,
        aws_region: or_default(lookup, "SENTIMERGE_AWS_REGION", "us-west-2"),
        gcp_language_api_key: require(lookup, "GCP_LANGUAGE_API_KEY")?,
        timeout_secs: parse_or_default(lookup, "SENTIMERGE_PROVIDER_TIMEOUT_SECS", "30")?,
        max_retries: parse_or_default(lookup, "SENTIMERGE_PROVIDER_MAX_RETRIES", "2")?,
        retry_backoff_base_ms: parse_or_default(
            lookup,
            "SENTIMERGE_PROVIDER_RETRY_BACKOFF_BASE_MS",
            "500",
        )?,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "SENTIMERGE_ENV",
            format!("unknown environment '{other}'"),
        )),
    }
}
