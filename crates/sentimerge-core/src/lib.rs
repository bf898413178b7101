//! Shared configuration and domain types for sentimerge.

pub mod app_config;
pub mod config;
pub mod cost;
pub mod credentials;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, ProviderConfig};
pub use config::{load_app_config, load_app_config_from_env, load_provider_config};
pub use cost::{aws_units_for, billing_month, gcp_units_for, MonthlyCost};
pub use credentials::{load_aws_credentials, AwsCredentials};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read AWS key file {path}: {reason}")]
    KeyFile { path: String, reason: String },
}
