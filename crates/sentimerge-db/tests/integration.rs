//! Offline tests for sentimerge-db pool configuration and row conversion.
//! These tests do not require a live database connection.

use chrono::Utc;
use rust_decimal::Decimal;
use sentimerge_core::{AppConfig, AwsCredentials, Environment, MonthlyCost, ProviderConfig};
use sentimerge_db::{MonthlyCostRow, PoolConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        monthly_budget_usd: Decimal::new(10, 0),
        providers: ProviderConfig {
            aws_credentials: AwsCredentials {
                access_key_id: "AKID".to_string(),
                secret_access_key: "secret".to_string(),
            },
            aws_region: "us-west-2".to_string(),
            gcp_language_api_key: "key".to_string(),
            timeout_secs: 30,
            max_retries: 2,
            retry_backoff_base_ms: 500,
        },
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn monthly_cost_row_converts_to_priced_cost() {
    let row = MonthlyCostRow {
        month: "2026-10".to_string(),
        aws_units: 1_000,
        gcp_units: 5_010,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let cost = MonthlyCost::from(row);
    assert_eq!(cost.month, "2026-10");
    assert_eq!(cost.aws_cost, Decimal::new(1, 1));
    assert_eq!(cost.gcp_cost, Decimal::new(2, 2));
    assert_eq!(cost.total_cost, Decimal::new(12, 2));
}
