//! `cost` command: print the usage ledger for one month.

use chrono::Utc;
use sentimerge_core::{billing_month, AppConfig, MonthlyCost};

/// Print provider usage and spend for `month` (or the current month).
///
/// # Errors
///
/// Returns an error if the month is malformed or the query fails.
pub(crate) async fn run_cost(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    month: Option<&str>,
) -> anyhow::Result<()> {
    let month = month.map_or_else(|| billing_month(Utc::now()), ToOwned::to_owned);
    tracing::debug!(month = %month, "loading cost ledger");
    let cost = sentimerge_db::get_monthly_cost(pool, &month)
        .await?
        .map_or_else(|| MonthlyCost::empty(month.clone()), MonthlyCost::from);

    for line in format_cost(&cost, config.monthly_budget_usd) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn format_cost(cost: &MonthlyCost, budget: rust_decimal::Decimal) -> Vec<String> {
    let mut lines = vec![
        format!("month:       {}", cost.month),
        format!("aws units:   {:>10}  ${}", cost.aws_units, cost.aws_cost),
        format!("gcp units:   {:>10}  ${}", cost.gcp_units, cost.gcp_cost),
        format!("total:       ${} of ${budget}", cost.total_cost),
    ];
    if cost.exceeds(budget) {
        lines.push("budget exhausted: the server will refuse analysis requests".to_string());
    }
    lines
}
