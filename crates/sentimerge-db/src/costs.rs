//! Database operations for the `monthly_costs` ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sentimerge_core::MonthlyCost;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `monthly_costs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyCostRow {
    pub month: String,
    pub aws_units: i64,
    pub gcp_units: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prices the accumulated units.
impl From<MonthlyCostRow> for MonthlyCost {
    fn from(row: MonthlyCostRow) -> Self {
        Self::with_units(row.month, row.aws_units, row.gcp_units)
    }
}

/// Result of a budget-gated usage write.
#[derive(Debug, Clone)]
pub enum UsageOutcome {
    /// Usage was added; carries the updated totals.
    Recorded(MonthlyCostRow),
    /// Spend had already reached the budget; nothing was written.
    BudgetExhausted(MonthlyCost),
}

fn validate_usage(month: &str, aws_units: i64, gcp_units: i64) -> Result<(), DbError> {
    validate_month(month)?;
    if aws_units < 0 || gcp_units < 0 {
        return Err(DbError::NegativeUsage {
            aws_units,
            gcp_units,
        });
    }
    Ok(())
}

fn validate_month(month: &str) -> Result<(), DbError> {
    let bytes = month.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(DbError::InvalidMonth(month.to_string()))
    }
}

/// Return the ledger row for `month` (`YYYY-MM`), or `None` if nothing has
/// been recorded yet.
///
/// # Errors
///
/// Returns [`DbError::InvalidMonth`] for a malformed month, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_monthly_cost(
    pool: &PgPool,
    month: &str,
) -> Result<Option<MonthlyCostRow>, DbError> {
    validate_month(month)?;

    let row = sqlx::query_as::<_, MonthlyCostRow>(
        "SELECT month, aws_units, gcp_units, created_at, updated_at \
         FROM monthly_costs \
         WHERE month = $1",
    )
    .bind(month)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Add usage to `month`, creating the row on first use, and return the
/// updated totals.
///
/// The increment happens in a single upsert so concurrent requests never
/// lose an update.
///
/// # Errors
///
/// Returns [`DbError::InvalidMonth`] for a malformed month,
/// [`DbError::NegativeUsage`] if either count is negative, or
/// [`DbError::Sqlx`] if the upsert fails.
pub async fn record_usage(
    pool: &PgPool,
    month: &str,
    aws_units: i64,
    gcp_units: i64,
) -> Result<MonthlyCostRow, DbError> {
    validate_usage(month, aws_units, gcp_units)?;

    let row = sqlx::query_as::<_, MonthlyCostRow>(
        "INSERT INTO monthly_costs (month, aws_units, gcp_units) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (month) DO UPDATE SET \
             aws_units = monthly_costs.aws_units + EXCLUDED.aws_units, \
             gcp_units = monthly_costs.gcp_units + EXCLUDED.gcp_units, \
             updated_at = NOW() \
         RETURNING month, aws_units, gcp_units, created_at, updated_at",
    )
    .bind(month)
    .bind(aws_units)
    .bind(gcp_units)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Add usage to `month` only if its spend is still below `budget`.
///
/// The month's row is locked with `SELECT ... FOR UPDATE` for the whole
/// check-then-increment, so concurrent callers are serialized and cannot
/// jointly overrun the budget. A refused call leaves the ledger untouched.
///
/// # Errors
///
/// Returns [`DbError::InvalidMonth`] for a malformed month,
/// [`DbError::NegativeUsage`] if either count is negative, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn record_usage_within_budget(
    pool: &PgPool,
    month: &str,
    aws_units: i64,
    gcp_units: i64,
    budget: Decimal,
) -> Result<UsageOutcome, DbError> {
    validate_usage(month, aws_units, gcp_units)?;

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO monthly_costs (month) VALUES ($1) ON CONFLICT (month) DO NOTHING")
        .bind(month)
        .execute(&mut *tx)
        .await?;

    let current = sqlx::query_as::<_, MonthlyCostRow>(
        "SELECT month, aws_units, gcp_units, created_at, updated_at \
         FROM monthly_costs \
         WHERE month = $1 \
         FOR UPDATE",
    )
    .bind(month)
    .fetch_one(&mut *tx)
    .await?;

    let spent = MonthlyCost::from(current);
    if spent.exceeds(budget) {
        tx.rollback().await?;
        return Ok(UsageOutcome::BudgetExhausted(spent));
    }

    let row = sqlx::query_as::<_, MonthlyCostRow>(
        "UPDATE monthly_costs SET \
             aws_units = aws_units + $2, \
             gcp_units = gcp_units + $3, \
             updated_at = NOW() \
         WHERE month = $1 \
         RETURNING month, aws_units, gcp_units, created_at, updated_at",
    )
    .bind(month)
    .bind(aws_units)
    .bind(gcp_units)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(UsageOutcome::Recorded(row))
}
