//! Provider pricing and the monthly cost ledger record.
//!
//! AWS Comprehend bills in 100-character units with a 3-unit minimum per
//! request. Google Natural Language bills in 1,000-character units; the first
//! 5,000 units each month are free.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const AWS_CHARS_PER_UNIT: usize = 100;
const AWS_MIN_UNITS: i64 = 3;
const GCP_CHARS_PER_UNIT: usize = 1_000;
const GCP_MIN_UNITS: i64 = 1;
const GCP_FREE_UNITS: i64 = 5_000;

/// $0.0001 per AWS unit.
fn aws_unit_price() -> Decimal {
    Decimal::new(1, 4)
}

/// $0.002 per GCP unit beyond the free tier.
fn gcp_unit_price() -> Decimal {
    Decimal::new(2, 3)
}

/// Accumulated provider usage and spend for one billing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCost {
    /// Billing month formatted as `YYYY-MM`.
    pub month: String,
    pub aws_units: i64,
    pub aws_cost: Decimal,
    pub gcp_units: i64,
    pub gcp_cost: Decimal,
    pub total_cost: Decimal,
}

impl MonthlyCost {
    /// A month with no recorded usage.
    #[must_use]
    pub fn empty(month: impl Into<String>) -> Self {
        Self::with_units(month, 0, 0)
    }

    /// Derive costs from accumulated unit counts.
    #[must_use]
    pub fn with_units(month: impl Into<String>, aws_units: i64, gcp_units: i64) -> Self {
        let aws_cost = (Decimal::from(aws_units) * aws_unit_price()).normalize();
        let gcp_cost =
            (Decimal::from((gcp_units - GCP_FREE_UNITS).max(0)) * gcp_unit_price()).normalize();
        Self {
            month: month.into(),
            aws_units,
            aws_cost,
            gcp_units,
            gcp_cost,
            total_cost: aws_cost + gcp_cost,
        }
    }

    /// Whether accumulated spend has reached `budget`.
    #[must_use]
    pub fn exceeds(&self, budget: Decimal) -> bool {
        self.total_cost >= budget
    }
}

/// AWS units billed for one request: `max(3, ceil(chars / 100))`.
#[must_use]
pub fn aws_units_for(text: &str) -> i64 {
    let chars = text.chars().count();
    let units = i64::try_from(chars.div_ceil(AWS_CHARS_PER_UNIT)).unwrap_or(i64::MAX);
    units.max(AWS_MIN_UNITS)
}

/// GCP units billed for one request: `max(1, round(chars / 1000))`.
///
/// Halves round to even, so 2,500 characters bill as 2 units.
#[must_use]
pub fn gcp_units_for(text: &str) -> i64 {
    let chars = text.chars().count();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    let units = (chars as f64 / GCP_CHARS_PER_UNIT as f64).round_ties_even() as i64;
    units.max(GCP_MIN_UNITS)
}

/// Billing month key (`YYYY-MM`, UTC) for `now`.
#[must_use]
pub fn billing_month(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn aws_units_have_three_unit_minimum() {
        assert_eq!(aws_units_for(""), 3);
        assert_eq!(aws_units_for(&"a".repeat(250)), 3);
    }

    #[test]
    fn aws_units_round_up_per_hundred_chars() {
        assert_eq!(aws_units_for(&"a".repeat(301)), 4);
        assert_eq!(aws_units_for(&"a".repeat(400)), 4);
    }

    #[test]
    fn units_count_characters_not_bytes() {
        // 301 two-byte characters.
        assert_eq!(aws_units_for(&"é".repeat(301)), 4);
    }

    #[test]
    fn gcp_units_have_one_unit_minimum() {
        assert_eq!(gcp_units_for("short"), 1);
        assert_eq!(gcp_units_for(&"a".repeat(400)), 1);
    }

    #[test]
    fn gcp_units_round_half_to_even() {
        assert_eq!(gcp_units_for(&"a".repeat(1_500)), 2);
        assert_eq!(gcp_units_for(&"a".repeat(2_500)), 2);
        assert_eq!(gcp_units_for(&"a".repeat(2_501)), 3);
    }

    #[test]
    fn gcp_cost_is_free_within_first_five_thousand_units() {
        let cost = MonthlyCost::with_units("2024-05", 0, 5_000);
        assert_eq!(cost.gcp_cost, Decimal::ZERO);

        let cost = MonthlyCost::with_units("2024-05", 0, 5_010);
        assert_eq!(cost.gcp_cost, Decimal::new(2, 2)); // 10 * 0.002
    }

    #[test]
    fn total_is_sum_of_provider_costs() {
        let cost = MonthlyCost::with_units("2024-05", 30, 5_001);
        assert_eq!(cost.aws_cost, Decimal::new(30, 4));
        assert_eq!(cost.gcp_cost, Decimal::new(2, 3));
        assert_eq!(cost.total_cost, Decimal::new(50, 4));
    }

    #[test]
    fn exceeds_is_inclusive_of_budget() {
        let cost = MonthlyCost::with_units("2024-05", 10_000, 0); // $1.00
        assert!(cost.exceeds(Decimal::ONE));
        assert!(!cost.exceeds(Decimal::new(101, 2)));
    }

    #[test]
    fn billing_month_formats_year_and_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(billing_month(now), "2024-03");
    }

    #[test]
    fn monthly_cost_serializes_decimals_as_strings() {
        let json = serde_json::to_value(MonthlyCost::with_units("2024-05", 3, 1)).unwrap();
        assert_eq!(json["month"], "2024-05");
        assert_eq!(json["aws_cost"], "0.0003");
    }
}
