// Dividend projection - models, the static schedule, and the engines
// that turn registered holdings into a 12-month payout calendar.

pub mod aggregate;
pub mod projection;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::Holding;

pub use aggregate::{
    group_by_month, group_by_month_with, month_label, totals_by_currency, MonthGroup,
};
pub use projection::project;

/// One announced dividend payment for a symbol.
///
/// Static reference data; in production this would come from a live feed.
/// Invariant: `payment_date >= ex_date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendScheduleEntry {
    pub symbol: String,
    pub ex_date: NaiveDate,
    pub payment_date: NaiveDate,
    /// Amount per share in `currency`
    pub amount: Decimal,
    pub currency: String,
}

/// A projected payout: one holding crossed with one schedule entry inside
/// the horizon. Recomputed on every projection pass, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedDividendEvent {
    pub holding: Holding,
    pub entry: DividendScheduleEntry,
    /// `entry.amount * holding.quantity`
    pub total_amount: Decimal,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("schedule dates are valid")
}

fn entry(
    symbol: &str,
    ex: (i32, u32, u32),
    pay: (i32, u32, u32),
    amount: Decimal,
    currency: &str,
) -> DividendScheduleEntry {
    DividendScheduleEntry {
        symbol: symbol.to_string(),
        ex_date: ymd(ex.0, ex.1, ex.2),
        payment_date: ymd(pay.0, pay.1, pay.2),
        amount,
        currency: currency.to_string(),
    }
}

/// Built-in dividend schedule: US quarterly payers and Japanese
/// semi-annual payers.
static SCHEDULE: Lazy<Vec<DividendScheduleEntry>> = Lazy::new(|| {
    let usd = |cents: i64| Decimal::new(cents, 2);
    let jpy = |yen: i64| Decimal::new(yen, 0);

    vec![
        // AAPL quarterly
        entry("AAPL", (2025, 11, 8), (2025, 11, 14), usd(24), "USD"),
        entry("AAPL", (2026, 2, 7), (2026, 2, 13), usd(25), "USD"),
        entry("AAPL", (2026, 5, 9), (2026, 5, 15), usd(25), "USD"),
        entry("AAPL", (2026, 8, 8), (2026, 8, 14), usd(26), "USD"),
        // GOOGL quarterly
        entry("GOOGL", (2025, 12, 13), (2025, 12, 19), usd(20), "USD"),
        entry("GOOGL", (2026, 3, 14), (2026, 3, 20), usd(21), "USD"),
        entry("GOOGL", (2026, 6, 13), (2026, 6, 19), usd(21), "USD"),
        entry("GOOGL", (2026, 9, 12), (2026, 9, 18), usd(22), "USD"),
        // MSFT quarterly
        entry("MSFT", (2025, 11, 20), (2025, 12, 12), usd(75), "USD"),
        entry("MSFT", (2026, 2, 19), (2026, 3, 12), usd(78), "USD"),
        entry("MSFT", (2026, 5, 21), (2026, 6, 11), usd(78), "USD"),
        entry("MSFT", (2026, 8, 20), (2026, 9, 10), usd(80), "USD"),
        // Japanese stocks, semi-annual
        entry("7203.T", (2026, 3, 28), (2026, 6, 27), jpy(75), "JPY"),
        entry("7203.T", (2026, 9, 30), (2026, 12, 5), jpy(75), "JPY"),
        entry("6758.T", (2026, 3, 30), (2026, 6, 27), jpy(45), "JPY"),
        entry("6758.T", (2026, 9, 30), (2026, 12, 5), jpy(45), "JPY"),
        entry("9984.T", (2026, 3, 30), (2026, 6, 27), jpy(55), "JPY"),
        entry("9984.T", (2026, 9, 30), (2026, 12, 5), jpy(55), "JPY"),
    ]
});

/// The built-in read-only schedule
pub fn builtin_schedule() -> &'static [DividendScheduleEntry] {
    &SCHEDULE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_payment_never_precedes_ex_date() {
        for entry in builtin_schedule() {
            assert!(
                entry.payment_date >= entry.ex_date,
                "{} pays {} before ex-date {}",
                entry.symbol,
                entry.payment_date,
                entry.ex_date
            );
        }
    }

    #[test]
    fn test_schedule_amounts_are_positive() {
        for entry in builtin_schedule() {
            assert!(entry.amount > Decimal::ZERO, "{} has no amount", entry.symbol);
            assert!(!entry.currency.is_empty());
        }
    }

    #[test]
    fn test_schedule_covers_known_symbols() {
        let symbols: std::collections::HashSet<&str> =
            builtin_schedule().iter().map(|e| e.symbol.as_str()).collect();
        for expected in ["AAPL", "GOOGL", "MSFT", "7203.T", "6758.T", "9984.T"] {
            assert!(symbols.contains(expected), "missing {}", expected);
        }
    }
}
