//! Aggregation layer
//!
//! Pure reducers over projected dividend events: currency-segregated
//! totals and a month-keyed calendar grouping.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::ProjectedDividendEvent;

/// Events of a single calendar month, in the order they appeared in the
/// input (payment-date ascending when fed from the projection engine)
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub events: Vec<ProjectedDividendEvent>,
}

/// Sum `total_amount` per currency. Currencies are never mixed or
/// converted; a currency with no events is absent, not zero.
pub fn totals_by_currency(events: &[ProjectedDividendEvent]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for event in events {
        *totals.entry(event.entry.currency.clone()).or_insert(Decimal::ZERO) +=
            event.total_amount;
    }

    totals
}

/// Default month key: English month name and year, e.g. "February 2026"
pub fn month_label(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    format!("{} {}", MONTHS[date.month0() as usize], date.year())
}

/// Group events by the month of their payment date using the default
/// label format
pub fn group_by_month(events: &[ProjectedDividendEvent]) -> Vec<MonthGroup> {
    group_by_month_with(events, month_label)
}

/// Group events by payment month with a caller-supplied labeler. The
/// label format is a pluggable concern, not part of the grouping
/// algorithm. Months appear in first-occurrence order and events stay in
/// input order within their group.
pub fn group_by_month_with<F>(events: &[ProjectedDividendEvent], labeler: F) -> Vec<MonthGroup>
where
    F: Fn(NaiveDate) -> String,
{
    let mut groups: Vec<MonthGroup> = Vec::new();

    for event in events {
        let label = labeler(event.entry.payment_date);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(MonthGroup {
                label,
                events: vec![event.clone()],
            }),
        }
    }

    groups
}
