//! Dividend projection engine
//!
//! Crosses the holdings set with the dividend schedule and keeps every
//! payment falling inside the rolling 12-calendar-month horizon.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use super::{DividendScheduleEntry, ProjectedDividendEvent};
use crate::store::Holding;

/// End of the projection horizon: `now` with the month field advanced by
/// twelve. Calendar arithmetic, not a 365-day offset, so month-length and
/// leap-year irregularities come from the calendar itself.
fn horizon_end(now: NaiveDate) -> NaiveDate {
    now.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX)
}

/// Project upcoming dividend events for the given holdings.
///
/// A schedule entry is included for a holding iff the symbols match and
/// its payment date falls in `[now, now + 12 months]`, both bounds
/// inclusive. Separate holdings of the same symbol each produce their own
/// events. Output is sorted by payment date, with (symbol, holding id) as
/// the deterministic tie-break.
pub fn project(
    holdings: &[Holding],
    entries: &[DividendScheduleEntry],
    now: NaiveDate,
) -> Vec<ProjectedDividendEvent> {
    let end = horizon_end(now);

    let mut events: Vec<ProjectedDividendEvent> = Vec::new();

    for holding in holdings {
        for entry in entries {
            if entry.symbol != holding.symbol {
                continue;
            }
            if entry.payment_date < now || entry.payment_date > end {
                continue;
            }

            events.push(ProjectedDividendEvent {
                holding: holding.clone(),
                entry: entry.clone(),
                total_amount: entry.amount * Decimal::from(holding.quantity),
            });
        }
    }

    events.sort_by(|a, b| {
        a.entry
            .payment_date
            .cmp(&b.entry.payment_date)
            .then_with(|| a.entry.symbol.cmp(&b.entry.symbol))
            .then_with(|| a.holding.id.cmp(&b.holding.id))
    });

    debug!(
        "Projected {} dividend events for {} holdings between {} and {}",
        events.len(),
        holdings.len(),
        now,
        end
    );

    events
}
