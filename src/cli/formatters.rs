//! Table and calendar rendering for CLI output

use colored::Colorize;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tabled::{settings::Style, Table, Tabled};

use crate::dividends::MonthGroup;
use crate::quotes::InstrumentQuote;
use crate::store::Holding;
use crate::utils::{format_currency, position_value};

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

pub fn render_holdings(holdings: &[Holding]) -> String {
    if holdings.is_empty() {
        return "No holdings registered".to_string();
    }

    let rows: Vec<HoldingRow> = holdings
        .iter()
        .map(|h| HoldingRow {
            id: h.id.clone(),
            symbol: h.symbol.clone(),
            company: h.company_name.clone(),
            price: h.price.to_string(),
            quantity: h.quantity.to_string(),
            value: position_value(h.price, h.quantity).to_string(),
            registered: h.registered_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Exchange")]
    exchange: String,
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub fn render_search_results(quotes: &[InstrumentQuote]) -> String {
    if quotes.is_empty() {
        return "No results".to_string();
    }

    let rows: Vec<SearchRow> = quotes
        .iter()
        .map(|q| SearchRow {
            symbol: q.symbol.clone(),
            name: q.display_name.clone(),
            price: q
                .last_price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            currency: or_dash(q.currency.as_deref()),
            exchange: or_dash(q.exchange.as_deref()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct CalendarRow {
    #[tabled(rename = "Payment date")]
    payment_date: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Per share")]
    per_share: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Render the monthly calendar plus the per-currency totals footer
pub fn render_calendar(groups: &[MonthGroup], totals: &BTreeMap<String, Decimal>) -> String {
    let mut out = String::new();

    for group in groups {
        out.push_str(&format!("\n{}\n", group.label.bold()));

        let rows: Vec<CalendarRow> = group
            .events
            .iter()
            .map(|e| CalendarRow {
                payment_date: e.entry.payment_date.format("%Y-%m-%d").to_string(),
                symbol: e.entry.symbol.clone(),
                company: e.holding.company_name.clone(),
                per_share: format_currency(e.entry.amount, &e.entry.currency),
                quantity: e.holding.quantity.to_string(),
                total: format_currency(e.total_amount, &e.entry.currency),
            })
            .collect();

        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", "Expected over the next 12 months:".bold()));
    for (currency, total) in totals {
        out.push_str(&format!("  {}: {}\n", currency, format_currency(*total, currency)));
    }

    out
}
