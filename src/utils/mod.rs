//! Formatting and validation helpers shared by the CLI layer

use rust_decimal::Decimal;

use crate::error::DivvyError;
use crate::store::RegistrationDraft;

/// Add thousands separators to a bare integer string
fn group_thousands(digits: &str) -> String {
    digits
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Format an amount for display in its own currency.
///
/// JPY has no minor unit, so it renders grouped with no decimals; USD
/// renders with two decimals; anything else falls back to
/// `"<amount> <code>"`. Amounts are never converted between currencies.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    let abs = amount.abs();

    match currency {
        "JPY" => {
            let rounded = abs.round();
            format!("{}¥{}", sign, group_thousands(&rounded.to_string()))
        }
        "USD" => format!("{}${:.2}", sign, abs),
        _ => format!("{}{:.2} {}", sign, abs, currency),
    }
}

/// Market value of a position
pub fn position_value(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Check a registration draft before it reaches the store. The store
/// trusts its input, so this is the only gate.
pub fn validate_draft(draft: &RegistrationDraft) -> Result<(), DivvyError> {
    if draft.symbol.trim().is_empty() {
        return Err(DivvyError::InvalidDraft("symbol must not be empty".to_string()));
    }
    if draft.quantity < 1 {
        return Err(DivvyError::InvalidDraft(
            "quantity must be at least 1".to_string(),
        ));
    }
    if draft.price < Decimal::new(1, 2) {
        return Err(DivvyError::InvalidDraft(
            "price must be at least 0.01".to_string(),
        ));
    }
    Ok(())
}
