//! Currency formatting for text reports.

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Format `amount` as currency with two decimal places, e.g. "฿1,234.50".
///
/// Negative amounts put the minus sign before the symbol, e.g. "-฿12.00".
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);

    if rounded.is_zero() {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{symbol}0.00");
    }

    let prefix = if rounded.is_sign_negative() {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let number = rounded.abs().to_f64().unwrap_or_default();

    let formatted = Formatter::currency(&prefix)
        .map(|formatter| formatter.precision(Precision::Decimals(2)))
        .map(|formatter| formatter.fmt_string(number));

    let mut formatted_string = match formatted {
        Ok(formatted) => formatted,
        // The prefix was too long for numfmt, fall back to plain formatting.
        Err(_) => return format!("{prefix}{:.2}", rounded.abs()),
    };

    // numfmt omits trailing zeros, so we must add them ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        Some(dot) => {
            let decimals = formatted_string.len() - dot - 1;
            for _ in decimals..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
