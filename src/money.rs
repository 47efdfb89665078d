// 💵 Money - rendering amounts for people
//
// All amounts in the crate are rust_decimal::Decimal, never f64,
// so 111.11 + 222.22 + 333.33 is exactly 666.66.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to whole cents (half away from zero)
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as dollars with thousands separators and two decimals
///
/// Example: 1234567.8 → "$1,234,567.80", -12 → "-$12.00"
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(5)), "$5.00");
        assert_eq!(format_currency(dec!(199.95)), "$199.95");
        assert_eq!(format_currency(dec!(399.9)), "$399.90");
    }

    #[test]
    fn test_format_thousands_separators() {
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(999999.99)), "$999,999.99");
        assert_eq!(format_currency(dec!(1234567.8)), "$1,234,567.80");
    }

    #[test]
    fn test_format_negative_amounts() {
        assert_eq!(format_currency(dec!(-12)), "-$12.00");
        assert_eq!(format_currency(dec!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(-1.005)), dec!(-1.01));
        assert_eq!(format_currency(dec!(0.004)), "$0.00");
        assert_eq!(format_currency(dec!(-0.004)), "$0.00");
    }
}
