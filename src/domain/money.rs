use rust_decimal::Decimal;

/// Formats a price in rupees with two decimals and thousands separators,
/// e.g. `₹450,000.00`.
pub fn format_inr(amount: Decimal) -> String {
    let text = format!("{:.2}", amount);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("₹{}{}.{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_inr(dec!(450000)), "₹450,000.00");
        assert_eq!(format_inr(dec!(1234567.89)), "₹1,234,567.89");
    }

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(999.5)), "₹999.50");
    }

    #[test]
    fn test_negative_keeps_sign_inside() {
        assert_eq!(format_inr(dec!(-1500)), "₹-1,500.00");
    }
}
