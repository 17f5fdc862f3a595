//! Display formatting for listing cards and detail views.

/// Formats `price` as US dollars with thousands separators, e.g.
/// `250000.0` -> `$250,000` and `99000.5` -> `$99,000.5`.
///
/// Cents are shown only when non-zero, with trailing zeros dropped.
/// Sub-cent fractions round half away from zero.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "$0".to_string();
    }
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    if price < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push('$');
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    match cents % 100 {
        0 => {}
        fraction if fraction % 10 == 0 => out.push_str(&format!(".{}", fraction / 10)),
        fraction => out.push_str(&format!(".{fraction:02}")),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_price;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_price(250_000.0), "$250,000");
        assert_eq!(format_price(1_234_567.0), "$1,234,567");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(format_price(0.0), "$0");
    }

    #[test]
    fn keeps_up_to_two_fraction_digits() {
        assert_eq!(format_price(99_000.5), "$99,000.5");
        assert_eq!(format_price(1_200.25), "$1,200.25");
        assert_eq!(format_price(12.07), "$12.07");
        assert_eq!(format_price(76_000.001), "$76,000");
        assert_eq!(format_price(1_999.999), "$2,000");
    }

    #[test]
    fn handles_negative_and_non_finite() {
        assert_eq!(format_price(-1_500.0), "-$1,500");
        assert_eq!(format_price(-0.001), "$0");
        assert_eq!(format_price(f64::NAN), "$0");
    }
}
