//! Number rendering.
//!
//! Finite numbers use the script engine's number-to-text rules: the shortest
//! digit string that round-trips, in plain notation for decimal exponents in
//! `-7 < n <= 21` and exponential notation (`1e+21`, `1.5e-7`) elsewhere.

/// Renders a number for diagnostics: `NaN`, `-0` for negative zero, and
/// [`number_to_string`] for everything else.
///
/// # Examples
///
/// ```rust
/// use valprint::print::number::print_number;
/// assert_eq!(print_number(f64::NAN), "NaN");
/// assert_eq!(print_number(-0.0), "-0");
/// assert_eq!(print_number(0.0), "0");
/// assert_eq!(print_number(1e21), "1e+21");
/// ```
pub fn print_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 && n.is_sign_negative() {
        return "-0".to_string();
    }
    number_to_string(n)
}

/// The plain number-to-text conversion. Both zeros render as `0`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    let (digits, exponent) = shortest_digits(n);
    let k = digits.len() as i32;
    // position of the decimal point relative to the first digit
    let point = exponent + 1;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let sign = if point - 1 < 0 { '-' } else { '+' };
        let magnitude = (point - 1).abs();
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, magnitude)
        } else {
            format!("{}.{}e{}{}", first, rest, sign, magnitude)
        }
    }
}

/// Splits a positive finite number into its shortest round-trip digits and
/// the decimal exponent of the first digit.
fn shortest_digits(n: f64) -> (String, i32) {
    // `{:e}` prints the shortest round-trip mantissa, e.g. `1.2345e-7`
    let formatted = format!("{:e}", n);
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exponent.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-7.0), "-7");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
        assert_eq!(number_to_string(1.2345678901234568e20), "123456789012345680000");
    }

    #[test]
    fn fractions_use_shortest_digits() {
        assert_eq!(number_to_string(0.1), "0.1");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(123.456), "123.456");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn large_and_tiny_magnitudes_use_exponents() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e22), "1.5e+22");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(f64::MAX), "1.7976931348623157e+308");
        assert_eq!(number_to_string(5e-324), "5e-324");
    }

    #[test]
    fn special_values() {
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(print_number(-0.0), "-0");
        assert_eq!(print_number(f64::NAN), "NaN");
        assert_eq!(print_number(-f64::NAN), "NaN");
    }
}
