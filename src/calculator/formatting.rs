//! Number formatting for results.

/// Format a result as a plain decimal string.
///
/// Uses the shortest representation that round-trips to the same `f64` and
/// never switches to exponent notation, so the output can be fed back into an
/// expression. Negative zero is shown as `0`.
pub fn format_result(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}

/// Format a result for display with thousand separators.
pub fn format_grouped(value: f64) -> String {
    let raw = format_result(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
        }
        None => format!("{}{}", sign, group_thousands(unsigned)),
    }
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
