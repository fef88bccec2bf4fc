//! Display formatting for statistics, following Greek locale conventions
//! (`,` decimal point, `.` thousands grouping).

/// Placeholder for values that cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Formats `value` with exactly `digits` fractional digits.
///
/// `None` and non-finite values render as [`PLACEHOLDER`].
pub fn format_decimal(value: Option<f64>, digits: usize) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return PLACEHOLDER.to_string();
    };

    let fixed = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && fixed.chars().any(|ch| ch != '0' && ch != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
