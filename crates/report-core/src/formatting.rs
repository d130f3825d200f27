/// Magnitudes from here up have no fractional part (2^52).
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact midpoints round away from zero.
    // From 2^52 up every f64 is integral, so there is nothing to round.
    let factor = 10_f64.powi(decimals as i32);
    let scaled = abs_value * factor;
    let rounded = if scaled >= INTEGRAL_THRESHOLD {
        abs_value
    } else {
        let epsilon = f64::EPSILON * scaled;
        (scaled + epsilon).round() / factor
    };

    let integer_part = rounded.trunc();
    let frac_part = rounded - integer_part;

    // `{:.0}` prints every integer digit; a cast to an integer type would saturate.
    let grouped = group_thousands(&format!("{:.0}", integer_part));

    let result = if decimals == 0 {
        grouped
    } else {
        // "0.50" -> ".50"
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an estimate for digest text: integral values without decimals,
/// everything else with two.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_estimate;
///
/// assert_eq!(format_estimate(80.0), "80");
/// assert_eq!(format_estimate(12500.0), "12,500");
/// assert_eq!(format_estimate(3.456), "3.46");
/// ```
pub fn format_estimate(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        format_number(value, 2)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = s.len() % 3;
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
