use std::sync::LazyLock;

use regex::Regex;

static SCIENTIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*\.?[0-9]+)[eE]([+-]?\d+)$").expect("valid scientific-notation regex")
});

/// Turn the raw Reynolds token of a zone header into a legend label.
///
/// ```text
/// "5E5"    -> "Re = 5×10^5"
/// "750000" -> "Re = 7.5×10^5"
/// "3"      -> "Re = 3"
/// ```
pub fn format_reynolds_label(raw: &str) -> String {
    let label = raw.trim();
    if label.is_empty() {
        return "Re = unknown".to_string();
    }

    if let Some(caps) = SCIENTIFIC.captures(label) {
        let base = caps[1].parse::<f64>().ok();
        let exponent = caps[2].parse::<i32>().ok();
        if let (Some(base), Some(exponent)) = (base, exponent) {
            return format!("Re = {}×10^{exponent}", trim_float(base));
        }
    }

    let Ok(value) = label.parse::<f64>() else {
        return format!("Re = {label}");
    };
    if !value.is_finite() || value <= 0.0 {
        return format!("Re = {}", trim_float(value));
    }

    let (mantissa, exponent) = normalise(value);
    if exponent == 0 {
        format!("Re = {}", trim_float(mantissa))
    } else {
        format!("Re = {}×10^{exponent}", trim_float(mantissa))
    }
}

/// Split a positive value into a mantissa in `[1, 10)` and a power of ten.
fn normalise(value: f64) -> (f64, i32) {
    let mut exponent = value.log10().floor() as i32;
    let mut mantissa = round_sig(value / 10f64.powi(exponent));
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    (mantissa, exponent)
}

/// Round to six significant digits in `[1, 10)`, dropping float noise.
fn round_sig(mantissa: f64) -> f64 {
    (mantissa * 1e5).round() / 1e5
}

/// Print without a trailing `.0` or float noise (`5`, `1.5`).
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", (value * 1e6).round() / 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_tokens_keep_their_exponent() {
        assert_eq!(format_reynolds_label("5E5"), "Re = 5×10^5");
        assert_eq!(format_reynolds_label("1.5e6"), "Re = 1.5×10^6");
        assert_eq!(format_reynolds_label("3e+06"), "Re = 3×10^6");
    }

    #[test]
    fn plain_numbers_are_normalised() {
        assert_eq!(format_reynolds_label("750000"), "Re = 7.5×10^5");
        assert_eq!(format_reynolds_label("1000000"), "Re = 1×10^6");
        assert_eq!(format_reynolds_label("3"), "Re = 3");
        assert_eq!(format_reynolds_label("0.5"), "Re = 5×10^-1");
    }

    #[test]
    fn odd_tokens_fall_back() {
        assert_eq!(format_reynolds_label("   "), "Re = unknown");
        assert_eq!(format_reynolds_label("high"), "Re = high");
    }

    #[test]
    fn non_positive_values_print_plainly() {
        assert_eq!(format_reynolds_label("-5"), "Re = -5");
        assert_eq!(format_reynolds_label("0"), "Re = 0");
        assert_eq!(format_reynolds_label("-2.5"), "Re = -2.5");
    }
}
