//! Number rendering for replies.
//!
//! Whole numbers print without a fractional part and other values in
//! shortest round-trip form. Magnitudes of 1e21 and above, or below 1e-6,
//! switch to exponent form (`1e+21`). Non-finite values are spelled out.

/// Renders a computed value for a `"The result is: …"` style reply.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let scientific = format!("{:e}", value);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            return if exponent.starts_with('-') {
                format!("{}e{}", mantissa, exponent)
            } else {
                format!("{}e+{}", mantissa, exponent)
            };
        }
    }

    value.to_string()
}

/// Renders a value with exactly two decimals (`4` becomes `4.00`).
///
/// Exact halfway cases round away from zero (`0.125` becomes `0.13`).
/// Magnitudes of 1e21 and above fall back to `format_number`.
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }

    let magnitude = value.abs();
    // A value sits exactly halfway between two hundredths only when it is
    // an odd multiple of 1/8; `{:.2}` would round those to even.
    let eighths = magnitude * 8.0;
    let digits = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (eighths as u64) * 25 / 2 + 1;
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    } else {
        format!("{:.2}", magnitude)
    };

    if value < 0.0 && digits != "0.00" {
        format!("-{}", digits)
    } else {
        digits
    }
}
