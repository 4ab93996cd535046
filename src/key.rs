//! Canonical string keys for mark positions.

/// Number of decimal digits kept when canonicalizing a value.
pub const KEY_PRECISION: usize = 5;

/// Format `value` with five decimals, then trim trailing zeros and a
/// dangling decimal point. Values that agree to five decimals share a key.
pub fn position_key(value: f64) -> String {
    let formatted = format!("{:.*}", KEY_PRECISION, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        // "-0.000001" rounds to "-0.00000"
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
