/// Placeholder shown instead of a value while values are hidden.
pub const MASKED_VALUE: &str = "••••••";

/// Display form of a variable value.
///
/// The mask is constant: it does not leak the length or content of `value`.
pub fn format_value(value: &str, masked: bool) -> String {
    if masked {
        MASKED_VALUE.to_string()
    } else {
        value.to_string()
    }
}
