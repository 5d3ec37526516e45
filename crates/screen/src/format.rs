//! Reading formatting

/// Separator between values
pub const VALUE_SEPARATOR: &str = ", ";

/// Text shown for a sensor the device does not have
pub const NOT_AVAILABLE: &str = "N/A";

/// Join raw values with `", "`, no trailing separator
///
/// Whole numbers keep their fractional part (`42.0`, not `42`). Magnitudes
/// below `1e-4` or from `1e16` up switch to exponent form (`1e-7`), and
/// non-finite values print as `inf`, `-inf` and `NaN`.
pub fn format_values(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}
