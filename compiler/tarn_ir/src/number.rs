//! Number rendering shared by the pretty-printer and the print intrinsic.

use std::num::FpCategory;

/// Render a number the way Tarn programs print it.
///
/// Integral values drop the fractional part (`3`, not `3.0`), negative zero
/// prints as `0`, and non-finite values print as `NaN`, `Infinity` and
/// `-Infinity`.
pub fn format_number(value: f64) -> String {
    match value.classify() {
        FpCategory::Nan => "NaN".to_string(),
        FpCategory::Infinite if value.is_sign_positive() => "Infinity".to_string(),
        FpCategory::Infinite => "-Infinity".to_string(),
        FpCategory::Zero => "0".to_string(),
        FpCategory::Normal | FpCategory::Subnormal => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn fractions_keep_their_digits() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
