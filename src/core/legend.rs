use rust_decimal::Decimal;

use crate::error::{ChartError, ChartResult};

/// Smallest number of legend samples that still spans a range.
pub const MIN_LEGEND_BINS: usize = 2;

/// Evenly spaced samples over `[vmin, vmax]`, both ends included.
///
/// The last sample is exactly `vmax` regardless of float drift.
pub fn legend_samples(vmin: f64, vmax: f64, bins: usize) -> ChartResult<Vec<f64>> {
    if bins < MIN_LEGEND_BINS {
        return Err(ChartError::InvalidConfig(format!(
            "legend_bins must be >= {MIN_LEGEND_BINS}, got {bins}"
        )));
    }
    if !vmin.is_finite() || !vmax.is_finite() {
        return Err(ChartError::InvalidConfig(
            "legend bounds must be finite".to_owned(),
        ));
    }

    let last = bins - 1;
    let step = (vmax - vmin) / last as f64;
    Ok((0..bins)
        .map(|i| if i == last { vmax } else { vmin + step * i as f64 })
        .collect())
}

/// Formats a legend sample rounded half-to-even to `precision` decimals.
///
/// Rounding works on the stored binary value, so `2.675` (held as
/// `2.67499...`) rounds down to `2.67`. `None` rounds to an integer.
/// Trailing zeros are dropped, so `2.50` with precision 2 renders as `2.5`.
#[must_use]
pub fn format_auto_label(value: f64, precision: Option<u32>) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let rounded = decimal.round_dp(precision.unwrap_or(0)).normalize();
            if rounded.is_zero() {
                "0".to_owned()
            } else {
                rounded.to_string()
            }
        }
        None => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_auto_label;

    #[test]
    fn auto_labels_round_half_to_even() {
        assert_eq!(format_auto_label(2.5, None), "2");
        assert_eq!(format_auto_label(3.5, None), "4");
        assert_eq!(format_auto_label(33.333_333, Some(1)), "33.3");
        assert_eq!(format_auto_label(25.0, Some(2)), "25");
        assert_eq!(format_auto_label(-0.2, None), "0");
        assert_eq!(format_auto_label(0.1, Some(2)), "0.1");
    }

    #[test]
    fn auto_labels_round_the_stored_binary_value() {
        assert_eq!(format_auto_label(2.675, Some(2)), "2.67");
        assert_eq!(format_auto_label(1.005, Some(2)), "1");
        assert_eq!(format_auto_label(66.666_666_666_666_67, Some(1)), "66.7");
    }
}
