//! Per-bin performance history and the multipliers derived from it.
//!
//! - [`aggregate`] rebuilds [`PerformanceRecord`]s from settled wagers.
//! - [`WeightsSnapshot`] is the immutable artifact the sizer reads.
//! - The free functions here turn one bin's record into sizing signals.

mod aggregate;
mod snapshot;

pub use aggregate::{
    aggregate, rebuild_snapshot, Aggregation, PerformanceRecord, PerformanceTable,
};
pub use snapshot::{default_weights, WeightTable, WeightsSnapshot};

/// Samples a bin needs before its multipliers leave neutral.
pub const MIN_MULTIPLIER_SAMPLE: u32 = 25;

/// Samples a bin needs before its additive weight leaves neutral.
pub const MIN_WEIGHT_SAMPLE: u32 = 10;

/// Sample size at which a derived weight gets full confidence.
pub const FULL_CONFIDENCE_SAMPLE: u32 = 30;

/// ROI-driven multiplier.
///
/// Positive ROI boosts linearly (`1 + roi/20`, capped at 2.0). Negative ROI
/// halves every 6 points (floored at 0.1). Neutral below `min_sample`.
#[must_use]
pub fn roi_multiplier(roi: f64, sample_size: u32, min_sample: u32) -> f64 {
    if sample_size < min_sample {
        return 1.0;
    }
    if roi >= 0.0 {
        (1.0 + roi / 20.0).min(2.0)
    } else {
        0.5_f64.powf(roi.abs() / 6.0).max(0.1)
    }
}

/// Calibration-error multiplier.
///
/// Underconfident bins (`error >= 0`) get `1 + 3*error`, capped at 1.5.
/// Overconfident bins halve every 0.10 of error, floored at 0.15.
#[must_use]
pub fn calibration_multiplier(error: f64, sample_size: u32, min_sample: u32) -> f64 {
    if sample_size < min_sample {
        return 1.0;
    }
    if error >= 0.0 {
        (1.0 + 3.0 * error).min(1.5)
    } else {
        0.5_f64.powf(error.abs() / 0.10).max(0.15)
    }
}

/// Mean of the ROI and calibration multipliers for one bin.
#[must_use]
pub fn factor_multiplier(record: &PerformanceRecord, min_sample: u32) -> f64 {
    let roi = roi_multiplier(record.roi, record.sample_size, min_sample);
    let calib = calibration_multiplier(record.calibration_error, record.sample_size, min_sample);
    (roi + calib) / 2.0
}

/// Additive weight derived from ROI.
///
/// A sigmoid mapping ROI into (0, 2), blended toward 1.0 until the bin has
/// [`FULL_CONFIDENCE_SAMPLE`] wagers. Neutral below [`MIN_WEIGHT_SAMPLE`].
#[must_use]
pub fn roi_to_weight(roi: f64, sample_size: u32) -> f64 {
    if sample_size < MIN_WEIGHT_SAMPLE {
        return 1.0;
    }
    let weight = 2.0 / (1.0 + (-2.0 * roi / 50.0).exp());
    let confidence = (f64::from(sample_size) / f64::from(FULL_CONFIDENCE_SAMPLE)).min(1.0);
    1.0 + (weight - 1.0) * confidence
}
