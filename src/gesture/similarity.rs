//! Fingertip distance heuristic.
//!
//! Only the five fingertips are compared, in the x-y plane. The summed squared
//! distance is mapped linearly onto [0, 1] by the configured distance scale,
//! which is in squared source-frame pixels and has to be recalibrated when the
//! camera resolution changes.

use crate::gesture::types::{LandmarkFrame, FINGERTIPS};

/// Similarity in [0, 1] between two frames, 1 meaning all fingertips coincide.
///
/// Returns 0 when either frame is absent, when the lengths differ, or when a
/// frame is too short to contain every fingertip.
pub fn similarity(a: Option<&LandmarkFrame>, b: Option<&LandmarkFrame>, distance_scale: f64) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if a.len() != b.len() {
        return 0.0;
    }

    let Some(sum) = fingertip_distance_sq(a, b) else {
        return 0.0;
    };
    if !sum.is_finite() || distance_scale.is_nan() || distance_scale <= 0.0 {
        return 0.0;
    }

    (1.0 - sum / distance_scale).clamp(0.0, 1.0)
}

/// Sum of squared planar distances between corresponding fingertips.
pub fn fingertip_distance_sq(a: &LandmarkFrame, b: &LandmarkFrame) -> Option<f64> {
    FINGERTIPS.iter().try_fold(0.0, |acc, &tip| {
        let pa = a.get(tip)?;
        let pb = b.get(tip)?;
        Some(acc + pa.planar_distance_sq(pb))
    })
}
