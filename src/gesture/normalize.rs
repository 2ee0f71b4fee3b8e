//! Wrist-relative coordinates.
//!
//! Subtracting the wrist position removes the dependency on where the hand
//! sits in the camera frame. Rotation, scale and camera distance are not
//! corrected.

use crate::gesture::types::{LandmarkFrame, LandmarkPoint};

/// Shift every point so the wrist (index 0) becomes the x-y origin.
///
/// Returns `None` for an empty frame. Depth passes through unchanged.
pub fn normalize(frame: &LandmarkFrame) -> Option<LandmarkFrame> {
    let wrist = *frame.wrist()?;

    Some(
        frame
            .points()
            .iter()
            .map(|p| LandmarkPoint::new(p.x - wrist.x, p.y - wrist.y, p.z))
            .collect(),
    )
}
