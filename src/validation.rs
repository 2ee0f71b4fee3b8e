//! Request-level checks shared by the gesture, recognition and training routes.
//!
//! The core gesture functions stay total over arbitrary input; these checks
//! reject what the HTTP surface should never pass through.

use crate::constants::{MAX_FRAMES_PER_UPLOAD, MAX_GESTURE_NAME_CHARS, MAX_HANDS_PER_TICK};
use crate::gesture::types::LANDMARK_COUNT;
use crate::gesture::LandmarkFrame;

/// Blank names are left to training, which reports them as a missing name.
pub fn validate_gesture_name(name: &str) -> Result<(), &'static str> {
    if name.trim().chars().count() > MAX_GESTURE_NAME_CHARS {
        return Err("Gesture name must be at most 64 characters");
    }
    if name.chars().any(char::is_control) {
        return Err("Gesture name must not contain control characters");
    }
    Ok(())
}

/// Every frame must carry exactly 21 finite points.
pub fn validate_frames(frames: &[LandmarkFrame]) -> Result<(), String> {
    if frames.len() > MAX_FRAMES_PER_UPLOAD {
        return Err(format!(
            "At most {MAX_FRAMES_PER_UPLOAD} frames can be uploaded at once"
        ));
    }
    match frames.iter().position(|f| !f.is_well_formed()) {
        Some(index) => Err(format!(
            "Frame {index} must contain exactly {LANDMARK_COUNT} finite landmarks"
        )),
        None => Ok(()),
    }
}

pub fn validate_hands(hands: &[LandmarkFrame]) -> Result<(), String> {
    if hands.len() > MAX_HANDS_PER_TICK {
        return Err(format!("At most {MAX_HANDS_PER_TICK} hands per frame"));
    }
    match hands.iter().position(|f| !f.is_well_formed()) {
        Some(index) => Err(format!(
            "Hand {index} must contain exactly {LANDMARK_COUNT} finite landmarks"
        )),
        None => Ok(()),
    }
}
