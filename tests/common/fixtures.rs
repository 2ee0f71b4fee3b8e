use serde_json::{json, Value};

use gesture_backend::gesture::types::{landmarks, FINGERTIPS, LANDMARK_COUNT};
use gesture_backend::gesture::{LandmarkFrame, LandmarkPoint};

pub const WRIST: (f64, f64) = (320.0, 400.0);

/// A 21-point hand with the wrist at `wrist`, every fingertip at the given
/// wrist-relative offset and the remaining joints folded near the palm.
pub fn hand_at(wrist: (f64, f64), tips: [(f64, f64); 5]) -> LandmarkFrame {
    (0..LANDMARK_COUNT)
        .map(|i| {
            let (dx, dy) = match FINGERTIPS.iter().position(|&t| t == i) {
                Some(finger) => tips[finger],
                None if i == landmarks::WRIST => (0.0, 0.0),
                None => (10.0, -10.0),
            };
            LandmarkPoint::new(wrist.0 + dx, wrist.1 + dy, 0.0)
        })
        .collect()
}

/// Thumb out at (100, 50) from the wrist, other fingertips curled.
pub fn thumbs_up_tips() -> [(f64, f64); 5] {
    [(100.0, 50.0), (20.0, -20.0), (20.0, -15.0), (20.0, -10.0), (20.0, -5.0)]
}

/// Index and middle extended upward.
pub fn peace_tips() -> [(f64, f64); 5] {
    [(30.0, -30.0), (-40.0, -200.0), (40.0, -200.0), (20.0, -10.0), (20.0, -5.0)]
}

pub fn thumbs_up() -> LandmarkFrame {
    hand_at(WRIST, thumbs_up_tips())
}

pub fn peace() -> LandmarkFrame {
    hand_at(WRIST, peace_tips())
}

pub fn frames_json(frame: &LandmarkFrame, count: usize) -> Value {
    json!(vec![frame; count])
}

pub fn train_body(name: &str, frame: &LandmarkFrame, count: usize) -> Value {
    json!({ "name": name, "frames": frames_json(frame, count) })
}

pub fn hands_body(hands: &[LandmarkFrame]) -> Value {
    json!({ "hands": hands })
}
