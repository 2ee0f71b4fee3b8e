//! Hand-gesture recognition core.
//!
//! A live frame of 21 hand landmarks is normalized to wrist-relative
//! coordinates and compared, fingertip by fingertip, against the averaged
//! recording of every trained gesture in the library.
//!
//! - `types`: landmark points, frames and match results
//! - `normalize`: wrist-relative translation
//! - `template`: averaging of captured frames
//! - `similarity`: fingertip distance score in [0, 1]
//! - `matcher`: best-match search with threshold
//! - `training`: validation and persistence of new gestures
//! - `recording`: frame capture while a gesture is being trained
//! - `session`: per-feed label, history and announcement state
//! - `engine`: composition used by the HTTP layer

pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod recording;
pub mod session;
pub mod similarity;
pub mod store;
pub mod template;
pub mod training;
pub mod types;

use thiserror::Error;

pub use config::MatcherConfig;
pub use engine::GestureEngine;
pub use store::TemplateStore;
pub use types::{GestureMatch, LandmarkFrame, LandmarkPoint, TemplateScore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("frame {frame_index} has {actual} landmarks, expected {expected}")]
    MalformedInput {
        frame_index: usize,
        expected: usize,
        actual: usize,
    },
}
