//! Turning a captured recording into a stored gesture.

use thiserror::Error;

use crate::gesture::config::MatcherConfig;
use crate::gesture::store::TemplateStore;
use crate::gesture::types::LandmarkFrame;
use crate::store::operations::gestures::GestureTemplate;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("gesture name is required")]
    MissingName,
    #[error("too few frames captured: {captured}, need at least {required}")]
    TooFewFrames { captured: usize, required: usize },
    #[error("frame {index} is not a complete 21-point hand")]
    MalformedFrame { index: usize },
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Validate a recording and persist it under `name`.
///
/// Every check runs before the store is touched, so a rejected recording
/// leaves the library unchanged.
pub fn train_template<S>(
    store: &S,
    name: &str,
    frames: Vec<LandmarkFrame>,
    config: &MatcherConfig,
) -> Result<GestureTemplate, TrainingError>
where
    S: TemplateStore + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(TrainingError::MissingName);
    }
    if frames.len() < config.min_training_frames {
        return Err(TrainingError::TooFewFrames {
            captured: frames.len(),
            required: config.min_training_frames,
        });
    }
    if let Some(index) = frames.iter().position(|f| !f.is_well_formed()) {
        return Err(TrainingError::MalformedFrame { index });
    }

    let frame_count = frames.len();
    let template = store.create(name, frames)?;

    if frame_count < config.recommended_training_frames {
        tracing::warn!(
            gesture = %template.name,
            frame_count,
            recommended = config.recommended_training_frames,
            "Gesture trained below recommended frame count"
        );
    }
    tracing::info!(gesture_id = %template.id, gesture = %template.name, frame_count, "Gesture trained");
    Ok(template)
}

/// Recording progress in percent of the recommended frame count, capped at 100.
pub fn training_progress(frame_count: usize, recommended: usize) -> u8 {
    if recommended == 0 {
        return 100;
    }
    (frame_count.saturating_mul(100) / recommended).min(100) as u8
}
