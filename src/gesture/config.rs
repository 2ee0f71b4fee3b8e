use serde::{Deserialize, Serialize};

/// Minimum winning score for a match to be reported.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Summed squared fingertip distance (px²) at which similarity reaches 0.
/// Calibrated for a 640x480 webcam feed.
pub const DEFAULT_DISTANCE_SCALE: f64 = 50_000.0;

/// Recordings shorter than this are rejected at training time.
pub const DEFAULT_MIN_TRAINING_FRAMES: usize = 10;

/// Recording length that training progress is measured against.
pub const DEFAULT_RECOMMENDED_TRAINING_FRAMES: usize = 30;

/// Number of distinct recognitions kept in the session history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherConfig {
    pub similarity_threshold: f64,
    pub distance_scale: f64,
    #[serde(default = "default_min_training_frames")]
    pub min_training_frames: usize,
    #[serde(default = "default_recommended_training_frames")]
    pub recommended_training_frames: usize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_min_training_frames() -> usize {
    DEFAULT_MIN_TRAINING_FRAMES
}
fn default_recommended_training_frames() -> usize {
    DEFAULT_RECOMMENDED_TRAINING_FRAMES
}
fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            distance_scale: DEFAULT_DISTANCE_SCALE,
            min_training_frames: DEFAULT_MIN_TRAINING_FRAMES,
            recommended_training_frames: DEFAULT_RECOMMENDED_TRAINING_FRAMES,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MatcherConfig {
    pub fn from_env(env_config: &crate::config::RecognitionEnvConfig) -> Self {
        let config = Self {
            similarity_threshold: env_config.similarity_threshold,
            distance_scale: env_config.distance_scale,
            min_training_frames: env_config.min_training_frames,
            recommended_training_frames: env_config.recommended_training_frames,
            history_limit: env_config.history_limit,
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid recognition settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err("similarityThreshold must be in [0,1]".to_string());
        }
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err("distanceScale must be a finite value > 0".to_string());
        }
        if self.min_training_frames == 0 {
            return Err("minTrainingFrames must be >= 1".to_string());
        }
        if self.recommended_training_frames < self.min_training_frames {
            return Err("recommendedTrainingFrames must be >= minTrainingFrames".to_string());
        }
        if self.history_limit == 0 {
            return Err("historyLimit must be >= 1".to_string());
        }
        Ok(())
    }
}
