//! Capture of training frames.
//!
//! The trainer starts a recording under a name, streams landmark estimates
//! at the polling cadence, and stops the recording to train. Ticks without a
//! detected hand add nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::gesture::training::training_progress;
use crate::gesture::types::LandmarkFrame;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingError {
    #[error("a recording is already in progress for '{0}'")]
    AlreadyRecording(String),
    #[error("no recording in progress")]
    NotRecording,
    #[error("gesture name is required")]
    MissingName,
    #[error("hand frame is not a complete 21-point hand")]
    MalformedFrame,
}

#[derive(Debug, Clone)]
pub struct Recording {
    pub name: String,
    pub frames: Vec<LandmarkFrame>,
    pub started_at: DateTime<Utc>,
    hand_detected: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingStatus {
    pub recording: bool,
    pub name: Option<String>,
    pub frame_count: usize,
    pub progress: u8,
    pub hand_detected: bool,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct TrainingRecorder {
    active: Option<Recording>,
}

impl TrainingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, name: &str) -> Result<(), RecordingError> {
        if let Some(active) = &self.active {
            return Err(RecordingError::AlreadyRecording(active.name.clone()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordingError::MissingName);
        }

        self.active = Some(Recording {
            name: name.to_string(),
            frames: Vec::new(),
            started_at: Utc::now(),
            hand_detected: false,
        });
        tracing::info!(gesture = %name, "Recording started");
        Ok(())
    }

    /// Append the first detected hand of a tick.
    pub fn push(&mut self, hands: &[LandmarkFrame]) -> Result<(), RecordingError> {
        let recording = self.active.as_mut().ok_or(RecordingError::NotRecording)?;

        match hands.first() {
            Some(hand) if hand.is_well_formed() => {
                if !recording.hand_detected {
                    tracing::debug!(gesture = %recording.name, "Hand detected, capturing frames");
                }
                recording.frames.push(hand.clone());
                recording.hand_detected = true;
                Ok(())
            }
            Some(_) => Err(RecordingError::MalformedFrame),
            None => {
                recording.hand_detected = false;
                Ok(())
            }
        }
    }

    /// Finish the recording and hand back its frames.
    pub fn stop(&mut self) -> Result<Recording, RecordingError> {
        let recording = self.active.take().ok_or(RecordingError::NotRecording)?;
        tracing::info!(gesture = %recording.name, frame_count = recording.frames.len(), "Recording stopped");
        Ok(recording)
    }

    /// Discard the active recording. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn status(&self, recommended_frames: usize) -> RecordingStatus {
        match &self.active {
            Some(r) => RecordingStatus {
                recording: true,
                name: Some(r.name.clone()),
                frame_count: r.frames.len(),
                progress: training_progress(r.frames.len(), recommended_frames),
                hand_detected: r.hand_detected,
                started_at: Some(r.started_at),
            },
            None => RecordingStatus {
                recording: false,
                name: None,
                frame_count: 0,
                progress: 0,
                hand_detected: false,
                started_at: None,
            },
        }
    }
}
