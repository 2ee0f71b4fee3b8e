use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::gesture::config::MatcherConfig;
use crate::gesture::matcher::{self, PreparedTemplate};
use crate::gesture::recording::{RecordingError, RecordingStatus, TrainingRecorder};
use crate::gesture::session::{RecognitionSession, SessionSnapshot};
use crate::gesture::store::TemplateStore;
use crate::gesture::training::{self, TrainingError};
use crate::gesture::types::{GestureMatch, LandmarkFrame, TemplateScore};
use crate::gesture::GestureError;
use crate::store::operations::gestures::{GestureDataset, GestureTemplate};
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TickStatus {
    Recognized,
    NoGesture,
    NoHand,
    /// The previous tick was still running.
    Skipped,
}

/// Result of one polling tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOutcome {
    pub status: TickStatus,
    pub gesture: Option<GestureMatch>,
    pub label: String,
    pub changed: bool,
    pub announce: Option<String>,
}

/// Outcome of stopping a recording: the trained gesture, or why training failed.
#[derive(Debug)]
pub struct StoppedRecording {
    pub frame_count: usize,
    pub result: Result<GestureTemplate, TrainingError>,
}

/// Composes the gesture library, matcher settings, session state and the
/// training recorder.
///
/// Averaged templates are cached for the whole library. Every library write
/// goes through the engine and bumps a generation counter, and a cache fill
/// computed against an older generation is discarded.
pub struct GestureEngine {
    store: Arc<Store>,
    config: RwLock<MatcherConfig>,
    session: RecognitionSession,
    recorder: Mutex<TrainingRecorder>,
    prepared: RwLock<Option<(u64, Arc<Vec<PreparedTemplate>>)>>,
    generation: AtomicU64,
}

impl GestureEngine {
    pub fn new(config: MatcherConfig, store: Arc<Store>) -> Self {
        Self {
            store,
            config: RwLock::new(config),
            session: RecognitionSession::new(),
            recorder: Mutex::new(TrainingRecorder::new()),
            prepared: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn get_config(&self) -> MatcherConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reload_config(&self, new_config: MatcherConfig) -> Result<(), String> {
        new_config.validate()?;
        let mut cfg = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cfg = new_config;
        tracing::info!(
            threshold = cfg.similarity_threshold,
            distance_scale = cfg.distance_scale,
            "Matcher config reloaded"
        );
        Ok(())
    }

    // ── Recognition ────────────────────────────────────────

    /// Best match for a single live frame, or `None` when nothing clears the
    /// threshold. Does not touch the session.
    pub fn recognize(&self, live: &LandmarkFrame) -> Option<GestureMatch> {
        if live.is_empty() {
            return None;
        }
        let config = self.get_config();
        matcher::best_match(live, &self.library(), &config)
    }

    /// One polling tick: the landmark source's hands for this frame, zero or one.
    pub fn tick(&self, hands: &[LandmarkFrame]) -> TickOutcome {
        let Some(_guard) = self.session.try_begin() else {
            return TickOutcome {
                status: TickStatus::Skipped,
                gesture: None,
                label: self.session.current_label(),
                changed: false,
                announce: None,
            };
        };

        let config = self.get_config();
        let (status, gesture) = match hands.first() {
            None => (TickStatus::NoHand, None),
            Some(live) => match self.recognize(live) {
                Some(m) => (TickStatus::Recognized, Some(m)),
                None => (TickStatus::NoGesture, None),
            },
        };

        let update = self.session.record(gesture.as_ref(), config.history_limit);
        TickOutcome {
            status,
            gesture,
            label: update.label,
            changed: update.changed,
            announce: update.announce,
        }
    }

    /// Score of the live frame against every eligible template.
    pub fn scores(&self, live: &LandmarkFrame) -> Vec<TemplateScore> {
        let config = self.get_config();
        matcher::score_prepared(live, &self.library(), &config)
    }

    pub fn session(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn reset_session(&self) {
        self.session.reset();
    }

    /// Prepared library, served from cache when it is current. A storage
    /// failure degrades to an empty library.
    fn library(&self) -> Arc<Vec<PreparedTemplate>> {
        let generation = self.generation.load(Ordering::Acquire);
        if let Some((cached_gen, cached)) = self
            .prepared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            if *cached_gen == generation {
                return cached.clone();
            }
        }

        let templates = match TemplateStore::list(self.store.as_ref()) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load gesture library, treating as empty");
                return Arc::new(Vec::new());
            }
        };
        let prepared = Arc::new(matcher::prepare_all(&templates));

        let mut slot = self.prepared.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::Acquire) == generation {
            *slot = Some((generation, prepared.clone()));
        }
        prepared
    }

    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    // ── Library management ─────────────────────────────────

    pub fn train(
        &self,
        name: &str,
        frames: Vec<LandmarkFrame>,
    ) -> Result<GestureTemplate, TrainingError> {
        let config = self.get_config();
        let template = training::train_template(self.store.as_ref(), name, frames, &config)?;
        self.invalidate();
        Ok(template)
    }

    pub fn delete_gesture(&self, gesture_id: &str) -> Result<bool, StoreError> {
        let deleted = TemplateStore::delete_one(self.store.as_ref(), gesture_id)?;
        if deleted {
            self.invalidate();
            tracing::info!(gesture_id, "Gesture deleted");
        }
        Ok(deleted)
    }

    pub fn delete_gesture_at(&self, index: usize) -> Result<GestureTemplate, StoreError> {
        let removed = self.store.delete_gesture_at(index)?;
        self.invalidate();
        tracing::info!(gesture_id = %removed.id, index, "Gesture deleted by position");
        Ok(removed)
    }

    pub fn delete_all(&self) -> Result<usize, StoreError> {
        let count = TemplateStore::delete_all(self.store.as_ref())?;
        self.invalidate();
        tracing::info!(count, "All gestures deleted");
        Ok(count)
    }

    /// Append datasets to the library. Each one has to meet the same frame
    /// minimum as training; nothing is written if any dataset falls short.
    pub fn import(
        &self,
        datasets: Vec<GestureDataset>,
    ) -> Result<Vec<GestureTemplate>, TrainingError> {
        let required = self.get_config().min_training_frames;
        if let Some(short) = datasets.iter().find(|d| d.frames.len() < required) {
            return Err(TrainingError::TooFewFrames {
                captured: short.frames.len(),
                required,
            });
        }
        let imported = self.store.import_gestures(datasets)?;
        self.invalidate();
        tracing::info!(count = imported.len(), "Gestures imported");
        Ok(imported)
    }

    /// Averaged, wrist-relative reference frame of one stored gesture.
    pub fn template_for(
        &self,
        gesture_id: &str,
    ) -> Result<Option<(GestureTemplate, Option<PreparedTemplate>)>, TemplateError> {
        let Some(template) = self.store.get_gesture(gesture_id)? else {
            return Ok(None);
        };
        let prepared = matcher::prepare(&template)?;
        Ok(Some((template, prepared)))
    }

    // ── Training recorder ──────────────────────────────────

    pub fn start_recording(&self, name: &str) -> Result<RecordingStatus, RecordingError> {
        let recommended = self.get_config().recommended_training_frames;
        let mut recorder = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        recorder.start(name)?;
        Ok(recorder.status(recommended))
    }

    pub fn record_frame(&self, hands: &[LandmarkFrame]) -> Result<RecordingStatus, RecordingError> {
        let recommended = self.get_config().recommended_training_frames;
        let mut recorder = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        recorder.push(hands)?;
        Ok(recorder.status(recommended))
    }

    /// Stop the active recording and train from whatever it captured.
    /// A rejected recording is discarded.
    pub fn stop_recording(&self) -> Result<StoppedRecording, RecordingError> {
        let recording = self
            .recorder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stop()?;
        let frame_count = recording.frames.len();
        let result = self.train(&recording.name, recording.frames);
        if let Err(e) = &result {
            tracing::warn!(gesture = %recording.name, frame_count, error = %e, "Recording discarded");
        }
        Ok(StoppedRecording {
            frame_count,
            result,
        })
    }

    pub fn cancel_recording(&self) -> bool {
        self.recorder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel()
    }

    pub fn recording_status(&self) -> RecordingStatus {
        let recommended = self.get_config().recommended_training_frames;
        self.recorder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status(recommended)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Malformed(#[from] GestureError),
}
