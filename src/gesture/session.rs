use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::gesture::types::GestureMatch;

pub const NO_GESTURE_LABEL: &str = "No gesture detected";

/// Recognition state of one camera feed.
///
/// Tracks the label currently shown, a short history of distinct
/// recognitions, and which gesture was last handed to speech output. Also
/// owns the in-flight flag that keeps polling ticks from overlapping.
#[derive(Debug, Default)]
pub struct RecognitionSession {
    in_flight: AtomicBool,
    state: Mutex<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
    current: Option<GestureMatch>,
    history: VecDeque<String>,
    last_announced: Option<String>,
}

/// Clears the in-flight flag when the tick finishes.
#[derive(Debug)]
pub struct TickGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// What a tick changed in the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub label: String,
    pub changed: bool,
    /// Gesture name to speak, set only when it differs from the last one spoken.
    pub announce: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub label: String,
    pub current: Option<GestureMatch>,
    pub history: Vec<String>,
    pub last_announced: Option<String>,
    pub in_flight: bool,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the tick slot. `None` while another tick is still running.
    pub fn try_begin(&self) -> Option<TickGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TickGuard {
                flag: &self.in_flight,
            })
    }

    /// Fold one recognition result into the session.
    pub fn record(&self, result: Option<&GestureMatch>, history_limit: usize) -> SessionUpdate {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let previous = label_of(state.current.as_ref());
        let label = label_of(result);
        let changed = previous != label;
        state.current = result.cloned();

        let mut announce = None;
        if changed {
            if let Some(m) = result {
                tracing::info!(gesture = %m.name, score = m.score, "Recognized gesture");
                if state.history.front() != Some(&m.name) {
                    state.history.push_front(m.name.clone());
                    state.history.truncate(history_limit);
                }
                if state.last_announced.as_deref() != Some(m.name.as_str()) {
                    state.last_announced = Some(m.name.clone());
                    announce = Some(m.name.clone());
                }
            }
        }

        SessionUpdate {
            label,
            changed,
            announce,
        }
    }

    pub fn current_label(&self) -> String {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        label_of(state.current.as_ref())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        SessionSnapshot {
            label: label_of(state.current.as_ref()),
            current: state.current.clone(),
            history: state.history.iter().cloned().collect(),
            last_announced: state.last_announced.clone(),
            in_flight: self.in_flight.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::default();
    }
}

fn label_of(result: Option<&GestureMatch>) -> String {
    result.map_or_else(|| NO_GESTURE_LABEL.to_string(), |m| m.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(name: &str) -> GestureMatch {
        GestureMatch {
            name: name.to_string(),
            score: 0.9,
        }
    }

    #[test]
    fn overlapping_ticks_are_refused() {
        let session = RecognitionSession::new();
        let guard = session.try_begin().unwrap();
        assert!(session.try_begin().is_none());
        assert!(session.snapshot().in_flight);
        drop(guard);
        assert!(session.try_begin().is_some());
    }

    #[test]
    fn starts_with_no_gesture_label() {
        let session = RecognitionSession::new();
        assert_eq!(session.current_label(), NO_GESTURE_LABEL);
    }

    #[test]
    fn repeated_gesture_is_not_a_change() {
        let session = RecognitionSession::new();
        let first = session.record(Some(&hit("ok")), 10);
        let second = session.record(Some(&hit("ok")), 10);

        assert!(first.changed);
        assert_eq!(first.announce.as_deref(), Some("ok"));
        assert!(!second.changed);
        assert_eq!(second.announce, None);
        assert_eq!(session.snapshot().history, vec!["ok"]);
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let session = RecognitionSession::new();
        for name in ["a", "b", "c", "d"] {
            session.record(Some(&hit(name)), 3);
        }
        assert_eq!(session.snapshot().history, vec!["d", "c", "b"]);
    }

    #[test]
    fn gap_without_gesture_does_not_duplicate_history_or_speech() {
        let session = RecognitionSession::new();
        session.record(Some(&hit("hello")), 10);
        let gap = session.record(None, 10);
        let back = session.record(Some(&hit("hello")), 10);

        assert!(gap.changed);
        assert_eq!(gap.label, NO_GESTURE_LABEL);
        assert!(back.changed);
        assert_eq!(back.announce, None);
        assert_eq!(session.snapshot().history, vec!["hello"]);
    }

    #[test]
    fn reset_clears_everything() {
        let session = RecognitionSession::new();
        session.record(Some(&hit("a")), 10);
        session.reset();
        let snap = session.snapshot();
        assert_eq!(snap.label, NO_GESTURE_LABEL);
        assert!(snap.history.is_empty());
        assert!(snap.last_announced.is_none());
    }
}
