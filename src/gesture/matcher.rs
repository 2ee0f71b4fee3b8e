//! Library scan: finds the stored gesture closest to a live frame.
//!
//! Each template's capture is averaged and normalized into a
//! [`PreparedTemplate`]; the live frame is normalized the same way and scored
//! against every prepared template. The strictly highest score wins, so on a
//! tie the template seen first keeps the lead. A winner below the similarity
//! threshold is not a match.

use crate::gesture::config::MatcherConfig;
use crate::gesture::normalize::normalize;
use crate::gesture::similarity::similarity;
use crate::gesture::template::average;
use crate::gesture::types::{GestureMatch, LandmarkFrame, TemplateScore};
use crate::gesture::GestureError;
use crate::store::operations::gestures::GestureTemplate;

/// A template reduced to the averaged, wrist-relative frame used for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTemplate {
    pub id: String,
    pub name: String,
    pub reference: LandmarkFrame,
}

/// Average and normalize a stored template.
///
/// `Ok(None)` when the template has no captured frames, which makes it
/// ineligible for matching without being an error.
pub fn prepare(template: &GestureTemplate) -> Result<Option<PreparedTemplate>, GestureError> {
    let Some(averaged) = average(&template.frames)? else {
        return Ok(None);
    };
    Ok(normalize(&averaged).map(|reference| PreparedTemplate {
        id: template.id.clone(),
        name: template.name.clone(),
        reference,
    }))
}

/// Prepare every eligible template, skipping empty and malformed ones.
pub fn prepare_all(templates: &[GestureTemplate]) -> Vec<PreparedTemplate> {
    templates
        .iter()
        .filter_map(|template| match prepare(template) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(
                    gesture_id = %template.id,
                    gesture = %template.name,
                    error = %e,
                    "Skipping malformed gesture template"
                );
                None
            }
        })
        .collect()
}

/// Find the best matching template for `live`.
///
/// `None` when the frame is empty, when no template is eligible, or when the
/// best score is zero or below the configured threshold.
pub fn match_frame(
    live: &LandmarkFrame,
    templates: &[GestureTemplate],
    config: &MatcherConfig,
) -> Option<GestureMatch> {
    if live.is_empty() || templates.is_empty() {
        return None;
    }
    best_match(live, &prepare_all(templates), config)
}

/// Same as [`match_frame`] over templates that are already prepared.
pub fn best_match(
    live: &LandmarkFrame,
    prepared: &[PreparedTemplate],
    config: &MatcherConfig,
) -> Option<GestureMatch> {
    let mut best: Option<GestureMatch> = None;

    for scored in score_prepared(live, prepared, config) {
        // A template has to score above zero to lead at all.
        if scored.score > best.as_ref().map_or(0.0, |b| b.score) {
            best = Some(GestureMatch {
                name: scored.name,
                score: scored.score,
            });
        }
    }

    best.filter(|b| b.score >= config.similarity_threshold)
}

/// Score the live frame against every prepared template, in library order.
pub fn score_prepared(
    live: &LandmarkFrame,
    prepared: &[PreparedTemplate],
    config: &MatcherConfig,
) -> Vec<TemplateScore> {
    let Some(normalized) = normalize(live) else {
        return Vec::new();
    };

    prepared
        .iter()
        .map(|template| {
            let score = similarity(
                Some(&normalized),
                Some(&template.reference),
                config.distance_scale,
            );
            tracing::debug!(gesture = %template.name, score, "Gesture similarity");
            TemplateScore {
                id: template.id.clone(),
                name: template.name.clone(),
                score,
            }
        })
        .collect()
}

/// Per-template scores for `live` against the raw library.
pub fn score_all(
    live: &LandmarkFrame,
    templates: &[GestureTemplate],
    config: &MatcherConfig,
) -> Vec<TemplateScore> {
    score_prepared(live, &prepare_all(templates), config)
}
