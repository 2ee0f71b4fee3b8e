use chrono::Utc;
use proptest::prelude::*;

use gesture_backend::gesture::config::{MatcherConfig, DEFAULT_DISTANCE_SCALE};
use gesture_backend::gesture::matcher::match_frame;
use gesture_backend::gesture::normalize::normalize;
use gesture_backend::gesture::similarity::similarity;
use gesture_backend::gesture::template::average;
use gesture_backend::gesture::training::{train_template, TrainingError};
use gesture_backend::gesture::types::LANDMARK_COUNT;
use gesture_backend::gesture::{LandmarkFrame, LandmarkPoint};
use gesture_backend::store::operations::gestures::GestureTemplate;
use gesture_backend::store::Store;

fn point() -> impl Strategy<Value = LandmarkPoint> {
    (-1000.0_f64..1000.0, -1000.0_f64..1000.0, -1.0_f64..1.0)
        .prop_map(|(x, y, z)| LandmarkPoint::new(x, y, z))
}

fn hand() -> impl Strategy<Value = LandmarkFrame> {
    prop::collection::vec(point(), LANDMARK_COUNT).prop_map(LandmarkFrame::new)
}

fn any_frame() -> impl Strategy<Value = LandmarkFrame> {
    prop::collection::vec(point(), 0..30).prop_map(LandmarkFrame::new)
}

fn template(name: &str, frames: Vec<LandmarkFrame>) -> GestureTemplate {
    GestureTemplate {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        frames,
        created_at: Utc::now(),
    }
}

proptest! {
    #[test]
    fn pt_similarity_stays_in_unit_range(a in any_frame(), b in any_frame()) {
        let s = similarity(Some(&a), Some(&b), DEFAULT_DISTANCE_SCALE);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn pt_similarity_is_symmetric(a in hand(), b in hand()) {
        let ab = similarity(Some(&a), Some(&b), DEFAULT_DISTANCE_SCALE);
        let ba = similarity(Some(&b), Some(&a), DEFAULT_DISTANCE_SCALE);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn pt_frame_matches_itself_perfectly(a in hand()) {
        let n = normalize(&a).unwrap();
        prop_assert_eq!(similarity(Some(&n), Some(&n), DEFAULT_DISTANCE_SCALE), 1.0);
    }

    #[test]
    fn pt_normalized_score_ignores_translation(
        a in hand(),
        b in hand(),
        dx in -500.0_f64..500.0,
        dy in -500.0_f64..500.0,
    ) {
        let shifted: LandmarkFrame = a
            .points()
            .iter()
            .map(|p| LandmarkPoint::new(p.x + dx, p.y + dy, p.z))
            .collect();
        let nb = normalize(&b).unwrap();
        let original = similarity(normalize(&a).as_ref(), Some(&nb), DEFAULT_DISTANCE_SCALE);
        let moved = similarity(normalize(&shifted).as_ref(), Some(&nb), DEFAULT_DISTANCE_SCALE);
        prop_assert!((original - moved).abs() < 1e-6);
    }

    #[test]
    fn pt_normalized_wrist_is_origin(a in hand()) {
        let n = normalize(&a).unwrap();
        prop_assert_eq!(n.points()[0].x, 0.0);
        prop_assert_eq!(n.points()[0].y, 0.0);
        prop_assert_eq!(n.points()[0].z, a.points()[0].z);
    }

    #[test]
    fn pt_average_of_copies_is_the_frame(a in hand(), copies in 1_usize..40) {
        let averaged = average(&vec![a.clone(); copies]).unwrap().unwrap();
        for (got, want) in averaged.points().iter().zip(a.points()) {
            prop_assert!((got.x - want.x).abs() < 1e-9);
            prop_assert!((got.y - want.y).abs() < 1e-9);
        }
    }

    #[test]
    fn pt_reported_match_clears_threshold(
        live in hand(),
        library in prop::collection::vec(prop::collection::vec(hand(), 1..4), 0..5),
        threshold in 0.0_f64..=1.0,
    ) {
        let templates: Vec<GestureTemplate> = library
            .into_iter()
            .enumerate()
            .map(|(i, frames)| template(&format!("g{i}"), frames))
            .collect();
        let config = MatcherConfig { similarity_threshold: threshold, ..MatcherConfig::default() };
        if let Some(m) = match_frame(&live, &templates, &config) {
            prop_assert!(m.score >= threshold);
            prop_assert!(templates.iter().any(|t| t.name == m.name));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pt_short_recordings_never_reach_storage(frames in prop::collection::vec(hand(), 0..10)) {
        let store = Store::temporary().unwrap();
        let result = train_template(&store, "short", frames, &MatcherConfig::default());
        let is_too_few = matches!(result, Err(TrainingError::TooFewFrames { .. }));
        prop_assert!(is_too_few);
        prop_assert_eq!(store.count_gestures(), 0);
    }
}
