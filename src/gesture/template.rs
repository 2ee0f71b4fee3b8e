//! Aggregation of captured frames into a single averaged template.

use crate::gesture::types::{LandmarkFrame, LandmarkPoint};
use crate::gesture::GestureError;

/// Component-wise arithmetic mean of `frames`.
///
/// `Ok(None)` for an empty sequence. Every frame must have the same number of
/// points as the first one, otherwise the whole aggregation fails with
/// [`GestureError::MalformedInput`] instead of returning a partial template.
pub fn average(frames: &[LandmarkFrame]) -> Result<Option<LandmarkFrame>, GestureError> {
    let Some(first) = frames.first() else {
        return Ok(None);
    };
    let point_count = first.len();

    let mut sums = vec![LandmarkPoint::default(); point_count];
    for (frame_index, frame) in frames.iter().enumerate() {
        if frame.len() != point_count {
            return Err(GestureError::MalformedInput {
                frame_index,
                expected: point_count,
                actual: frame.len(),
            });
        }
        for (sum, point) in sums.iter_mut().zip(frame.points()) {
            sum.x += point.x;
            sum.y += point.y;
            sum.z += point.z;
        }
    }

    let count = frames.len() as f64;
    Ok(Some(
        sums.into_iter()
            .map(|s| LandmarkPoint::new(s.x / count, s.y / count, s.z / count))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(points: &[[f64; 3]]) -> LandmarkFrame {
        points.iter().copied().map(LandmarkPoint::from).collect()
    }

    #[test]
    fn empty_sequence_has_no_average() {
        assert_eq!(average(&[]).unwrap(), None);
    }

    #[test]
    fn single_frame_is_identity() {
        let f = frame(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(average(std::slice::from_ref(&f)).unwrap(), Some(f));
    }

    #[test]
    fn averages_each_component() {
        let frames = vec![
            frame(&[[0.0, 10.0, 1.0], [2.0, 2.0, 2.0]]),
            frame(&[[4.0, 20.0, 3.0], [4.0, 4.0, 4.0]]),
        ];
        let avg = average(&frames).unwrap().unwrap();
        assert_eq!(avg.points()[0], LandmarkPoint::new(2.0, 15.0, 2.0));
        assert_eq!(avg.points()[1], LandmarkPoint::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let frames = vec![
            frame(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]),
            frame(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]),
            frame(&[[0.0, 0.0, 0.0]]),
        ];
        let err = average(&frames).unwrap_err();
        assert_eq!(
            err,
            GestureError::MalformedInput {
                frame_index: 2,
                expected: 2,
                actual: 1,
            }
        );
    }
}
