use serde::{Deserialize, Serialize};

/// Number of keypoints the landmark model reports per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Anatomical landmark indices.
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Fingertips compared by the similarity scorer: thumb, index, middle, ring, pinky.
pub const FINGERTIPS: [usize; 5] = [
    landmarks::THUMB_TIP,
    landmarks::INDEX_TIP,
    landmarks::MIDDLE_TIP,
    landmarks::RING_TIP,
    landmarks::PINKY_TIP,
];

/// A single keypoint. x/y are in source-frame pixels, z is relative depth.
///
/// Serialized as a `[x, y, z]` array, which is the shape the landmark model
/// emits and the shape persisted gesture datasets use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LandmarkPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance in the x-y plane; depth is ignored.
    pub fn planar_distance_sq(&self, other: &LandmarkPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for LandmarkPoint {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<LandmarkPoint> for [f64; 3] {
    fn from(value: LandmarkPoint) -> Self {
        [value.x, value.y, value.z]
    }
}

/// One hand's keypoints in anatomical order.
///
/// Frames produced by the landmark model always hold [`LANDMARK_COUNT`]
/// points. The type itself does not enforce the length so that stored data
/// with a bad shape can be loaded and then skipped instead of failing the
/// whole library read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame(Vec<LandmarkPoint>);

impl LandmarkFrame {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&LandmarkPoint> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn wrist(&self) -> Option<&LandmarkPoint> {
        self.0.get(landmarks::WRIST)
    }

    /// A complete model frame: exactly 21 points, all finite.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == LANDMARK_COUNT && self.0.iter().all(LandmarkPoint::is_finite)
    }

    pub fn into_points(self) -> Vec<LandmarkPoint> {
        self.0
    }
}

impl From<Vec<LandmarkPoint>> for LandmarkFrame {
    fn from(points: Vec<LandmarkPoint>) -> Self {
        Self(points)
    }
}

impl FromIterator<LandmarkPoint> for LandmarkFrame {
    fn from_iter<I: IntoIterator<Item = LandmarkPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Winner of a recognition pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureMatch {
    pub name: String,
    pub score: f64,
}

/// Similarity of the live frame against one stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateScore {
    pub id: String,
    pub name: String,
    pub score: f64,
}
