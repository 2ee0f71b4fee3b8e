pub const GESTURES: &str = "gestures";
pub const META: &str = "meta";
