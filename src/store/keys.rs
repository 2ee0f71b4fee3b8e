/// Gesture keys lead with a monotonic sequence number, so a tree scan returns
/// the library in the order gestures were written.
pub fn gesture_key(sequence: u64, gesture_id: &str) -> String {
    format!("{:020}:{}", sequence, gesture_id)
}

/// Id component of a gesture key.
pub fn gesture_id_from_key(key: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(key).ok()?;
    let (_, id) = text.split_once(':')?;
    (!id.is_empty()).then(|| id.to_string())
}

pub const SCHEMA_VERSION_KEY: &str = "_meta:version";

/// Raw dataset blob left by older front-end builds, imported by migration.
pub const LEGACY_DATASETS_KEY: &str = "gestureDatasets";
