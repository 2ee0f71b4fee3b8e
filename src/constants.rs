/// Largest accepted request body. Training uploads carry every recorded frame.
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

/// Hands reported per polling tick; the landmark source tracks at most two.
pub const MAX_HANDS_PER_TICK: usize = 2;

pub const MAX_GESTURE_NAME_CHARS: usize = 64;

/// Frames accepted in one `POST /api/gestures` body.
pub const MAX_FRAMES_PER_UPLOAD: usize = 2_000;

/// Client-supplied `x-request-id` values longer than this are replaced.
pub const MAX_REQUEST_ID_LEN: usize = 128;
