use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::gesture::config::{
    DEFAULT_DISTANCE_SCALE, DEFAULT_HISTORY_LIMIT, DEFAULT_MIN_TRAINING_FRAMES,
    DEFAULT_RECOMMENDED_TRAINING_FRAMES, DEFAULT_SIMILARITY_THRESHOLD,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub recognition: RecognitionEnvConfig,
}

#[derive(Debug, Clone)]
pub struct RecognitionEnvConfig {
    pub similarity_threshold: f64,
    pub distance_scale: f64,
    pub min_training_frames: usize,
    pub recommended_training_frames: usize,
    pub history_limit: usize,
}

impl Default for RecognitionEnvConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            distance_scale: DEFAULT_DISTANCE_SCALE,
            min_training_frames: DEFAULT_MIN_TRAINING_FRAMES,
            recommended_training_frames: DEFAULT_RECOMMENDED_TRAINING_FRAMES,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/gestures.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            recognition: RecognitionEnvConfig {
                similarity_threshold: env_or_parse(
                    "SIMILARITY_THRESHOLD",
                    DEFAULT_SIMILARITY_THRESHOLD,
                ),
                distance_scale: env_or_parse("SIMILARITY_DISTANCE_SCALE", DEFAULT_DISTANCE_SCALE),
                min_training_frames: env_or_parse(
                    "MIN_TRAINING_FRAMES",
                    DEFAULT_MIN_TRAINING_FRAMES,
                ),
                recommended_training_frames: env_or_parse(
                    "RECOMMENDED_TRAINING_FRAMES",
                    DEFAULT_RECOMMENDED_TRAINING_FRAMES,
                ),
                history_limit: env_or_parse("RECOGNITION_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
