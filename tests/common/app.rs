use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use gesture_backend::config::Config;
use gesture_backend::gesture::{GestureEngine, MatcherConfig};
use gesture_backend::routes::build_router;
use gesture_backend::state::AppState;
use gesture_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_test_server() -> TestApp {
    spawn_with_matcher(MatcherConfig::default()).await
}

pub async fn spawn_with_matcher(matcher: MatcherConfig) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("gesture-test.sled");

    // Built directly so parallel tests never race on env vars.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        recognition: Default::default(),
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let engine = Arc::new(GestureEngine::new(matcher, store.clone()));
    let state = AppState::new(store, engine);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}
