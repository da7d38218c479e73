use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use lingo_sprint::config::{Config, LlmConfig};
use lingo_sprint::routes::build_router;
use lingo_sprint::state::AppState;
use lingo_sprint::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub async fn spawn_test_server() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("lingo-test.sled");

    // Construct Config directly instead of via set_var so that parallel
    // tests do not race on process-wide environment state.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 8080,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        catalog_path: String::new(),
        jwt_secret: format!("integration-test-jwt-secret-{}", uuid_like()),
        jwt_expires_in_hours: 24,
        cors_origin: "http://localhost:5173".to_string(),
        llm: LlmConfig {
            enabled: true,
            mock: true,
            api_url: String::new(),
            api_key: String::new(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        },
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let state = AppState::new(store, &config);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

fn uuid_like() -> String {
    uuid::Uuid::new_v4().to_string()
}
