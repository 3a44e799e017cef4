//! 集成测试公共设施
//!
//! 每个测试使用独立的临时 SQLite 数据库，互不影响。

#![allow(dead_code)]

use std::sync::Arc;

use employee_tracker::config::StaticConfig;
use employee_tracker::runtime::lifetime::{AppState, prepare_server_startup};
use employee_tracker::storage::SeaOrmStorage;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "integration_test_secret_32_bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestEnv {
    pub state: AppState,
    _dir: TempDir,
}

impl TestEnv {
    pub fn storage(&self) -> Arc<SeaOrmStorage> {
        self.state.storage.clone()
    }
}

pub fn test_config(dir: &TempDir) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.database.database_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("tracker.db").display()
    );
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config
}

/// 新库 + 迁移 + 引导管理员
pub async fn setup() -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&dir);
    let state = prepare_server_startup(&config)
        .await
        .expect("Failed to prepare app state");
    TestEnv { state, _dir: dir }
}

/// 只要存储，不要 HTTP
pub async fn setup_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&dir);
    let storage = employee_tracker::storage::StorageFactory::create(&config.database)
        .await
        .expect("Failed to create storage");
    (dir, storage)
}

/// 构造完整的 `/api` 应用
#[macro_export]
macro_rules! tracker_app {
    ($env:expr) => {{
        let state = $env.state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(employee_tracker::api::middleware::RequestIdMiddleware)
                .configure(move |cfg| state.configure(cfg)),
        )
        .await
    }};
}

/// 发送请求，返回 (status, JSON body)；非 JSON body 返回 Null
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        let json: serde_json::Value =
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }};
}

#[macro_export]
macro_rules! admin_token {
    ($app:expr) => {{
        let (status, body) = $crate::call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/auth/admin/login")
                .set_json(serde_json::json!({
                    "username": $crate::common::ADMIN_USERNAME,
                    "password": $crate::common::ADMIN_PASSWORD,
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

/// 以管理员身份创建员工，返回 id
#[macro_export]
macro_rules! create_employee {
    ($app:expr, $admin:expr, $username:expr) => {{
        let (status, body) = $crate::call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/admin/employees")
                .insert_header(("Authorization", format!("Bearer {}", $admin)))
                .set_json(serde_json::json!({
                    "username": $username,
                    "password": "password123",
                    "name": format!("{} Name", $username),
                    "email": format!("{}@company.com", $username),
                    "department": "Engineering",
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{}", body);
        body["data"]["employee"]["id"].as_i64().unwrap() as i32
    }};
}

/// 员工登录（打卡），返回 token
#[macro_export]
macro_rules! employee_token {
    ($app:expr, $username:expr) => {{
        let (status, body) = $crate::call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/auth/employee/login")
                .set_json(serde_json::json!({
                    "username": $username,
                    "password": "password123",
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
