//! Bearer / role middleware integration tests

mod common;

use actix_web::http::{Method, StatusCode};
use actix_web::test::TestRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

use common::{TEST_SECRET, bearer, setup};
use employee_tracker::api::jwt::{Claims, JwtService};
use employee_tracker::storage::Role;

/// 需要 admin 角色的接口
const ADMIN_ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/api/admin/employees"),
    ("POST", "/api/admin/employees"),
    ("PUT", "/api/admin/employees/1"),
    ("DELETE", "/api/admin/employees/1"),
    ("GET", "/api/admin/dashboard"),
    ("GET", "/api/admin/employee/1/report"),
    ("GET", "/api/admin/employee/1/report/download"),
    ("GET", "/api/admin/employee/1/timeline"),
    ("GET", "/api/admin/settings"),
    ("POST", "/api/admin/settings"),
];

/// 只允许员工的接口
const EMPLOYEE_ONLY_ENDPOINTS: &[(&str, &str)] = &[
    ("POST", "/api/employee/activity"),
    ("POST", "/api/employee/app-usage"),
    ("POST", "/api/employee/website-visit"),
    ("GET", "/api/employee/dashboard"),
];

/// 任何已登录主体可用的接口
const SHARED_ENDPOINTS: &[(&str, &str)] = &[
    ("POST", "/api/auth/logout"),
    ("GET", "/api/employee/activity"),
    ("GET", "/api/employee/app-usage"),
    ("GET", "/api/employee/website-visit"),
];

fn request(method: &str, uri: &str) -> TestRequest {
    let method: Method = method.parse().unwrap();
    let req = TestRequest::default().method(method.clone()).uri(uri);
    if method == Method::POST || method == Method::PUT {
        req.set_json(json!({}))
    } else {
        req
    }
}

fn all_protected() -> impl Iterator<Item = &'static (&'static str, &'static str)> {
    ADMIN_ENDPOINTS
        .iter()
        .chain(EMPLOYEE_ONLY_ENDPOINTS)
        .chain(SHARED_ENDPOINTS)
}

fn expired_token() -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: "1".to_string(),
        role: Role::Admin,
        iat: (now - Duration::hours(3)).timestamp(),
        exp: (now - Duration::hours(2)).timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized_everywhere() {
    let env = setup().await;
    let app = tracker_app!(env);

    for (method, uri) in all_protected() {
        let (status, body) = call_json!(app, request(method, uri));
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["code"], 2002, "{} {}", method, uri);
        assert_eq!(body["message"], "Token is missing!");
    }
}

#[actix_web::test]
async fn test_malformed_token_is_unauthorized_everywhere() {
    let env = setup().await;
    let app = tracker_app!(env);

    for (method, uri) in all_protected() {
        let (status, body) = call_json!(
            app,
            request(method, uri).insert_header(bearer("not.a.token"))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["message"], "Token is invalid!");
    }
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized_everywhere() {
    let env = setup().await;
    let app = tracker_app!(env);
    let token = expired_token();

    for (method, uri) in all_protected() {
        let (status, body) = call_json!(app, request(method, uri).insert_header(bearer(&token)));
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(body["code"], 2002);
    }
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let env = setup().await;
    let app = tracker_app!(env);
    let foreign = JwtService::new("some_other_secret_32_bytes_long!", 24)
        .generate_token(1, Role::Admin)
        .unwrap();

    let (status, _) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer(&foreign))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_employee_token_is_forbidden_on_admin_endpoints() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    create_employee!(app, admin, "grace");
    let token = employee_token!(app, "grace");

    for (method, uri) in ADMIN_ENDPOINTS {
        let (status, body) = call_json!(app, request(method, uri).insert_header(bearer(&token)));
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(body["code"], 2005);
        assert_eq!(body["message"], "Admin access required!");
    }
}

#[actix_web::test]
async fn test_admin_token_is_forbidden_on_employee_only_endpoints() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);

    for (method, uri) in EMPLOYEE_ONLY_ENDPOINTS {
        let (status, body) = call_json!(app, request(method, uri).insert_header(bearer(&admin)));
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(body["message"], "Employee access only!");
    }
}

#[actix_web::test]
async fn test_bare_token_without_bearer_prefix_is_accepted() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(("Authorization", admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
}

#[actix_web::test]
async fn test_request_id_header() {
    let env = setup().await;
    let app = tracker_app!(env);

    let resp = actix_web::test::call_service(
        &app,
        TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    let generated = resp.headers().get("x-request-id").unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);

    let resp = actix_web::test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/health")
            .insert_header(("X-Request-ID", "client-abc-123"))
            .to_request(),
    )
    .await;
    assert_eq!(
        resp.headers().get("x-request-id").unwrap(),
        "client-abc-123"
    );
}

#[actix_web::test]
async fn test_unknown_path_segment_is_not_found() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/employee/abc/report")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);
}
