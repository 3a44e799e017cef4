//! Activity / usage tracking integration tests

mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use serde_json::json;

use common::{bearer, setup};
use employee_tracker::storage::EmployeeStatus;
use employee_tracker::utils::time::today;

#[actix_web::test]
async fn test_app_usage_accumulates_into_one_row() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "paul");
    let token = employee_token!(app, "paul");

    for (duration, category) in [(1.5, "productive"), (0.75, "unproductive")] {
        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri("/api/employee/app-usage")
                .insert_header(bearer(&token))
                .set_json(json!({
                    "app_name": "VS Code",
                    "duration": duration,
                    "category": category,
                }))
        );
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["message"], "App usage logged successfully");
    }

    let rows = env.storage().app_usage_on(today(), Some(id)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].duration, 2.25);
    // 分类只在首次创建时写入
    assert_eq!(rows[0].category.as_deref(), Some("productive"));

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/app-usage")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([{"app": "VS Code", "time": 2.25, "category": "productive"}])
    );
}

#[actix_web::test]
async fn test_app_usage_defaults() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "quinn");
    let token = employee_token!(app, "quinn");

    let (status, _) = call_json!(
        app,
        TestRequest::post()
            .uri("/api/employee/app-usage")
            .insert_header(bearer(&token))
            .set_json(json!({"app_name": "Slack"}))
    );
    assert_eq!(status, StatusCode::OK);

    let rows = env.storage().app_usage_on(today(), Some(id)).await.unwrap();
    assert_eq!(rows[0].duration, 0.0);
    assert_eq!(rows[0].category.as_deref(), Some("neutral"));
}

#[actix_web::test]
async fn test_usage_validation() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    create_employee!(app, admin, "ruth");
    let token = employee_token!(app, "ruth");

    let cases = [
        ("/api/employee/app-usage", json!({"app_name": "VS Code", "duration": -1.0})),
        ("/api/employee/app-usage", json!({"app_name": "  "})),
        ("/api/employee/website-visit", json!({"duration": 1.0})),
        ("/api/employee/website-visit", json!({"url": "https://a.example", "duration": -0.5})),
        ("/api/employee/activity", json!({"description": "no type"})),
    ];
    for (uri, payload) in cases {
        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri(uri)
                .insert_header(bearer(&token))
                .set_json(payload.clone())
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, payload);
        assert_eq!(body["code"], 1000);
    }
}

#[actix_web::test]
async fn test_website_visits_increment_counter() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "sam");
    let token = employee_token!(app, "sam");

    for _ in 0..3 {
        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri("/api/employee/website-visit")
                .insert_header(bearer(&token))
                .set_json(json!({"url": "https://docs.example.com", "duration": 0.5}))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Website visit logged successfully");
    }

    let rows = env
        .storage()
        .website_visits_on(today(), Some(id))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].visits, 3);
    assert_eq!(rows[0].duration, 1.5);

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/website-visit")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["visits"], 3);
    assert_eq!(body["data"][0]["category"], "neutral");
}

#[actix_web::test]
async fn test_idle_and_active_change_status() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "tina");
    let token = employee_token!(app, "tina");
    let storage = env.storage();

    let log = |activity_type: &str| {
        TestRequest::post()
            .uri("/api/employee/activity")
            .insert_header(bearer(&token))
            .set_json(json!({
                "activity_type": activity_type,
                "description": format!("went {}", activity_type),
                "metadata": {"source": "agent"},
            }))
    };

    let (status, body) = call_json!(app, log("idle"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Activity logged successfully");
    let employee = storage.find_employee(id).await.unwrap().unwrap();
    assert_eq!(employee.status, EmployeeStatus::Idle);

    call_json!(app, log("active"));
    let employee = storage.find_employee(id).await.unwrap().unwrap();
    assert_eq!(employee.status, EmployeeStatus::Online);

    // 其他类型不改变状态
    call_json!(app, log("meeting"));
    let employee = storage.find_employee(id).await.unwrap().unwrap();
    assert_eq!(employee.status, EmployeeStatus::Online);

    let latest = storage.recent_activities(Some(id), 1).await.unwrap();
    assert_eq!(latest[0].entry.activity_type, "meeting");
    assert_eq!(latest[0].entry.metadata_json()["source"], "agent");
}

#[actix_web::test]
async fn test_activity_feed_scope() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    create_employee!(app, admin, "uma");
    create_employee!(app, admin, "victor");
    let uma = employee_token!(app, "uma");
    let victor = employee_token!(app, "victor");

    call_json!(
        app,
        TestRequest::post()
            .uri("/api/employee/activity")
            .insert_header(bearer(&uma))
            .set_json(json!({"activity_type": "active", "description": "Coding"}))
    );

    // 员工只看到自己的
    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/activity")
            .insert_header(bearer(&victor))
    );
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["employee"], "victor Name");
    assert_eq!(items[0]["icon"], "🕒");
    assert_eq!(items[0]["text"], "Clocked in");

    // 管理员看到所有人，新的在前
    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/activity")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["employee"], "uma Name");
    assert_eq!(items[0]["icon"], "💻");
    assert_eq!(items[0]["text"], "Coding");
    assert!(items[0]["timeStr"].as_str().unwrap().ends_with('M'));
}

#[actix_web::test]
async fn test_usage_listing_scope() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    create_employee!(app, admin, "wendy");
    create_employee!(app, admin, "xavier");
    let wendy = employee_token!(app, "wendy");
    let xavier = employee_token!(app, "xavier");

    for token in [&wendy, &xavier] {
        call_json!(
            app,
            TestRequest::post()
                .uri("/api/employee/app-usage")
                .insert_header(bearer(token))
                .set_json(json!({"app_name": "Terminal", "duration": 1.0}))
        );
    }

    let (_, own) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/app-usage")
            .insert_header(bearer(&wendy))
    );
    assert_eq!(own["data"].as_array().unwrap().len(), 1);

    let (_, all) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/app-usage")
            .insert_header(bearer(&admin))
    );
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_employee_dashboard() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    create_employee!(app, admin, "yara");
    let token = employee_token!(app, "yara");

    call_json!(
        app,
        TestRequest::post()
            .uri("/api/employee/app-usage")
            .insert_header(bearer(&token))
            .set_json(json!({"app_name": "Figma", "duration": 2.0, "category": "productive"}))
    );
    call_json!(
        app,
        TestRequest::post()
            .uri("/api/employee/website-visit")
            .insert_header(bearer(&token))
            .set_json(json!({"url": "https://figma.com", "duration": 0.5}))
    );

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/employee/dashboard")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert!(data["session"]["clock_in"].is_string());
    assert_eq!(data["session"]["active_time"], 0.0);
    assert_eq!(data["session"]["productivity"], 0);
    assert_eq!(
        data["app_usage"],
        json!([{"app": "Figma", "duration": 2.0, "category": "productive"}])
    );
    assert_eq!(data["websites"][0]["url"], "https://figma.com");
    assert_eq!(data["websites"][0]["visits"], 1);
}
