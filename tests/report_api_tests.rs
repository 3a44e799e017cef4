//! Dashboard / report / timeline integration tests

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use common::{bearer, setup};
use employee_tracker::utils::time::today;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[actix_web::test]
async fn test_report_range_is_inclusive() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "ada");
    let storage = env.storage();

    for (d, active) in [(9, 5.0), (10, 6.0), (11, 7.0), (12, 8.0)] {
        let clock_in = Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap();
        storage
            .put_session_figures(id, day(d), clock_in, active, 1.0, 70)
            .await
            .unwrap();
        storage
            .add_app_usage(id, "VS Code", 2.0, "productive", day(d), clock_in)
            .await
            .unwrap();
    }
    storage
        .put_website_visit(id, "https://docs.rs", 0.5, 4, "productive", day(10))
        .await
        .unwrap();

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/report?start_date=2024-03-10&end_date=2024-03-11",
                id
            ))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK, "{}", body);

    let data = &body["data"];
    assert_eq!(data["employee"]["name"], "ada Name");
    assert_eq!(data["employee"]["department"], "Engineering");

    let sessions = data["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["date"], "2024-03-10");
    assert_eq!(sessions[1]["date"], "2024-03-11");
    assert_eq!(sessions[1]["active_time"], 7.0);

    assert_eq!(data["app_usage"].as_array().unwrap().len(), 2);
    assert_eq!(
        data["websites"],
        json!([{"url": "https://docs.rs", "duration": 0.5, "visits": 4, "category": "productive"}])
    );
}

#[actix_web::test]
async fn test_report_defaults_to_single_day() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "ben");
    let storage = env.storage();

    for d in [10, 11] {
        let clock_in = Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap();
        storage
            .put_session_figures(id, day(d), clock_in, 4.0, 0.5, 60)
            .await
            .unwrap();
    }

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/report?start_date=2024-03-10",
                id
            ))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let sessions = body["data"]["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["date"], "2024-03-10");

    // 不带参数时只看今天
    let (_, body) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!("/api/admin/employee/{}/report", id))
            .insert_header(bearer(&admin))
    );
    assert!(body["data"]["sessions"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_report_rejects_bad_dates() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "cleo");

    for query in [
        "start_date=03/10/2024",
        "start_date=2024-03-10&end_date=2024-13-01",
        "start_date=2024-03-12&end_date=2024-03-10",
    ] {
        let (status, body) = call_json!(
            app,
            TestRequest::get()
                .uri(&format!("/api/admin/employee/{}/report?{}", id, query))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
        assert_eq!(body["code"], 1012, "{}", query);
    }
}

#[actix_web::test]
async fn test_report_unknown_employee() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);

    for uri in [
        "/api/admin/employee/4242/report",
        "/api/admin/employee/4242/report/download",
        "/api/admin/employee/4242/timeline",
    ] {
        let (status, body) = call_json!(
            app,
            TestRequest::get().uri(uri).insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], 3000);
    }
}

#[actix_web::test]
async fn test_report_download_is_pdf_attachment() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "dora");
    let storage = env.storage();

    let clock_in = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
    storage
        .put_session_figures(id, day(10), clock_in, 6.0, 1.0, 75)
        .await
        .unwrap();
    storage
        .add_app_usage(id, "Terminal", 3.0, "productive", day(10), clock_in)
        .await
        .unwrap();

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/report/download?start_date=2024-03-10",
                id
            ))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("report_dora_2024-03-10.pdf"));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn test_timeline_oldest_first_with_metadata() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "eve");
    let storage = env.storage();

    let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap();
    storage
        .append_activity(id, "active", Some("Editing".into()), Some(r#"{"window":"editor"}"#.into()), at(10, 14))
        .await
        .unwrap();
    storage
        .append_activity(id, "clockin", Some("Clocked in".into()), None, at(10, 9))
        .await
        .unwrap();
    // 区间外
    storage
        .append_activity(id, "idle", None, None, at(11, 0))
        .await
        .unwrap();

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/timeline?start_date=2024-03-10&end_date=2024-03-10",
                id
            ))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "clockin");
    assert_eq!(items[0]["timeStr"], "09:00 AM");
    assert_eq!(items[0]["metadata"], json!({}));
    assert_eq!(items[1]["type"], "active");
    assert_eq!(items[1]["timeStr"], "02:00 PM");
    assert_eq!(items[1]["metadata"]["window"], "editor");
}

#[actix_web::test]
async fn test_timeline_end_defaults_to_today() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "fern");

    // 今天登录产生 clockin
    employee_token!(app, "fern");
    let yesterday = today().pred_opt().unwrap();
    env.storage()
        .append_activity(
            id,
            "active",
            None,
            None,
            yesterday.and_hms_opt(12, 0, 0).unwrap().and_utc(),
        )
        .await
        .unwrap();

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/timeline?start_date={}",
                id,
                yesterday.format("%Y-%m-%d")
            ))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "active");
    assert_eq!(items[1]["type"], "clockin");
}

#[actix_web::test]
async fn test_download_range_runs_to_today() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let id = create_employee!(app, admin, "gale");

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/report/download?start_date=2024-03-10",
                id
            ))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 未来的起始日不会因为默认结束日而变成倒置区间
    let future = today().succ_opt().unwrap();
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!(
                "/api/admin/employee/{}/report/download?start_date={}",
                id,
                future.format("%Y-%m-%d")
            ))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_dashboard_rounds_half_to_even() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let first = create_employee!(app, admin, "hank");
    let second = create_employee!(app, admin, "iris");

    let storage = env.storage();
    let now = Utc::now();
    storage
        .put_session_figures(first, today(), now, 0.25, 0.75, 82)
        .await
        .unwrap();
    storage
        .put_session_figures(second, today(), now, 0.0, 0.0, 83)
        .await
        .unwrap();

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_hours"], 0.2);
    assert_eq!(body["data"]["total_idle"], 0.8);
    assert_eq!(body["data"]["avg_productivity"], 82);
}

#[actix_web::test]
async fn test_admin_dashboard_figures() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);
    let first = create_employee!(app, admin, "finn");
    let second = create_employee!(app, admin, "gina");
    create_employee!(app, admin, "hugo");

    // finn 在线，gina 登录后又登出
    employee_token!(app, "finn");
    let gina = employee_token!(app, "gina");
    call_json!(
        app,
        TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(bearer(&gina))
    );

    let storage = env.storage();
    let now = Utc::now();
    storage
        .put_session_figures(first, today(), now, 6.2, 1.0, 80)
        .await
        .unwrap();
    storage
        .put_session_figures(second, today(), now, 3.0, 0.5, 65)
        .await
        .unwrap();

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["active_employees"], 1);
    assert_eq!(data["total_hours"], 9.2);
    assert_eq!(data["total_idle"], 1.5);
    assert_eq!(data["avg_productivity"], 72);

    let recent = data["recent_activities"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["type"], "clockout");
    assert_eq!(recent[0]["employee"], "gina Name");
}

#[actix_web::test]
async fn test_admin_dashboard_empty_day() {
    let env = setup().await;
    let app = tracker_app!(env);
    let admin = admin_token!(app);

    let (status, body) = call_json!(
        app,
        TestRequest::get()
            .uri("/api/admin/dashboard")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active_employees"], 0);
    assert_eq!(body["data"]["total_hours"], 0.0);
    assert_eq!(body["data"]["avg_productivity"], 0);
    assert_eq!(body["data"]["recent_activities"], json!([]));
}
