use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use shift_transport::api::rest::router;
use shift_transport::config::ShiftTimetable;
use shift_transport::state::AppState;
use tower::ServiceExt;

fn setup() -> axum::Router {
    router(Arc::new(AppState::new(1024, ShiftTimetable::default())))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn create_worker(app: &axum::Router, name: &str, shift: &str, priority: i32) -> String {
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/workers",
            json!({ "name": name, "shift": shift, "priority": priority }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["id"].as_str().unwrap().to_string()
}

async fn create_vehicle(app: &axum::Router, number: &str, seats: u16) -> String {
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({ "vehicle_number": number, "seats": seats }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["workers"], 0);
    assert_eq!(body["vehicles"], 0);
    assert_eq!(body["schedules"], 0);
}

#[tokio::test]
async fn create_worker_defaults_to_active() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/workers",
            json!({ "name": "Ravi", "shift": "DAY" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ravi");
    assert_eq!(body["shift"], "DAY");
    assert_eq!(body["priority"], 0);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn create_worker_empty_name_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/workers",
            json!({ "name": "  ", "shift": "NIGHT" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_unknown_worker_returns_404() {
    let app = setup();
    let fake_id = "00000000-0000-0000-0000-000000000000";
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/workers/{fake_id}"),
            json!({ "priority": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_vehicle_zero_seats_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({ "vehicle_number": "BUS-7", "seats": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_vehicle_number_returns_409() {
    let app = setup();
    create_vehicle(&app, "BUS-7", 12).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/vehicles",
            json!({ "vehicle_number": "bus-7", "seats": 4 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_keep_vehicle_number_unique() {
    let app = setup();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            let number = if i % 2 == 0 { "TRK-42" } else { "trk-42" };
            tokio::spawn(async move {
                app.oneshot(json_request(
                    "POST",
                    "/vehicles",
                    json!({ "vehicle_number": number, "seats": 8 }),
                ))
                .await
                .unwrap()
                .status()
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::OK {
            created += 1;
        } else {
            assert_eq!(status, StatusCode::CONFLICT);
        }
    }
    assert_eq!(created, 1);

    let res = app.oneshot(get_request("/vehicles")).await.unwrap();
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn generate_without_shift_returns_400() {
    let app = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_without_workers_returns_422() {
    let app = setup();
    create_vehicle(&app, "VAN-1", 4).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-01", "shift": "DAY" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("no active workers"));
}

#[tokio::test]
async fn generate_without_vehicles_returns_422() {
    let app = setup();
    create_worker(&app, "Anil", "DAY", 1).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-01", "shift": "DAY" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn full_schedule_flow() {
    let app = setup();

    let a = create_worker(&app, "A", "DAY", 5).await;
    let b = create_worker(&app, "B", "DAY", 10).await;
    let c = create_worker(&app, "C", "DAY", 1).await;
    create_worker(&app, "Nightly", "NIGHT", 99).await;
    let v1 = create_vehicle(&app, "V1", 1).await;
    let v2 = create_vehicle(&app, "V2", 2).await;

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-01", "shift": "day" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let report = body_json(res).await;
    assert_eq!(report["summary"]["total_workers"], 3);
    assert_eq!(report["summary"]["assigned_workers"], 3);
    assert_eq!(report["summary"]["vehicles_used"], 2);
    assert_eq!(report["unassigned_workers"].as_array().unwrap().len(), 0);

    let seating: Vec<(String, String)> = report["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["worker_id"].as_str().unwrap().to_string(),
                a["vehicle_id"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        seating,
        vec![(b, v2.clone()), (a, v2), (c, v1)]
    );
    assert_eq!(report["assignments"][0]["status"], "SCHEDULED");
    assert_eq!(report["assignments"][0]["pickup_time"], "06:30:00");

    let res = app
        .clone()
        .oneshot(get_request("/schedules?date=2024-04-01&shift=DAY"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stored = body_json(res).await;
    assert_eq!(stored.as_array().unwrap().len(), 3);

    let res = app.oneshot(get_request("/metrics")).await.unwrap();
    let metrics = body_string(res).await;
    assert!(metrics.contains("schedule_runs_total"));
}

#[tokio::test]
async fn regeneration_replaces_previous_schedule() {
    let app = setup();

    for i in 0..5 {
        create_worker(&app, &format!("W{i}"), "NIGHT", 0).await;
    }
    let van = create_vehicle(&app, "VAN-1", 2).await;

    let generate = || {
        json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-02", "shift": "NIGHT" }),
        )
    };

    let res = app.clone().oneshot(generate()).await.unwrap();
    let report = body_json(res).await;
    assert_eq!(report["summary"]["assigned_workers"], 2);
    assert_eq!(report["unassigned_workers"].as_array().unwrap().len(), 3);

    create_vehicle(&app, "BUS-1", 10).await;
    let res = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/vehicles/{van}/availability"),
            json!({ "is_available": false }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.clone().oneshot(generate()).await.unwrap();
    let report = body_json(res).await;
    assert_eq!(report["summary"]["assigned_workers"], 5);
    assert_eq!(report["summary"]["vehicles_used"], 1);

    let res = app
        .oneshot(get_request("/schedules?date=2024-04-02&shift=NIGHT"))
        .await
        .unwrap();
    let stored = body_json(res).await;
    let stored = stored.as_array().unwrap();
    assert_eq!(stored.len(), 5);
    assert!(stored.iter().all(|a| a["vehicle_id"] != van.as_str()));
}

#[tokio::test]
async fn inactive_workers_are_not_scheduled() {
    let app = setup();

    let keep = create_worker(&app, "Keep", "DAY", 1).await;
    let leave = create_worker(&app, "Leave", "DAY", 9).await;
    create_vehicle(&app, "VAN-1", 4).await;

    let res = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/workers/{leave}"),
            json!({ "is_active": false }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(json_request(
            "POST",
            "/schedules/generate",
            json!({ "date": "2024-04-03", "shift": "DAY" }),
        ))
        .await
        .unwrap();
    let report = body_json(res).await;
    let assignments = report["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["worker_id"], keep.as_str());
}

#[tokio::test]
async fn unknown_schedule_key_is_empty() {
    let app = setup();
    let res = app
        .oneshot(get_request("/schedules?date=2030-01-01&shift=NIGHT"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 0);
}
