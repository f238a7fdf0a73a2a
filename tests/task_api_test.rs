use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Mutex;

use scratchpad_api::api::config::ApiConfig;
use scratchpad_api::api::handlers;
use scratchpad_api::tasks::TaskStore;

fn test_app_data() -> (web::Data<Mutex<TaskStore>>, web::Data<ApiConfig>) {
    let store = TaskStore::open_in_memory().unwrap();
    (
        web::Data::new(Mutex::new(store)),
        web::Data::new(ApiConfig::default()),
    )
}

macro_rules! test_app {
    ($store:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data($store.clone())
                .app_data($config.clone())
                .route("/", web::get().to(handlers::list_tasks))
                .route("/tasks", web::post().to(handlers::create_task))
                .route(
                    "/tasks/{id}/status",
                    web::put().to(handlers::update_task_status),
                )
                .route("/health", web::get().to(handlers::health_check)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_empty_list() {
    let (store, config) = test_app_data();
    let app = test_app!(store, config);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
    assert!(body["tasks"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_then_list() {
    let (store, config) = test_app_data();
    let app = test_app!(store, config);

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({"task": "buy milk"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["task"], "buy milk");
    assert_eq!(created["status"], "pending");

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
}

#[actix_web::test]
async fn test_empty_task_rejected() {
    let (store, config) = test_app_data();
    let app = test_app!(store, config);

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({"task": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_update_status() {
    let (store, config) = test_app_data();
    let app = test_app!(store, config);

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({"task": "ship release", "status": "pending"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{id}/status"))
        .set_json(json!({"status": "done"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "done");
}

#[actix_web::test]
async fn test_update_unknown_task_is_404() {
    let (store, config) = test_app_data();
    let app = test_app!(store, config);

    let req = test::TestRequest::put()
        .uri("/tasks/42/status")
        .set_json(json!({"status": "done"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_health_reports_task_count() {
    let (store, config) = test_app_data();
    store
        .lock()
        .unwrap()
        .add("already here", "pending")
        .unwrap();
    let app = test_app!(store, config);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["task_count"], 1);
}
