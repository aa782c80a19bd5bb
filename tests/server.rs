//! End-to-end tests through the HTTP front-end.

use axum::http::{header, Method, StatusCode};
use exam_router::app;
use exam_router::config::AppConfig;
use exam_router::http::{HttpServer, X_REQUEST_ID};
use exam_router::routing::Router;

mod common;
use common::{request, send, text};

fn mounted_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.mount.script_name = "/exam/public/index.php".into();
    config
}

#[tokio::test]
async fn test_serves_route_under_mount() {
    let mut builder = Router::builder();
    builder.get("/login", text("login page"));
    let server = HttpServer::new(mounted_config(), builder.build().unwrap());

    let (status, headers, body) = send(&server, request(Method::GET, "/exam/public/login")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "login page");
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn test_not_found_is_json() {
    let server = HttpServer::new(AppConfig::default(), Router::builder().build().unwrap());

    let (status, headers, body) = send(&server, request(Method::DELETE, "/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_handler_failure_becomes_500() {
    let mut builder = Router::builder();
    builder.post("/admin/users/add", |_, _| Err("connection refused".into()));
    let server = HttpServer::new(AppConfig::default(), builder.build().unwrap());

    let (status, _, body) = send(&server, request(Method::POST, "/admin/users/add")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn test_request_id_is_set_and_propagated() {
    let server = HttpServer::new(AppConfig::default(), Router::builder().build().unwrap());

    let (_, headers, _) = send(&server, request(Method::GET, "/")).await;
    let id = headers.get(X_REQUEST_ID).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let mut req = request(Method::GET, "/");
    req.headers_mut()
        .insert(X_REQUEST_ID, "client-supplied".parse().unwrap());
    let (_, headers, _) = send(&server, req).await;
    assert_eq!(headers.get(X_REQUEST_ID).unwrap(), "client-supplied");
}

#[tokio::test]
async fn test_application_routes() {
    let config = mounted_config();
    let server = HttpServer::new(config.clone(), app::build_router(&config).unwrap());

    let (status, headers, _) = send(&server, request(Method::GET, "/exam/public/")).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/login");

    let (status, _, body) =
        send(&server, request(Method::GET, "/exam/admin/subjects/search?q=math")).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["action"], "SubjectController@searchSubjects");

    let (_, _, body) = send(&server, request(Method::GET, "/exam/public/admin/assignments/5")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["action"], "AssignmentController@getAssignment");
    assert_eq!(json["params"], serde_json::json!(["5"]));
}

#[tokio::test]
async fn test_lenient_unresolved_handler_over_socket() {
    let mut config = AppConfig::default();
    config.routing.strict_handlers = false;

    let mut builder = Router::builder().strict(false);
    builder
        .register(exam_router::routing::Method::Get, "/reports/{id}", "ReportController@show")
        .get("/health", text("ok"));
    let (addr, shutdown) = common::start_server(config, builder.build().unwrap()).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client.get(format!("http://{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = client.get(format!("http://{}/reports/3", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["message"], "Route not found.");

    shutdown.trigger();
}

#[tokio::test(flavor = "current_thread")]
async fn test_unknown_methods_share_one_metrics_series() {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let server = HttpServer::new(AppConfig::default(), Router::builder().build().unwrap());
    for i in 0..25 {
        let method = Method::from_bytes(format!("X{i}").as_bytes()).unwrap();
        let (status, _, _) = send(&server, request(method, "/anything")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    send(&server, request(Method::GET, "/anything")).await;

    let rendered = handle.render();
    let series: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("router_dispatch_total{"))
        .collect();
    assert_eq!(series.len(), 2, "{rendered}");
    assert!(series
        .iter()
        .any(|line| line.contains("method=\"OTHER\"") && line.ends_with(" 25")));
}
