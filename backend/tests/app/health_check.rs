use crate::helpers::spawn_app;
use hyper::StatusCode;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let r = app.get("/api/health_check").send().await.unwrap();

    assert_eq!(r.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = spawn_app().await;

    let r = app.get("/api/health_check").send().await.unwrap();

    assert!(r.headers().get("x-request-id").is_some());
}
