use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use consultation_cell::services::ConsultationStore;
use content_cell::router::content_routes;
use content_cell::services::ContentCatalog;
use expert_cell::services::ExpertDirectory;
use shared_utils::test_utils::{authed_request, response_json, JwtTestUtils, TestConfig, TestUser};

fn setup_app() -> (Router, String) {
    let config = TestConfig::default();
    let app_config = config.to_arc();
    let directory = ExpertDirectory::with_default_roster();
    let consultations = Arc::new(ConsultationStore::with_sample_data(
        &app_config,
        &directory,
        Utc::now().date_naive(),
        Utc::now(),
    ));
    let catalog = Arc::new(ContentCatalog::generate(config.mock_data_seed, Utc::now()));
    let token = JwtTestUtils::create_test_token(&TestUser::default(), &config.jwt_secret, Some(24));

    (content_routes(app_config, catalog, consultations), token)
}

async fn get(router: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(authed_request("GET", uri, token, None))
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

#[tokio::test]
async fn test_content_requires_token() {
    let (router, _) = setup_app();

    for uri in ["/educational-resources", "/workshops/1", "/notifications", "/dashboard"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_resources_paginates() {
    let (router, token) = setup_app();

    let (status, body) = get(&router, "/educational-resources?page=3&limit=12", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 30);
    assert_eq!(body["data"]["totalPages"], 3);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_list_resources_by_category_and_search() {
    let (router, token) = setup_app();

    let (_, body) = get(&router, "/educational-resources?category=finance", &token).await;
    assert_eq!(body["data"]["total"], 6);

    let (_, body) = get(&router, "/educational-resources?category=finance&search=zakat", &token).await;
    assert_eq!(body["data"]["total"], 3);
    for item in body["data"]["items"].as_array().unwrap() {
        assert!(item["title"].as_str().unwrap().contains("Zakat"));
    }
}

#[tokio::test]
async fn test_get_resource_and_workshop() {
    let (router, token) = setup_app();

    let (status, body) = get(&router, "/educational-resources/4", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["category"], "property");

    let (status, body) = get(&router, "/workshops/12", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 12);
}

#[tokio::test]
async fn test_unknown_content_is_not_found() {
    let (router, token) = setup_app();

    let (status, body) = get(&router, "/educational-resources/31", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Educational resource not found");

    let (status, body) = get(&router, "/workshops/abc", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workshop not found");
}

#[tokio::test]
async fn test_notifications_include_unread_count() {
    let (router, token) = setup_app();

    let (status, body) = get(&router, "/notifications?limit=5", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 15);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);

    let unread = body["data"]["unreadCount"].as_u64().unwrap();
    assert!(unread <= 15);
}

#[tokio::test]
async fn test_dashboard_summarizes_account() {
    let (router, token) = setup_app();

    let (status, body) = get(&router, "/dashboard", &token).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["user"]["email"], "test@example.com");
    assert_eq!(data["user"]["id"], TestUser::default().id);
    assert_eq!(data["upcomingConsultations"]["total"], 3);
    assert_eq!(data["upcomingConsultations"]["items"].as_array().unwrap().len(), 3);
    assert_eq!(data["featuredResources"].as_array().unwrap().len(), 3);
    assert_eq!(data["upcomingWorkshops"].as_array().unwrap().len(), 3);
    assert!(data["unreadNotifications"].is_u64());
}
