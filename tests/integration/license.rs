use serde_json::json;
use service_scaffold::core::ScaffoldError;
use service_scaffold::scaffold::LicenseClient;

use crate::common::serve_once;

#[tokio::test]
async fn test_fetch_returns_license_body() {
    let document = json!({"key": "mit", "name": "MIT License", "body": "MIT License\n\nCopyright (c) [year] [fullname]\n"});
    let (base_url, request) = serve_once(200, document.to_string()).await.unwrap();

    let text = LicenseClient::new(&base_url).fetch("MIT License").await.unwrap();
    assert_eq!(text.as_deref(), Some("MIT License\n\nCopyright (c) [year] [fullname]\n"));

    let request = request.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /licenses/mit "));
    assert!(request.contains("accept: application/vnd.github.drax-preview+json"));
    assert!(request.contains("user-agent: service-scaffold/"));
}

#[tokio::test]
async fn test_error_status_is_external_service_error() {
    let (base_url, _request) = serve_once(404, r#"{"message":"Not Found"}"#.to_string()).await.unwrap();

    let err = LicenseClient::new(&base_url).fetch("apache-2.0").await.unwrap_err();
    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::ExternalService {
            status,
            body,
        }) => {
            assert_eq!(*status, 404);
            assert!(body.contains("Not Found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_success_without_body_field_fails() {
    let (base_url, _request) = serve_once(200, "{}".to_string()).await.unwrap();
    assert!(LicenseClient::new(&base_url).fetch("MIT").await.is_err());
}
