use property_edit::error::GatewayError;
use property_edit::form::{FieldEdit, SubmitOutcome};
use property_edit::{EditSession, EditorConfig, HttpGateway, MemoryGateway, PropertyGateway};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer, token: Option<&str>) -> HttpGateway {
    HttpGateway::with_config(&EditorConfig {
        api_url: format!("{}/api", server.uri()),
        api_token: token.map(String::from),
        ..EditorConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_reads_wrapped_and_bare_bodies() {
    let records = MemoryGateway::sample_records();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": records })))
        .mount(&server)
        .await;
    let listed = gateway_for(&server, None).list().await.unwrap();
    assert_eq!(listed, records);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(records)))
        .mount(&server)
        .await;
    let listed = gateway_for(&server, None).list().await.unwrap();
    assert_eq!(listed.len(), records.len());
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let listed = gateway_for(&server, Some("s3cret")).list().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_error_message_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/properties/prop_1001"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "You do not own this property" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/properties/prop_1002"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server, None);
    let records = MemoryGateway::sample_records();

    let err = gateway.update("prop_1001", &records[0]).await.unwrap_err();
    assert_eq!(err, GatewayError::Rejected("You do not own this property".to_string()));

    let err = gateway.update("prop_1002", &records[1]).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[tokio::test]
async fn test_malformed_list_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": 3 })))
        .mount(&server)
        .await;

    let err = gateway_for(&server, None).list().await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_session_saves_through_http() {
    let records = MemoryGateway::sample_records();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": records })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/properties/prop_1003"))
        .and(body_partial_json(json!({
            "id": "prop_1003",
            "monthlyRent": 1450.0,
            "leaseTerms": "6_months"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = Arc::new(gateway_for(&server, None));
    let session = EditSession::load(gateway, "prop_1003", "/owner/properties")
        .await
        .unwrap();
    session.apply(FieldEdit::MonthlyRent("1450".to_string()));
    session.apply(FieldEdit::LeaseTerms("6_months".parse().unwrap()));

    assert_eq!(
        session.submit().await,
        SubmitOutcome::Saved {
            redirect: "/owner/properties".to_string()
        }
    );
}
