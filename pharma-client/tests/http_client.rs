// pharma-client/tests/http_client.rs
// Client tests against a mock API server

use pharma_client::{
    ClientConfig, ClientError, CredentialStorage, Credential, CredentialsProvider, HttpClient,
    PharmacyApi, StaticCredentials, StoredCredentials, UserProfile,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, credentials: Arc<dyn CredentialsProvider>) -> HttpClient {
    let config = ClientConfig::new(server.uri()).with_timeout_ms(2_000);
    HttpClient::new(&config, credentials).unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "OK", "data": data}))
}

#[tokio::test]
async fn test_requests_carry_token_and_datastore_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/distributors"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("x-datastore-key", "ds-42"))
        .respond_with(ok(json!([{
            "id": 1,
            "name": "Sai Pharma",
            "gstin": null,
            "drug_license_no": "DL-1",
            "phone": null,
            "email": null,
            "address": null,
            "is_active": true
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticCredentials::new("tok-1", "ds-42")));
    let distributors = client.list_distributors().await.unwrap();

    assert_eq!(distributors.len(), 1);
    assert_eq!(distributors[0].name, "Sai Pharma");
}

#[tokio::test]
async fn test_unauthorized_clears_stored_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stock"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 1001,
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let storage = CredentialStorage::new(temp_dir.path(), "session.json");
    let store = Arc::new(StoredCredentials::open(storage.clone()));
    store
        .store(Credential {
            token: "stale".to_string(),
            user: UserProfile {
                id: 1,
                username: "chemist".to_string(),
                name: None,
                role: "staff".to_string(),
                pharmacy_name: None,
            },
            datastore_key: "ds-1".to_string(),
            expires_at: None,
        })
        .unwrap();

    let client = client_for(&server, store.clone());
    let err = client.list_stock().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!store.is_logged_in());
    assert!(!storage.exists());
}

#[tokio::test]
async fn test_duplicate_invoice_check_sends_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/purchase-orders/check-invoice"))
        .and(query_param("invoice_number", "INV-77"))
        .and(query_param("distributor_id", "5"))
        .respond_with(ok(json!({"exists": true})))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticCredentials::new("t", "k")));
    assert!(client.check_duplicate_invoice("INV-77", 5).await.unwrap());
}

#[tokio::test]
async fn test_medicine_search_decodes_decimals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/medicines/3/batches"))
        .and(query_param("q", "B1"))
        .respond_with(ok(json!([{
            "medicine_id": 3,
            "batch": "B1001",
            "expiry_month": 8,
            "expiry_year": 27,
            "pack": "1x10",
            "mrp": 45.5,
            "rate": 32.75,
            "stock": 120
        }])))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticCredentials::new("t", "k")));
    let batches = client.search_batches(3, "B1").await.unwrap();

    assert_eq!(batches[0].mrp, Decimal::new(455, 1));
    assert_eq!(batches[0].rate, Decimal::new(3275, 2));
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_partial_json(json!({"name": "Ravi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 3101,
            "message": "Customer store unavailable"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticCredentials::new("t", "k")));
    let err = client
        .create_customer(&shared::models::CustomerCreate {
            name: "Ravi".to_string(),
            phone: None,
            address: None,
            doctor_name: None,
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Api(app) => {
            assert_eq!(app.code, shared::ErrorCode::CustomerNotFound);
            assert_eq!(app.message, "Customer store unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_conflict_status_maps_to_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/distributors/9"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": 4,
            "message": "Distributor has purchase orders"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(StaticCredentials::new("t", "k")));
    let err = client.delete_distributor(9).await.unwrap_err();

    match err {
        ClientError::Conflict(msg) => assert_eq!(msg, "Distributor has purchase orders"),
        other => panic!("unexpected error: {other:?}"),
    }
}
