use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use docbind_client::{coll_path, doc_path, ClientError};
use docbind_rest::RestClient;
use docbind_typed::{BlockingFetch, BlockingWrite, Error};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct User {
    name: String,
    email: String,
}

fn alice() -> User {
    User {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

#[tokio::test]
async fn fetch_document_decodes_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_one_blocking::<User>(&doc_path!("users/abc"))
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), alice());
}

#[tokio::test]
async fn missing_document_is_none_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_blocking::<User>(&doc_path!("users/nope"))
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn fetch_collection_decodes_members() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "abc": {"name": "Alice", "email": "alice@example.com"},
            "def": {"name": "Bob", "email": "bob@example.com"},
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_collection_blocking::<User>(&coll_path!("users"))
    })
    .await
    .unwrap();

    let docs = result.unwrap();
    assert_eq!(docs.len(), 2);
    let mut ids: Vec<String> = docs.iter().map(|d| d.path.id().to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["abc", "def"]);
}

#[tokio::test]
async fn set_document_puts_encoded_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/abc"))
        .and(body_json(alice()))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.set_from_blocking(&doc_path!("users/abc"), &alice())
    })
    .await
    .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn add_document_reports_generated_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(alice()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "generated1"})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.add_from_blocking(&coll_path!("users"), &alice())
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), doc_path!("users/generated1"));
}

#[tokio::test]
async fn delete_tolerates_missing_documents() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.delete_blocking(&doc_path!("users/abc"))
    })
    .await
    .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn auth_statuses_map_to_typed_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/def"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (unauth, forbidden) = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        (
            client.fetch_blocking::<User>(&doc_path!("users/abc")),
            client.fetch_blocking::<User>(&doc_path!("users/def")),
        )
    })
    .await
    .unwrap();

    assert!(matches!(
        unauth.unwrap_err(),
        Error::Client(ClientError::Unauthenticated)
    ));
    assert!(matches!(
        forbidden.unwrap_err(),
        Error::Client(ClientError::PermissionDenied)
    ));
}

#[tokio::test]
async fn server_faults_forward_code_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_blocking::<User>(&doc_path!("users/abc"))
    })
    .await
    .unwrap();

    match result.unwrap_err() {
        Error::Client(ClientError::Backend { code, message }) => {
            assert_eq!(code, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_document_body_is_a_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_blocking::<User>(&doc_path!("users/abc"))
    })
    .await
    .unwrap();

    assert!(matches!(
        result.unwrap_err(),
        Error::Client(ClientError::Backend { .. })
    ));
}

#[tokio::test]
async fn decode_mismatch_is_a_decode_error_with_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": 42})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = RestClient::new(&uri).unwrap();
        client.fetch_blocking::<User>(&doc_path!("users/abc"))
    })
    .await
    .unwrap();

    match result.unwrap_err() {
        Error::Decode { path, .. } => assert_eq!(path.to_string(), "users/abc"),
        other => panic!("expected decode error, got {:?}", other),
    }
}
