//! Integration tests against a mock HTTP server.

use graphstore_client::{
    ApiError, Client, ClientError, ExportFormat, ExportOptions, StoredQuery,
};
use reqwest::StatusCode;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::new(server.uri()).expect("valid mock server URL")
}

#[tokio::test]
async fn lists_databases_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases"))
        // base64("admin:admin")
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "databases": ["music", "catalog"]
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_basic_auth("admin", "admin");
    let databases = client.list_databases().await.expect("request succeeds");
    assert_eq!(databases, ["music", "catalog"]);
}

#[tokio::test]
async fn sends_bearer_token_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header(
            "user-agent",
            concat!("graphstore-client/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "databases": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_bearer_token("secret-token");
    let databases = client.list_databases().await.expect("request succeeds");
    assert!(databases.is_empty());
}

#[tokio::test]
async fn classifies_structured_error_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/healthcheck"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "message": "maintenance in progress",
            "code": "000012"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .healthy()
        .await
        .expect_err("503 is an error");
    match error {
        ClientError::Api(api) => assert_eq!(
            api,
            ApiError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "maintenance in progress".to_owned(),
                code: "000012".to_owned(),
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_keeps_status_and_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_databases()
        .await
        .expect_err("502 is an error");
    match error {
        ClientError::Api(api) => {
            assert_eq!(api.status, StatusCode::BAD_GATEWAY);
            assert_eq!(api.message, "bad gateway");
            assert!(api.code.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_success_body_decodes_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases/music/options"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let options = client_for(&server)
        .database_options("music")
        .await
        .expect("empty body is success");
    assert!(options.is_empty());
}

#[tokio::test]
async fn not_found_is_a_negative_existence_answer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases/nope/options"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "database does not exist",
            "code": "0D0DU2"
        })))
        .mount(&server)
        .await;

    let exists = client_for(&server)
        .database_exists("nope")
        .await
        .expect("404 is a valid answer");
    assert!(!exists);
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/databases"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_databases()
        .await
        .expect_err("invalid JSON fails decoding");
    assert!(matches!(error, ClientError::Json(_)));
}

#[tokio::test]
async fn stored_query_body_is_not_html_escaped() {
    let server = MockServer::start().await;
    // Raw `<` and `&` must survive serialization untouched.
    Mock::given(method("POST"))
        .and(path("/admin/queries/stored"))
        .and(body_string_contains("SELECT * { ?s <http://example.com/p> ?o } # a & b"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let query = StoredQuery {
        name: "q1".to_owned(),
        database: "*".to_owned(),
        query: "SELECT * { ?s <http://example.com/p> ?o } # a & b".to_owned(),
        shared: true,
        reasoning: false,
    };
    client_for(&server)
        .add_stored_query(&query)
        .await
        .expect("request succeeds");
}

#[tokio::test]
async fn export_merges_format_with_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/music/export"))
        .and(query_param("format", "trig"))
        .and(query_param("server-side", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string("@prefix : <urn:x> ."))
        .expect(1)
        .mount(&server)
        .await;

    let options = ExportOptions {
        server_side: Some(true),
        ..ExportOptions::default()
    };
    let body = client_for(&server)
        .export_database("music", ExportFormat::Trig, Some(&options))
        .await
        .expect("request succeeds");
    assert_eq!(body, b"@prefix : <urn:x> .");
}

#[tokio::test]
async fn ask_parses_boolean_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/music/query"))
        .and(header("content-type", "application/sparql-query"))
        .and(header("accept", "text/boolean"))
        .and(body_string_contains("ASK"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .ask("music", "ASK { ?s ?p ?o }", None)
        .await
        .expect("request succeeds");
    assert!(answer);
}

#[tokio::test]
async fn begin_transaction_returns_trimmed_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/music/transaction/begin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tx-42\n"))
        .mount(&server)
        .await;

    let tx = client_for(&server)
        .begin_transaction("music")
        .await
        .expect("request succeeds");
    assert_eq!(tx, "tx-42");
}

#[tokio::test]
async fn create_database_posts_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/databases"))
        .and(body_string_contains(r#""dbname":"music""#))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .create_database("music", &std::collections::HashMap::new(), &[])
        .await
        .expect("request succeeds");
}

#[tokio::test]
async fn blocking_client_shares_classification_semantics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/status"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "message": "no permission",
            "code": "000SEC"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    // reqwest's blocking client must run off the async runtime threads.
    let error = tokio::task::spawn_blocking(move || {
        let client =
            graphstore_client::BlockingClient::new(uri).expect("valid mock server URL");
        client.get_value("admin/status")
    })
    .await
    .expect("blocking task completes")
    .expect_err("403 is an error");

    match error {
        ClientError::Api(api) => {
            assert_eq!(api.status, StatusCode::FORBIDDEN);
            assert_eq!(api.message, "no permission");
            assert_eq!(api.code, "000SEC");
        }
        other => panic!("unexpected error: {other}"),
    }
}
