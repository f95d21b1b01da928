//! Integration tests for command execution over HTTP.
//!
//! Each test points a real [`HttpClient`] at a `wiremock` server and checks
//! how the command is encoded and how the three failure kinds surface.

use rest_command::clients::{HttpClient, HttpError, HttpMethod, FORM_CONTENT_TYPE, SDK_VERSION};
use rest_command::command::signature::{verify_signature, SIGNATURE_PARAMETER};
use rest_command::command::{Command, CommandError, ParameterSet, Protocol};
use rest_command::response::{check_for_error, Envelope, SuccessResult};
use rest_command::{Authority, ClientConfig, PrivateKey};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authority_of(server: &MockServer) -> Authority {
    Authority::new(server.address().to_string()).unwrap()
}

fn form_pairs(body: &[u8]) -> ParameterSet {
    String::from_utf8_lossy(body)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .fold(ParameterSet::new(), |set, pair| {
            let (name, value) = pair.split_once('=').unwrap();
            set.set(
                urlencoding::decode(name).unwrap().into_owned(),
                urlencoding::decode(value).unwrap().into_owned(),
            )
        })
}

// ============================================================================
// Encoding
// ============================================================================

#[tokio::test]
async fn test_get_sends_parameters_in_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", "rust lang"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(None).unwrap();
    let raw = Command::new(Protocol::http(authority_of(&server)), "customsearch/v1", HttpMethod::Get)
        .unwrap()
        .with_parameter("q", "rust lang")
        .with_parameter("num", 10)
        .with_parameter_if_present("lr", Some(""))
        .execute(&client)
        .await
        .unwrap();

    assert_eq!(raw, json!({"items": []}));
}

#[tokio::test]
async fn test_post_sends_form_encoded_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/widget"))
        .and(header("content-type", FORM_CONTENT_TYPE))
        .and(body_string("key=abc&id=5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"successful": true}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(None).unwrap();
    let outcome: Envelope<SuccessResult> =
        Command::new(Protocol::http(authority_of(&server)), "/api/v1/widget", HttpMethod::Post)
            .unwrap()
            .with_parameter("key", "abc")
            .with_parameter("id", 5)
            .fetch(&client, check_for_error)
            .await
            .unwrap();

    assert!(outcome.into_inner().successful);
}

#[tokio::test]
async fn test_signed_post_carries_verifiable_sum() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sms/3.0/getUserBalance"))
        .and(body_string_contains(format!("{SIGNATURE_PARAMETER}=")))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"result": {"balance_currency": 3.5, "currency": "USD"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let key = PrivateKey::new("private").unwrap();
    let protocol = Protocol::atompark_http(authority_of(&server), key.clone());
    let client = HttpClient::new(None).unwrap();

    Command::new(protocol, "/api/sms/3.0/getUserBalance", HttpMethod::Post)
        .unwrap()
        .with_parameter("version", "3.0")
        .with_parameter("action", "getUserBalance")
        .with_parameter("key", "public")
        .execute(&client)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let sent = form_pairs(&received[0].body);
    assert!(sent.contains(SIGNATURE_PARAMETER));
    assert!(verify_signature(&sent, &key));
}

#[tokio::test]
async fn test_user_agent_and_default_headers_are_sent() {
    let server = MockServer::start().await;
    let user_agent = format!(
        "Tests/1.0 | Rest Command Library v{SDK_VERSION} | Rust {}",
        env!("CARGO_PKG_RUST_VERSION")
    );

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("x-client", "integration"))
        .and(header("user-agent", user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .user_agent_prefix("Tests/1.0")
        .default_header("X-Client", "integration")
        .build()
        .unwrap();
    let client = HttpClient::new(Some(&config)).unwrap();

    let raw = Command::new(Protocol::http(authority_of(&server)), "/ping", HttpMethod::Get)
        .unwrap()
        .execute(&client)
        .await
        .unwrap();
    assert_eq!(raw, json!({}));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_non_2xx_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"error": "forbidden"}))
                .insert_header("x-request-id", "req-42"),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(None).unwrap();
    let error = Command::new(Protocol::http(authority_of(&server)), "/secret", HttpMethod::Get)
        .unwrap()
        .execute(&client)
        .await
        .unwrap_err();

    match error {
        CommandError::Transport(HttpError::Response(e)) => {
            assert_eq!(e.code, 403);
            assert!(e.message.contains("forbidden"));
            assert_eq!(e.error_reference.as_deref(), Some("req-42"));
        }
        other => panic!("Expected Transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_errors_are_retried_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig::builder().tries(2).build().unwrap();
    let client = HttpClient::new(Some(&config)).unwrap();
    let error = Command::new(Protocol::http(authority_of(&server)), "/flaky", HttpMethod::Get)
        .unwrap()
        .execute(&client)
        .await
        .unwrap_err();

    match error {
        CommandError::Transport(HttpError::MaxRetries(e)) => {
            assert_eq!(e.code, 503);
            assert_eq!(e.tries, 2);
        }
        other => panic!("Expected MaxRetries error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_negative_retry_after_falls_back_to_default_delay() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "-1"))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig::builder().tries(2).build().unwrap();
    let client = HttpClient::new(Some(&config)).unwrap();
    let error = Command::new(Protocol::http(authority_of(&server)), "/throttled", HttpMethod::Get)
        .unwrap()
        .execute(&client)
        .await
        .unwrap_err();

    match error {
        CommandError::Transport(HttpError::MaxRetries(e)) => {
            assert_eq!(e.code, 429);
            assert_eq!(e.tries, 2);
        }
        other => panic!("Expected MaxRetries error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_envelope_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"message": "bad key", "code": 403}})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(None).unwrap();
    let command = Command::new(Protocol::http(authority_of(&server)), "/search", HttpMethod::Get).unwrap();

    // execute leaves the envelope alone
    let raw = command.execute(&client).await.unwrap();
    assert_eq!(raw["error"]["code"], 403);

    let error = command
        .fetch::<Envelope<SuccessResult>, _, _>(&client, check_for_error)
        .await
        .unwrap_err();
    match error {
        CommandError::Api(e) => {
            assert_eq!(e.message, "bad key");
            assert_eq!(e.code, 403);
            assert_eq!(e.raw, raw);
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_shape_is_deserialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widget"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"successful": "maybe"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = HttpClient::new(None).unwrap();
    let protocol = Protocol::http(authority_of(&server));

    let error = Command::new(protocol.clone(), "/widget", HttpMethod::Get)
        .unwrap()
        .fetch::<Envelope<SuccessResult>, _, _>(&client, check_for_error)
        .await
        .unwrap_err();
    assert!(matches!(error, CommandError::Deserialization(_)));

    let error = Command::new(protocol, "/html", HttpMethod::Get)
        .unwrap()
        .execute(&client)
        .await
        .unwrap_err();
    assert!(matches!(error, CommandError::Deserialization(_)));
}
