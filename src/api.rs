use crate::{
    errors::{PalaverError, PalaverResult},
    logging::{self, RoundTripLog},
};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

/// Sends one user message to the chat backend and returns the reply text.
///
/// The backend signals failure inside the body rather than through HTTP
/// status: any parsable JSON reply is checked for an `error` field first,
/// whatever the status code says.
pub async fn send_chat_message(
    client: &Client,
    endpoint: &str,
    text: &str,
) -> PalaverResult<String> {
    let payload = json!({ "message": text });

    let started = Instant::now();
    let response = client.post(endpoint).json(&payload).send().await?;
    let status = response.status();

    let body: Value = response
        .json()
        .await
        .map_err(|e| PalaverError::api_error(format!("Failed to parse reply: {}", e)))?;

    logging::log_round_trip(&RoundTripLog {
        endpoint: endpoint.to_string(),
        response_status: status.as_u16(),
        response_time_ms: started.elapsed().as_millis(),
    });

    if let Some(error) = body.get("error").filter(|v| !v.is_null()) {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(PalaverError::backend(message));
    }

    body["message"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PalaverError::api_error("Reply is missing the \"message\" field"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn start_backend(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn chat_url(server: &MockServer) -> String {
        format!("{}/api/chat", server.uri())
    }

    #[tokio::test]
    async fn test_sends_exactly_one_json_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "hi there"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap();
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn test_backend_error_field_becomes_backend_error() {
        let server = start_backend(ResponseTemplate::new(200).set_body_json(json!({
            "error": "rate limited"
        })))
        .await;

        let err = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap_err();
        assert_eq!(format!("Error: {}", err), "Error: rate limited");
    }

    #[tokio::test]
    async fn test_http_status_is_ignored_when_body_parses() {
        // Failure path: 500 with an error body still reads the body
        let server = start_backend(ResponseTemplate::new(500).set_body_json(json!({
            "error": "backend exploded"
        })))
        .await;
        let err = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PalaverError::Backend(_)));

        // Success path: an odd status with a message body is still a reply
        let server = start_backend(ResponseTemplate::new(503).set_body_json(json!({
            "message": "still here"
        })))
        .await;
        let reply = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap();
        assert_eq!(reply, "still here");
    }

    #[tokio::test]
    async fn test_non_json_reply_is_a_parse_error() {
        let server = start_backend(ResponseTemplate::new(200).set_body_string("nope")).await;

        let err = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PalaverError::Api(_)));
        assert!(format!("Error: {}", err).starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_reply_without_known_fields_is_rejected() {
        let server = start_backend(ResponseTemplate::new(200).set_body_json(json!({
            "unexpected": true
        })))
        .await;

        let err = send_chat_message(&Client::new(), &chat_url(&server), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PalaverError::Api(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_transport_error() {
        // Nothing listens on port 1
        let err = send_chat_message(&Client::new(), "http://127.0.0.1:1/api/chat", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PalaverError::Transport(_)));
        assert!(format!("Error: {}", err).starts_with("Error: "));
    }
}
