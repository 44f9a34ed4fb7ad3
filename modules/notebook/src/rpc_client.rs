//! Typed HTTP client for the notebook RPC API.

use notebook_types::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service could not be reached or the connection dropped
    #[error("could not reach notebook service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service handled the call and reported an error
    #[error("server error: {0}")]
    Fault(String),

    #[error("invalid response from notebook service: {0}")]
    Malformed(String),
}

pub struct NotebookClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotebookClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a note; returns the service's confirmation message
    pub async fn add_note(&self, req: &AddNoteRequest) -> Result<String, ClientError> {
        let builder = self
            .client
            .post(format!("{}/rpc/add_note", self.base_url))
            .json(req);
        call(builder).await
    }

    pub async fn get_notes(&self, topic: &str) -> Result<NotesListing, ClientError> {
        let builder = self
            .client
            .post(format!("{}/rpc/get_notes", self.base_url))
            .json(&GetNotesRequest {
                topic: topic.to_string(),
            });
        call(builder).await
    }

    pub async fn status(&self) -> Result<ServiceStatus, ClientError> {
        call(self.client.get(format!("{}/rpc/status", self.base_url))).await
    }
}

/// Send a request and unwrap the RPC envelope
async fn call<T>(builder: reqwest::RequestBuilder) -> Result<T, ClientError>
where
    T: Serialize + DeserializeOwned,
{
    let resp = builder.send().await.map_err(ClientError::Transport)?;
    let status = resp.status();

    let body: RpcResponse<T> = match resp.json().await {
        Ok(body) => body,
        Err(_) if !status.is_success() => {
            return Err(ClientError::Fault(format!("HTTP {}", status)));
        }
        Err(e) => return Err(ClientError::Malformed(e.to_string())),
    };

    if body.success {
        body.data
            .ok_or_else(|| ClientError::Malformed("response has no data".to_string()))
    } else {
        Err(ClientError::Fault(
            body.error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = NotebookClient::new("http://127.0.0.1:9/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");

        let err = client.get_notes("Physics").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fault_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc/add_note"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "error": "topic is empty"})),
            )
            .mount(&server)
            .await;

        let client = NotebookClient::new(&server.uri());
        let err = client
            .add_note(&AddNoteRequest {
                topic: String::new(),
                text: "F=ma".to_string(),
                timestamp: "t".to_string(),
                search_term: String::new(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Fault(msg) => assert_eq!(msg, "topic is empty"),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_error_is_fault() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = NotebookClient::new(&server.uri());
        let err = client.status().await.unwrap_err();
        assert!(matches!(err, ClientError::Fault(msg) if msg.contains("502")));
    }

    #[tokio::test]
    async fn test_decodes_no_database_listing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc/get_notes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"kind": "no_database", "message": NO_DATABASE_MESSAGE}
            })))
            .mount(&server)
            .await;

        let client = NotebookClient::new(&server.uri());
        assert_eq!(
            client.get_notes("Physics").await.unwrap(),
            NotesListing::no_database()
        );
    }
}
