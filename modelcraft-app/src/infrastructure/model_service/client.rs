use super::types::{SetLikeStateRequest, SetLikeStateResponse};
use crate::domain::LikeState;
use modelcraft_errors::AppError;
use std::time::Duration;
use url::Url;

const MAX_ERROR_BODY_LEN: usize = 512;

/// Normalized outcome of one like-state call, classified so the coordinator
/// can decide between failing fast and compensating.
#[derive(Debug, Clone)]
pub enum RemoteOutcome {
    Success { likes: Option<i64> },
    NotFound,
    Forbidden,
    TransportFailure { kind: TransportFailureKind, detail: String },
    OtherServerError { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    Timeout,
    Connect,
}

#[derive(Clone)]
pub struct ModelServiceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ModelServiceClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// One outbound call, never retried here. Retrying (or compensating) is
    /// the coordinator's decision.
    pub async fn set_like_state(
        &self,
        model_id: uuid::Uuid,
        state: LikeState,
        credential: &str,
    ) -> RemoteOutcome {
        let url = format!("{}/models/{}/like-state", self.base_url, model_id);
        let request = SetLikeStateRequest { state };

        let response = match self
            .http_client
            .put(&url)
            .header("Authorization", format!("Bearer {}", credential))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Self::classify_transport(&e),
        };

        Self::classify_response(response).await
    }

    fn classify_transport(err: &reqwest::Error) -> RemoteOutcome {
        let kind = if err.is_timeout() {
            TransportFailureKind::Timeout
        } else {
            TransportFailureKind::Connect
        };
        RemoteOutcome::TransportFailure {
            kind,
            detail: err.to_string(),
        }
    }

    async fn classify_response(response: reqwest::Response) -> RemoteOutcome {
        let status = response.status();

        if status.is_success() {
            let likes = response
                .json::<SetLikeStateResponse>()
                .await
                .ok()
                .and_then(|r| r.data)
                .and_then(|d| d.likes);
            return RemoteOutcome::Success { likes };
        }

        match status.as_u16() {
            404 => RemoteOutcome::NotFound,
            401 | 403 => RemoteOutcome::Forbidden,
            code => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Model service error: {} - {}", code, body);
                RemoteOutcome::OtherServerError {
                    status: code,
                    body: truncate_body(body),
                }
            }
        }
    }
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        body
    } else {
        body.chars().take(MAX_ERROR_BODY_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ModelServiceClient {
        ModelServiceClient::new(
            server.uri().parse().unwrap(),
            Duration::from_millis(250),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn success_carries_the_aggregate_count() {
        let server = MockServer::start().await;
        let model_id = uuid::Uuid::new_v4();

        Mock::given(method("PUT"))
            .and(path(format!("/models/{}/like-state", model_id)))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_partial_json(json!({"state": "like"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Model liked successfully.",
                "state": "like",
                "data": {"id": model_id, "likes": 7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .set_like_state(model_id, LikeState::Like, "tok-1")
            .await;

        match outcome {
            RemoteOutcome::Success { likes } => assert_eq!(likes, Some(7)),
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_model_classifies_as_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .set_like_state(uuid::Uuid::new_v4(), LikeState::Like, "tok")
            .await;

        assert!(matches!(outcome, RemoteOutcome::NotFound));
    }

    #[tokio::test]
    async fn auth_denials_classify_as_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .set_like_state(uuid::Uuid::new_v4(), LikeState::Dislike, "tok")
            .await;

        assert!(matches!(outcome, RemoteOutcome::Forbidden));
    }

    #[tokio::test]
    async fn server_errors_keep_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .set_like_state(uuid::Uuid::new_v4(), LikeState::Like, "tok")
            .await;

        match outcome {
            RemoteOutcome::OtherServerError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected OtherServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_responses_classify_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .set_like_state(uuid::Uuid::new_v4(), LikeState::Like, "tok")
            .await;

        assert!(matches!(
            outcome,
            RemoteOutcome::TransportFailure {
                kind: TransportFailureKind::Timeout,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_failure() {
        // Nothing listens on this port.
        let client = ModelServiceClient::new(
            "http://127.0.0.1:1".parse().unwrap(),
            Duration::from_millis(250),
        )
        .unwrap();

        let outcome = client
            .set_like_state(uuid::Uuid::new_v4(), LikeState::Like, "tok")
            .await;

        assert!(matches!(outcome, RemoteOutcome::TransportFailure { .. }));
    }

    #[test]
    fn oversized_error_bodies_are_truncated() {
        let body = "x".repeat(2 * MAX_ERROR_BODY_LEN);
        assert_eq!(truncate_body(body).len(), MAX_ERROR_BODY_LEN);
    }
}
