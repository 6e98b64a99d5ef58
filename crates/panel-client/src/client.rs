//! Bearer-authenticated reqwest client for the panel API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use panel_auth::TokenStore;
use panel_core::config::api::ApiConfig;
use panel_core::error::PanelError;
use panel_core::result::PanelResult;
use panel_core::traits::PanelApi;
use panel_core::types::{
    ApiErrorResponse, ResourceSet, ServerRecord, ServerUpdate, UpdateOutcome, violations_from_api,
};

use crate::wire::{AccountResponse, ServerEnvelope};

/// HTTP client for the panel API.
///
/// The token is read from the [`TokenStore`] on every request, so a
/// login or logout mid-process takes effect immediately.
#[derive(Debug, Clone)]
pub struct HttpPanelClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Shared reqwest client.
    http: reqwest::Client,
    /// Session token source.
    tokens: Arc<TokenStore>,
}

impl HttpPanelClient {
    /// Create a client from API configuration and a token store.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> PanelResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PanelError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> PanelResult<String> {
        self.tokens
            .get_token()
            .map(|t| format!("Bearer {t}"))
            .ok_or_else(|| PanelError::authentication("Not logged in"))
    }

    /// GET a JSON body and deserialize it.
    async fn get_json<T>(&self, path: &str) -> PanelResult<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.bearer()?)
            .send()
            .await
            .map_err(|e| PanelError::external_service(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PanelError::external_service(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(error_from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            PanelError::with_source(
                panel_core::error::ErrorKind::Serialization,
                format!("Unexpected response shape from {path}: {e}"),
                e,
            )
        })
    }
}

/// Map a non-2xx read response to a typed error, preferring the API's
/// own message when the body parses as an error envelope.
fn error_from_status(status: StatusCode, body: &str) -> PanelError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| format!("Panel API returned {status}"));

    match status.as_u16() {
        401 => PanelError::authentication(message),
        403 => PanelError::authorization(message),
        404 => PanelError::not_found(message),
        400..=499 => PanelError::validation(message),
        _ => PanelError::external_service(message),
    }
}

#[async_trait]
impl PanelApi for HttpPanelClient {
    async fn fetch_entitlement(&self) -> PanelResult<ResourceSet> {
        let account: AccountResponse = self.get_json("/api/client/account").await?;
        Ok(account.user.resources)
    }

    async fn fetch_aggregate_usage(&self) -> PanelResult<ResourceSet> {
        self.get_json("/api/client/usage").await
    }

    async fn fetch_server(&self, server_id: &str) -> PanelResult<ServerRecord> {
        self.get_json(&format!("/api/client/servers/{server_id}"))
            .await
    }

    async fn update_server(
        &self,
        server_id: &str,
        update: &ServerUpdate,
    ) -> PanelResult<UpdateOutcome> {
        let url = self.url(&format!("/api/client/servers/{server_id}"));
        debug!(%url, "PATCH");

        let response = self
            .http
            .patch(&url)
            .header("Authorization", self.bearer()?)
            .json(update)
            .send()
            .await
            .map_err(|e| PanelError::external_service(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PanelError::external_service(format!("Failed to read response: {e}")))?;

        if status.is_success() {
            let envelope: ServerEnvelope = serde_json::from_str(&body).map_err(|e| {
                PanelError::with_source(
                    panel_core::error::ErrorKind::Serialization,
                    format!("Unexpected update response shape: {e}"),
                    e,
                )
            })?;
            return Ok(UpdateOutcome::Applied(envelope.server));
        }

        // A structured violations body is a recoverable rejection, not
        // a transport error.
        if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
            if let Some(violations) = api_error.violations {
                return Ok(UpdateOutcome::Rejected(violations_from_api(violations)));
            }
        }

        Err(error_from_status(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use panel_core::error::ErrorKind;

    use super::*;

    async fn client_for(server: &MockServer) -> HttpPanelClient {
        let tokens = TokenStore::in_memory();
        tokens.set_token("tok").unwrap();

        let config = ApiConfig {
            base_url: server.uri(),
            timeout_seconds: 5,
        };
        HttpPanelClient::new(&config, Arc::new(tokens)).unwrap()
    }

    #[tokio::test]
    async fn test_forbidden_read_maps_to_authorization() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/client/servers/srv-2"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({ "error": "Server belongs to another user" })),
            )
            .mount(&mock)
            .await;

        let err = client_for(&mock).await.fetch_server("srv-2").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(err.message, "Server belongs to another user");
    }

    #[tokio::test]
    async fn test_unexpected_response_shape_is_a_serialization_error() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/client/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": {} })))
            .mount(&mock)
            .await;

        let err = client_for(&mock).await.fetch_entitlement().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_unstructured_failure_body_falls_back_to_status() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/client/usage"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock)
            .await;

        let err = client_for(&mock)
            .await
            .fetch_aggregate_usage()
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, "Panel API returned 502 Bad Gateway");
    }
}
