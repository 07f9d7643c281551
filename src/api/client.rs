//! Gateway client with bearer augmentation and 401-refresh interception
//!
//! Every outgoing request except identity-endpoint calls is augmented with
//! `Authorization: Bearer <token>` from the current session; with no token
//! the request goes out unauthenticated. A 401 on a non-identity call enters
//! the refresh gate: the first such request runs exactly one refresh, every
//! concurrent 401 waits on it, and all of them retry once with the same new
//! token (or all observe the same failure). Identity calls never carry a
//! bearer token and never trigger a refresh, which is what keeps a rejected
//! login from looping.

use super::interceptor::{RefreshGate, RefreshOutcome, RefreshTicket};
use super::ApiError;
use crate::auth::AuthManager;
use crate::notification::Notifier;
use crate::settings::ClientSettings;
use log::{debug, info};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Authenticated gateway client
pub struct ApiClient {
    http: Client,
    base_url: String,
    identity_prefix: String,
    auth: Arc<AuthManager>,
    gate: RefreshGate,
    notifier: Option<Arc<Notifier>>,
}

impl ApiClient {
    /// Create a client over the shared HTTP client and auth manager
    pub fn new(http: Client, settings: &ClientSettings, auth: Arc<AuthManager>) -> Self {
        Self {
            http,
            base_url: settings.api_base_url.clone(),
            identity_prefix: settings.endpoints.identity.clone(),
            auth,
            gate: RefreshGate::new(),
            notifier: None,
        }
    }

    /// Report request failures on this notification channel. Only errors
    /// that reach the caller are reported; a 401 absorbed by a successful
    /// refresh-and-retry stays silent.
    pub fn with_notifier(mut self, notifier: Arc<Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// GET an endpoint relative to the gateway base
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None).await
    }

    /// POST a JSON body to an endpoint relative to the gateway base
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, endpoint, Some(Self::to_body(body)?))
            .await
    }

    /// PUT a JSON body to an endpoint relative to the gateway base
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, endpoint, Some(Self::to_body(body)?))
            .await
    }

    /// DELETE an endpoint relative to the gateway base
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let result = self.execute(method, endpoint, body).await;
        if let (Err(error), Some(notifier)) = (&result, &self.notifier) {
            notifier.report_api_error(error);
        }
        result
    }

    fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Identity endpoints are excluded from augmentation and from the
    /// refresh flow.
    fn is_identity_endpoint(&self, endpoint: &str) -> bool {
        endpoint.starts_with(&self.identity_prefix)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let identity = self.is_identity_endpoint(endpoint);
        let token = if identity {
            None
        } else {
            self.auth.session().access_token()
        };

        let response = self
            .send_once(method.clone(), &url, body.as_ref(), token.as_deref())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED && !identity {
            debug!("401 from {}, entering refresh flow", endpoint);
            let new_token = self.refresh_access_token().await?;
            let retried = self
                .send_once(method, &url, body.as_ref(), Some(&new_token))
                .await?;
            return Self::parse(retried).await;
        }

        Self::parse(response).await
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::MalformedResponse(e.to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => ApiError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Run (or wait on) the single-flight refresh and return the new token.
    /// The leader's failure path has already torn the session down inside
    /// the manager; waiters only observe the shared outcome.
    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        match self.gate.join() {
            RefreshTicket::Leader(leader) => {
                info!("Access token rejected, starting single-flight refresh");
                let outcome = match self.auth.refresh().await {
                    Ok(token) => RefreshOutcome::Refreshed(token),
                    Err(e) => RefreshOutcome::Failed(e.to_string()),
                };
                self.gate.resolve(leader, outcome.clone());
                match outcome {
                    RefreshOutcome::Refreshed(token) => Ok(token),
                    RefreshOutcome::Failed(message) => Err(ApiError::Auth(message)),
                }
            }
            RefreshTicket::Waiter(rx) => {
                debug!("Refresh already in flight, waiting for the shared outcome");
                match RefreshGate::wait(rx).await {
                    RefreshOutcome::Refreshed(token) => Ok(token),
                    RefreshOutcome::Failed(message) => Err(ApiError::Auth(message)),
                }
            }
        }
    }
}
