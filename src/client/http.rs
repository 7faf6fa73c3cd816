//! HTTP client implementation for the Pluvo API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::api::{CoursesService, MediaService, OrganisationsService, UsersService};
use crate::auth::Credentials;
use crate::models::Version;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Pluvo API.
///
/// The client provides access to all API services through method calls
/// that return service structs. It manages authentication injection,
/// URL building, and response parsing.
///
/// # Example
///
/// ```no_run
/// use pluvo_rs::{PluvoClient, Credentials, ClientConfig};
///
/// # async fn example() -> pluvo_rs::Result<()> {
/// let client = PluvoClient::new(
///     Credentials::token("your-token"),
///     ClientConfig::default(),
/// )?;
///
/// let mut courses = client.courses().list(None).build();
/// println!("{} courses", courses.len().await?);
/// # Ok(())
/// # }
/// ```
pub struct PluvoClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) config: ClientConfig,
}

impl PluvoClient {
    /// Create a new client with the given credentials and configuration.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                credentials,
                config,
            }),
        })
    }

    /// Create a builder for step-by-step client construction.
    pub fn builder() -> PluvoClientBuilder {
        PluvoClientBuilder::default()
    }

    /// Get the courses service.
    pub fn courses(&self) -> CoursesService {
        CoursesService::new(self.inner.clone())
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the organisations service.
    pub fn organisations(&self) -> OrganisationsService {
        OrganisationsService::new(self.inner.clone())
    }

    /// Get the media service.
    pub fn media(&self) -> MediaService {
        MediaService::new(self.inner.clone())
    }

    /// Get the Pluvo API version.
    pub async fn version(&self) -> Result<Version> {
        self.inner.get("version/").await
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl Clone for PluvoClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for PluvoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluvoClient")
            .field("credentials", &self.inner.credentials)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Builder for [`PluvoClient`].
///
/// Mirrors the credential rules of the API: `client_id` and
/// `client_secret` must be supplied together, and cannot be combined
/// with token authentication.
#[derive(Debug, Default)]
pub struct PluvoClientBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Option<String>,
    config: ClientConfig,
}

impl PluvoClientBuilder {
    /// Set the client ID (requires a client secret as well).
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the client secret (requires a client ID as well).
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set a token for token authentication.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self> {
        self.config = self.config.with_base_url(base_url)?;
        Ok(self)
    }

    /// Override the default page size for list endpoints.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.config = self.config.with_page_size(page_size);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the client, validating the credential combination.
    pub fn build(self) -> Result<PluvoClient> {
        let credentials = match (self.client_id, self.client_secret, self.token) {
            (Some(_), None, _) | (None, Some(_), _) => {
                return Err(Error::Config(
                    "You need to set both client_id and client_secret.".to_string(),
                ));
            }
            (Some(_), Some(_), Some(_)) => {
                return Err(Error::Config(
                    "You can not use both client and token authentication simultaneously."
                        .to_string(),
                ));
            }
            (Some(client_id), Some(client_secret), None) => {
                Credentials::client_pair(client_id, client_secret)
            }
            (None, None, Some(token)) => Credentials::token(token),
            (None, None, None) => Credentials::Anonymous,
        };

        PluvoClient::new(credentials, self.config)
    }
}

impl ClientInner {
    /// Resolve an endpoint path against the configured base URL.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.config.base_url.join(path)?)
    }

    /// Build request headers with authentication.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.credentials.apply_headers(&mut headers)?;
        Ok(headers)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_params(path, &Map::new()).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.get_with_params(path, &to_query_map(query)?).await
    }

    /// Make a GET request with pre-flattened query parameters, retrying
    /// transient failures per the configured retry policy.
    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut attempt = 0u32;

        loop {
            let mut request = self
                .http
                .get(url.clone())
                .headers(self.build_headers()?)
                .query(params);
            if let Some(token) = self.credentials.token_param() {
                request = request.query(&[("token", token)]);
            }

            tracing::debug!(%url, attempt, "GET");
            let result = match request.send().await {
                Ok(response) => self.handle_response(response).await,
                Err(err) => Err(Error::Http(err)),
            };

            match result {
                Err(err)
                    if attempt < self.config.retry.max_retries && self.should_retry(&err) =>
                {
                    let backoff = self.config.retry.backoff_for_attempt(attempt);
                    tracing::debug!(%url, attempt, ?backoff, error = %err, "retrying GET");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Make a POST request with a JSON body. Not retried.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut request = self.http.post(url.clone()).headers(self.build_headers()?);
        if let Some(token) = self.credentials.token_param() {
            request = request.query(&[("token", token)]);
        }

        tracing::debug!(%url, "POST");
        let response = request.json(body).send().await?;
        self.handle_response(response).await
    }

    /// Make a PUT request with a JSON body. Not retried.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut request = self.http.put(url.clone()).headers(self.build_headers()?);
        if let Some(token) = self.credentials.token_param() {
            request = request.query(&[("token", token)]);
        }

        tracing::debug!(%url, "PUT");
        let response = request.json(body).send().await?;
        self.handle_response(response).await
    }

    /// Handle an API response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let status_code = status.as_u16();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body: Value = response.json().await.unwrap_or_default();

        if status_code == 429 {
            return Err(Error::RateLimited {
                retry_after_secs: retry_after.unwrap_or(60),
            });
        }

        if status_code == 404 {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Resource not found")
                .to_string();
            return Err(Error::NotFound(message));
        }

        Err(Error::from_api_response(status_code, body))
    }

    /// Whether an error warrants a retry under the configured policy.
    fn should_retry(&self, err: &Error) -> bool {
        match err {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } => self.config.retry.should_retry_status(429),
            Error::Api { status, .. } => self.config.retry.should_retry_status(*status),
            _ => false,
        }
    }
}

/// Flatten a serializable query struct into a JSON map, dropping nulls.
///
/// Query structs serialize to flat objects; the map form lets pagination
/// parameters be merged in before the request is issued.
pub(crate) fn to_query_map<Q: Serialize>(query: &Q) -> Result<Map<String, Value>> {
    match serde_json::to_value(query)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect()),
        Value::Null => Ok(Map::new()),
        other => Err(Error::Config(format!(
            "query parameters must serialize to an object, got {}",
            other
        ))),
    }
}
