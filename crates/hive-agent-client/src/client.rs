//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::api::{ChatApi, EntriesApi, FilesApi, PromptsApi, TablesApi, ToolsApi};
use crate::config::ClientConfig;
use crate::error::{Error, ErrorResponse, Result};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for streaming requests.
const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(300);

/// Hive Agent API client.
///
/// Provides typed access to all Hive Agent endpoints. Cloning is cheap; all
/// clones share one connection pool, which is released when the last clone
/// is dropped.
///
/// # Example
///
/// ```no_run
/// use hive_agent_client::HiveAgentClient;
///
/// # async fn example() -> hive_agent_client::Result<()> {
/// let client = HiveAgentClient::new("http://localhost:8000")?;
///
/// let reply = client.chat().message("Hello!").await?;
/// let files = client.files().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HiveAgentClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests, always ending in `/`.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Streaming timeout.
    pub(crate) stream_timeout: Duration,
}

impl HiveAgentClient {
    /// Create a client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .base_url(config.server.clone())
            .timeout(config.timeout())
            .stream_timeout(config.stream_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub(crate) fn inner(&self) -> &ClientInner {
        &self.inner
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the chat API.
    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.clone())
    }

    /// Access the entries API.
    pub fn entries(&self) -> EntriesApi {
        EntriesApi::new(self.clone())
    }

    /// Access the database tables API.
    pub fn tables(&self) -> TablesApi {
        TablesApi::new(self.clone())
    }

    /// Access the files API.
    pub fn files(&self) -> FilesApi {
        FilesApi::new(self.clone())
    }

    /// Access the tools API.
    pub fn tools(&self) -> ToolsApi {
        ToolsApi::new(self.clone())
    }

    /// Access the sample prompts API.
    pub fn prompts(&self) -> PromptsApi {
        PromptsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL from path segments beneath the base URL.
    ///
    /// Each segment is percent-encoded on its own, so caller-supplied names
    /// cannot introduce extra path components. A trailing empty segment
    /// produces a trailing slash. Dot segments and non-trailing empty
    /// segments are rejected.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let last = segments.len().saturating_sub(1);
        for (i, part) in segments.iter().enumerate() {
            if matches!(*part, "." | "..") || (part.is_empty() && i != last) {
                return Err(Error::InvalidInput(format!("invalid path segment '{}'", part)));
            }
        }

        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("cannot use {} as a base URL", self.base_url())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "GET");
        let response = self
            .inner
            .http
            .get(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "GET");
        let response = self
            .inner
            .http
            .get(url)
            .query(query)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST");
        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request and return the body as text.
    pub(crate) async fn post_text<B>(&self, segments: &[&str], body: &B) -> Result<String>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST");
        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_text_response(response).await
    }

    /// Make a multipart POST request.
    ///
    /// Uploads use the streaming timeout since attachments can be large.
    pub(crate) async fn post_multipart(
        &self,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST multipart");
        let response = self
            .inner
            .http
            .post(url)
            .multipart(form)
            .timeout(self.inner.stream_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        Ok(response)
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "PUT");
        let response = self
            .inner
            .http
            .put(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a PUT request without a body.
    pub(crate) async fn put_empty<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "PUT");
        let response = self
            .inner
            .http
            .put(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .inner
            .http
            .delete(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request with a JSON body.
    pub(crate) async fn delete_with_body<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .inner
            .http
            .delete(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Handle a response whose body is plain text.
    pub(crate) async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => err.into_message(),
            Err(_) if !body.trim().is_empty() => body,
            Err(_) => format!("HTTP {}", status),
        };

        if status == 404 {
            Error::NotFound(message)
        } else {
            Error::Api { status, message }
        }
    }
}

/// Check a caller-supplied path segment such as a namespace, entry ID or
/// file name.
pub(crate) fn segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", name)));
    }
    if matches!(value, "." | "..") {
        return Err(Error::InvalidInput(format!("{} cannot be '{}'", name, value)));
    }
    Ok(value)
}

/// Builder for creating a HiveAgentClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    stream_timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            stream_timeout: DEFAULT_STREAM_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL for the agent.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the streaming and upload timeout.
    pub fn stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HiveAgentClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported URL scheme '{}', expected http or https",
                base_url.scheme()
            )));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("hive-agent-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(HiveAgentClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                stream_timeout: self.stream_timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
