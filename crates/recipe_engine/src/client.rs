use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{ClientError, FailureKind, RecipeDto, RecipeSearchResponse};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://food2fork.ca/api/recipe/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// The two recipe endpoints. `token` is sent verbatim as the `Authorization` header.
#[async_trait::async_trait]
pub trait RecipeClient: Send + Sync {
    async fn search(
        &self,
        token: &str,
        page: u32,
        query: &str,
    ) -> Result<RecipeSearchResponse, ClientError>;

    async fn get_by_id(&self, token: &str, id: u32) -> Result<RecipeDto, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecipeClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestRecipeClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut base = self.settings.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, url: Url) -> Result<T, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::new(FailureKind::Auth, "missing auth token"));
        }

        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        decode_body(&bytes)
    }
}

#[async_trait::async_trait]
impl RecipeClient for ReqwestRecipeClient {
    async fn search(
        &self,
        token: &str,
        page: u32,
        query: &str,
    ) -> Result<RecipeSearchResponse, ClientError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("query", query);
        self.get_json(token, url).await
    }

    async fn get_by_id(&self, token: &str, id: u32) -> Result<RecipeDto, ClientError> {
        let mut url = self.endpoint("get")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        self.get_json(token, url).await
    }
}

/// An empty body or a JSON `null` means the id did not resolve.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    let trimmed = bytes.trim_ascii();
    if trimmed.is_empty() || trimmed == b"null" {
        return Err(ClientError::new(FailureKind::NotFound, "empty response body"));
    }
    serde_json::from_slice(trimmed)
        .map_err(|err| ClientError::new(FailureKind::Malformed, err.to_string()))
}

fn map_status(status: StatusCode) -> ClientError {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::Auth,
        StatusCode::NOT_FOUND => FailureKind::NotFound,
        other => FailureKind::HttpStatus(other.as_u16()),
    };
    ClientError::new(kind, status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
