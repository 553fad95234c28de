use std::fmt;

use serde::{Deserialize, Serialize};

/// Recipe as returned by the `get` and `search` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDto {
    #[serde(rename = "pk")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSearchResponse {
    #[serde(rename = "count")]
    pub total_results: u32,
    #[serde(rename = "results")]
    pub recipes: Vec<RecipeDto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RecipeFetched {
        session_id: u64,
        result: Result<RecipeDto, ClientError>,
    },
    SearchCompleted {
        request_id: u64,
        page: u32,
        result: Result<RecipeSearchResponse, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure to bring up an [`EngineHandle`](crate::EngineHandle).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build recipe client: {0}")]
    Client(#[from] ClientError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Auth,
    NotFound,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Malformed,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Auth => write!(f, "authorization failed"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
