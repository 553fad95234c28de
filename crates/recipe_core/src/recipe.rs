use std::fmt;

pub type SessionId = u64;

/// Primary key of a recipe. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(u32);

impl RecipeId {
    /// Validates a raw identifier; zero, negative and out-of-range values are rejected.
    pub fn new(raw: i64) -> Option<Self> {
        u32::try_from(raw)
            .ok()
            .filter(|id| *id > 0 && *id <= i32::MAX as u32)
            .map(Self)
    }

    /// Parses a navigation argument such as `"42"`.
    pub fn from_route(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub featured_image: Option<String>,
    pub rating: u32,
    pub source_url: Option<String>,
    pub ingredients: Vec<String>,
    pub date_added: Option<String>,
    pub date_updated: Option<String>,
}

impl Recipe {
    /// Minimal recipe with only an id and a title.
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            publisher: String::new(),
            featured_image: None,
            rating: 0,
            source_url: None,
            ingredients: Vec::new(),
            date_added: None,
            date_updated: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub featured_image: Option<String>,
    pub rating: u32,
}

/// Why a fetch did not produce a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    Network,
    Auth,
    NotFound,
    Malformed,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Network => write!(f, "network error"),
            LoadFailure::Auth => write!(f, "not authorized"),
            LoadFailure::NotFound => write!(f, "recipe not found"),
            LoadFailure::Malformed => write!(f, "malformed response"),
        }
    }
}
