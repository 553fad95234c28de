use crate::{
    Dialog, LoadFailure, LoadPhase, Recipe, RecipeId, RecipeLoadState, RecipeSummary, SessionId,
};

/// How a failed load is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePresentation {
    /// Failed loads show the invalid-recipe placeholder, same as a missing id.
    #[default]
    Legacy,
    /// Failed loads get their own view carrying the reason.
    Distinct,
}

/// What the detail screen should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    InvalidRecipeView,
    ShimmerPlaceholderView,
    RecipeContentView(Recipe),
    FailedView(LoadFailure),
}

/// Selects the detail view purely from the session state.
pub fn current_view(state: &RecipeLoadState, presentation: FailurePresentation) -> ViewKind {
    match state.phase() {
        LoadPhase::Idle | LoadPhase::Invalid | LoadPhase::Closed => ViewKind::InvalidRecipeView,
        LoadPhase::Loading => ViewKind::ShimmerPlaceholderView,
        LoadPhase::Loaded => match state.recipe() {
            Some(recipe) => ViewKind::RecipeContentView(recipe.clone()),
            None => ViewKind::InvalidRecipeView,
        },
        LoadPhase::Failed => match (presentation, state.failure()) {
            (FailurePresentation::Distinct, Some(reason)) => ViewKind::FailedView(reason),
            _ => ViewKind::InvalidRecipeView,
        },
    }
}

/// Host part of the recipe's source link, e.g. `"example.com"`.
pub fn source_host(recipe: &Recipe) -> Option<String> {
    let raw = recipe.source_url.as_deref()?;
    let parsed = url::Url::parse(raw).ok()?;
    parsed
        .host_str()
        .map(|host| host.trim_start_matches("www.").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub detail: Option<DetailView>,
    pub search: SearchView,
    /// Drives the global progress bar.
    pub show_progress: bool,
    /// Head of the dialog queue.
    pub dialog: Option<Dialog>,
    /// Dialogs waiting behind `dialog`.
    pub pending_dialogs: usize,
    pub network_available: bool,
    pub dirty: bool,
}

impl Default for AppViewModel {
    fn default() -> Self {
        Self {
            detail: None,
            search: SearchView::default(),
            show_progress: false,
            dialog: None,
            pending_dialogs: 0,
            network_available: true,
            dirty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub session_id: SessionId,
    pub phase: LoadPhase,
    pub kind: ViewKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub page: u32,
    pub rows: Vec<RecipeRowView>,
    pub total_results: u32,
    pub has_more: bool,
    pub is_loading: bool,
    pub failure: Option<LoadFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRowView {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub rating: u32,
}

impl From<&RecipeSummary> for RecipeRowView {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            publisher: summary.publisher.clone(),
            rating: summary.rating,
        }
    }
}
