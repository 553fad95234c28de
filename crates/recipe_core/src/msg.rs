use crate::{LoadFailure, Recipe, RecipeSummary, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A recipe detail view was shown; starts a fresh session.
    DetailOpened,
    /// Render pass of the detail view. Safe to send on every pass.
    EnsureLoadTriggered { requested: Option<i64> },
    /// Network response for a detail fetch. `Ok(None)` is an empty payload.
    RecipeFetched {
        session_id: SessionId,
        result: Result<Option<Recipe>, LoadFailure>,
    },
    /// The detail view went away.
    DetailClosed,
    /// User edited the search box.
    QueryChanged(String),
    /// User submitted the current query.
    SearchSubmitted,
    /// List scrolled to the end.
    NextPageRequested,
    /// Network response for a search page.
    SearchCompleted {
        request_id: u64,
        page: u32,
        result: Result<(Vec<RecipeSummary>, u32), LoadFailure>,
    },
    /// The user acknowledged the dialog on screen.
    DialogDismissed,
    /// Connectivity report from the platform or a network outcome.
    NetworkAvailabilityChanged(bool),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
