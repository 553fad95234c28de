use crate::view_model::{AppViewModel, DetailView, FailurePresentation, SearchView};
use crate::{
    current_view, DialogQueue, Effect, LoadFailure, RecipeLoadState, RecipeRowView, SearchState,
    SessionId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    detail: Option<RecipeLoadState>,
    last_session_id: SessionId,
    search: SearchState,
    presentation: FailurePresentation,
    dialogs: DialogQueue,
    network_available: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            detail: None,
            last_session_id: 0,
            search: SearchState::default(),
            presentation: FailurePresentation::default(),
            dialogs: DialogQueue::default(),
            network_available: true,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation(presentation: FailurePresentation) -> Self {
        Self {
            presentation,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let detail = self.detail.as_ref().map(|session| DetailView {
            session_id: session.session_id(),
            phase: session.phase(),
            kind: current_view(session, self.presentation),
        });
        let search = SearchView {
            query: self.search.query().to_string(),
            page: self.search.page(),
            rows: self
                .search
                .recipes()
                .iter()
                .map(RecipeRowView::from)
                .collect(),
            total_results: self.search.total_results(),
            has_more: self.search.has_more(),
            is_loading: self.search.is_loading(),
            failure: self.search.last_failure(),
        };
        let show_progress =
            search.is_loading || self.detail.as_ref().is_some_and(RecipeLoadState::is_loading);

        AppViewModel {
            detail,
            search,
            show_progress,
            dialog: self.dialogs.head().cloned(),
            pending_dialogs: self.dialogs.len().saturating_sub(1),
            network_available: self.network_available,
            dirty: self.dirty,
        }
    }

    pub fn detail(&self) -> Option<&RecipeLoadState> {
        self.detail.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn dialogs(&self) -> &DialogQueue {
        &self.dialogs
    }

    pub fn network_available(&self) -> bool {
        self.network_available
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Queues an error dialog for `failure`, prefixed with what failed.
    pub(crate) fn report_failure(&mut self, what: &str, failure: LoadFailure) -> bool {
        self.dialogs.push("Error", format!("{what}: {failure}"))
    }

    pub(crate) fn dismiss_dialog(&mut self) -> bool {
        self.dialogs.dismiss().is_some()
    }

    /// Returns whether the flag changed.
    pub(crate) fn set_network_available(&mut self, available: bool) -> bool {
        std::mem::replace(&mut self.network_available, available) != available
    }

    pub(crate) fn detail_mut(&mut self) -> Option<&mut RecipeLoadState> {
        self.detail.as_mut()
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    /// Replaces the current detail session with a fresh one.
    pub(crate) fn open_detail(&mut self) -> Option<Effect> {
        let cancel = self.close_detail();
        self.last_session_id += 1;
        self.detail = Some(RecipeLoadState::new(self.last_session_id));
        cancel
    }

    pub(crate) fn close_detail(&mut self) -> Option<Effect> {
        self.detail.take().and_then(|mut session| session.close())
    }
}
