use crate::{Effect, LoadFailure, RecipeSummary};

/// Number of recipes the search endpoint returns per page.
pub const PAGE_SIZE: u32 = 30;

/// Paginated recipe list backed by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    query: String,
    /// Query text of the last submitted search.
    active_query: Option<String>,
    page: u32,
    /// Page of the outstanding request, if any.
    pending_page: Option<u32>,
    recipes: Vec<RecipeSummary>,
    total_results: u32,
    request_id: u64,
    last_failure: Option<LoadFailure>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the query text changed.
    pub fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    /// Starts a new search from page 1, dropping any results from a previous query.
    pub fn submit(&mut self) -> Option<Effect> {
        let query = self.query.trim().to_string();
        if self.is_loading() && self.active_query.as_deref() == Some(query.as_str()) {
            return None;
        }

        self.request_id += 1;
        self.page = 1;
        self.recipes.clear();
        self.total_results = 0;
        self.last_failure = None;
        self.pending_page = Some(1);
        self.active_query = Some(query.clone());
        Some(Effect::Search {
            request_id: self.request_id,
            page: 1,
            query,
        })
    }

    pub fn next_page(&mut self) -> Option<Effect> {
        if self.is_loading() || !self.has_more() {
            return None;
        }
        let query = self.active_query.clone()?;
        self.pending_page = Some(self.page + 1);
        Some(Effect::Search {
            request_id: self.request_id,
            page: self.page + 1,
            query,
        })
    }

    /// Applies a page of results. Stale responses are dropped and `false` is returned.
    pub fn apply_results(
        &mut self,
        request_id: u64,
        page: u32,
        result: Result<(Vec<RecipeSummary>, u32), LoadFailure>,
    ) -> bool {
        if request_id != self.request_id || self.pending_page != Some(page) {
            return false;
        }

        self.pending_page = None;
        match result {
            Ok((recipes, total_results)) => {
                // An empty page ends pagination even if the reported total says otherwise.
                let total_results = if recipes.is_empty() {
                    (self.recipes.len() as u32).min(total_results)
                } else {
                    total_results
                };
                if page == 1 {
                    self.recipes = recipes;
                } else {
                    self.recipes.extend(recipes);
                }
                self.page = page;
                self.total_results = total_results;
                self.last_failure = None;
            }
            Err(failure) => self.last_failure = Some(failure),
        }
        true
    }

    pub fn has_more(&self) -> bool {
        self.active_query.is_some() && (self.recipes.len() as u64) < u64::from(self.total_results)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.pending_page.is_some()
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn last_failure(&self) -> Option<LoadFailure> {
        self.last_failure
    }

    /// Pages still to fetch for the current query, rounded up.
    pub fn remaining_pages(&self) -> u32 {
        let remaining = self.total_results.saturating_sub(self.recipes.len() as u32);
        remaining.div_ceil(PAGE_SIZE)
    }
}
