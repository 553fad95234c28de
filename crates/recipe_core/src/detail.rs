//! Load state of one recipe detail session.
//!
//! A session walks `Idle -> Loading -> Loaded | Failed`, or `Idle -> Invalid`
//! when no usable identifier was supplied. Every terminal phase stays terminal
//! for the lifetime of the session; a new session is the only way to retry.
//! A closed session reports `Closed` whatever phase it was in.

use crate::{Effect, LoadFailure, Recipe, RecipeId, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
    Invalid,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLoadState {
    session_id: SessionId,
    requested_id: Option<RecipeId>,
    has_triggered_load: bool,
    is_loading: bool,
    recipe: Option<Recipe>,
    failure: Option<LoadFailure>,
    invalid: bool,
    closed: bool,
}

impl RecipeLoadState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            requested_id: None,
            has_triggered_load: false,
            is_loading: false,
            recipe: None,
            failure: None,
            invalid: false,
            closed: false,
        }
    }

    /// Requests the recipe once per session.
    ///
    /// Only the first call on an idle session has any effect: a valid id
    /// moves the session to `Loading` and yields the single fetch effect, an
    /// absent or invalid id moves it to `Invalid` without a fetch. All later
    /// calls return `None`, whatever id they carry.
    pub fn ensure_load_triggered(&mut self, requested: Option<i64>) -> Option<Effect> {
        if self.closed || self.has_triggered_load || self.invalid {
            return None;
        }

        match requested.and_then(RecipeId::new) {
            Some(recipe_id) => {
                self.requested_id = Some(recipe_id);
                self.has_triggered_load = true;
                self.is_loading = true;
                Some(Effect::FetchRecipe {
                    session_id: self.session_id,
                    recipe_id,
                })
            }
            None => {
                self.invalid = true;
                None
            }
        }
    }

    /// Applies a fetch response. Returns `false` when the response was
    /// discarded: wrong session, session closed, or no fetch outstanding.
    pub fn apply_fetch_result(
        &mut self,
        session_id: SessionId,
        result: Result<Option<Recipe>, LoadFailure>,
    ) -> bool {
        if self.closed || session_id != self.session_id || !self.is_loading {
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(Some(recipe)) if Some(recipe.id) == self.requested_id => {
                self.recipe = Some(recipe);
            }
            Ok(Some(_)) => self.failure = Some(LoadFailure::Malformed),
            Ok(None) => self.failure = Some(LoadFailure::NotFound),
            Err(failure) => self.failure = Some(failure),
        }
        true
    }

    /// Ends the session. A fetch still in flight must be cancelled by the caller
    /// through the returned effect.
    pub fn close(&mut self) -> Option<Effect> {
        if self.closed {
            return None;
        }
        self.closed = true;
        if self.is_loading {
            self.is_loading = false;
            Some(Effect::CancelFetch {
                session_id: self.session_id,
            })
        } else {
            None
        }
    }

    pub fn phase(&self) -> LoadPhase {
        if self.closed {
            LoadPhase::Closed
        } else if self.invalid {
            LoadPhase::Invalid
        } else if self.recipe.is_some() {
            LoadPhase::Loaded
        } else if self.is_loading {
            LoadPhase::Loading
        } else if self.failure.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Idle
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn requested_id(&self) -> Option<RecipeId> {
        self.requested_id
    }

    pub fn has_triggered_load(&self) -> bool {
        self.has_triggered_load
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// Reason recorded for a `Failed` session.
    pub fn failure(&self) -> Option<LoadFailure> {
        self.failure
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> RecipeId {
        RecipeId::new(raw).unwrap()
    }

    #[test]
    fn fresh_session_is_idle() {
        let state = RecipeLoadState::new(1);
        assert_eq!(state.phase(), LoadPhase::Idle);
        assert!(!state.has_triggered_load());
        assert!(state.recipe().is_none());
    }

    #[test]
    fn zero_and_negative_ids_are_invalid() {
        for raw in [0, -3, i64::from(i32::MAX) + 1] {
            let mut state = RecipeLoadState::new(1);
            assert_eq!(state.ensure_load_triggered(Some(raw)), None);
            assert_eq!(state.phase(), LoadPhase::Invalid);
        }
    }

    #[test]
    fn invalid_session_ignores_later_valid_id() {
        let mut state = RecipeLoadState::new(1);
        state.ensure_load_triggered(None);
        assert_eq!(state.ensure_load_triggered(Some(3)), None);
        assert_eq!(state.phase(), LoadPhase::Invalid);
        assert!(!state.has_triggered_load());
    }

    #[test]
    fn requested_id_is_fixed_by_first_trigger() {
        let mut state = RecipeLoadState::new(1);
        state.ensure_load_triggered(Some(4));
        assert_eq!(state.ensure_load_triggered(Some(9)), None);
        assert_eq!(state.requested_id(), Some(id(4)));
    }

    #[test]
    fn payload_for_other_recipe_is_malformed() {
        let mut state = RecipeLoadState::new(1);
        state.ensure_load_triggered(Some(4));
        assert!(state.apply_fetch_result(1, Ok(Some(Recipe::new(id(5), "Other")))));
        assert_eq!(state.phase(), LoadPhase::Failed);
        assert_eq!(state.failure(), Some(LoadFailure::Malformed));
    }

    #[test]
    fn loaded_recipe_is_not_cleared_by_repeat_result() {
        let mut state = RecipeLoadState::new(1);
        state.ensure_load_triggered(Some(4));
        state.apply_fetch_result(1, Ok(Some(Recipe::new(id(4), "Stew"))));
        assert!(!state.apply_fetch_result(1, Err(LoadFailure::Network)));
        assert_eq!(state.recipe().map(|r| r.title.as_str()), Some("Stew"));
    }

    #[test]
    fn close_while_loading_cancels() {
        let mut state = RecipeLoadState::new(8);
        state.ensure_load_triggered(Some(4));
        assert_eq!(state.close(), Some(Effect::CancelFetch { session_id: 8 }));
        assert_eq!(state.close(), None);
        assert_eq!(state.phase(), LoadPhase::Closed);
        assert_eq!(state.failure(), None);
        assert!(!state.apply_fetch_result(8, Ok(Some(Recipe::new(id(4), "Late")))));
        assert!(state.recipe().is_none());
    }
}
