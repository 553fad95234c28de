use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DetailOpened => {
            let cancel = state.open_detail();
            state.mark_dirty();
            cancel.into_iter().collect()
        }
        Msg::EnsureLoadTriggered { requested } => {
            let (effect, changed) = match state.detail_mut() {
                Some(session) => {
                    let before = session.phase();
                    let effect = session.ensure_load_triggered(requested);
                    (effect, session.phase() != before)
                }
                None => (None, false),
            };
            if changed {
                state.mark_dirty();
            }
            effect.into_iter().collect()
        }
        Msg::RecipeFetched { session_id, result } => {
            // Outer `Some` means the result was applied to the live session.
            let applied = state.detail_mut().and_then(|session| {
                session
                    .apply_fetch_result(session_id, result)
                    .then(|| session.failure())
            });
            if let Some(failure) = applied {
                state.mark_dirty();
                if let Some(failure) = failure {
                    state.report_failure("Could not load recipe", failure);
                }
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            let had_session = state.detail().is_some();
            let cancel = state.close_detail();
            if had_session {
                state.mark_dirty();
            }
            cancel.into_iter().collect()
        }
        Msg::QueryChanged(query) => {
            if state.search_mut().set_query(query) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchSubmitted => match state.search_mut().submit() {
            Some(effect) => {
                state.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        },
        Msg::NextPageRequested => match state.search_mut().next_page() {
            Some(effect) => {
                state.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        },
        Msg::SearchCompleted {
            request_id,
            page,
            result,
        } => {
            let failure = result.as_ref().err().copied();
            if state.search_mut().apply_results(request_id, page, result) {
                state.mark_dirty();
                if let Some(failure) = failure {
                    state.report_failure("Search failed", failure);
                }
            }
            Vec::new()
        }
        Msg::DialogDismissed => {
            if state.dismiss_dialog() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NetworkAvailabilityChanged(available) => {
            if state.set_network_available(available) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
