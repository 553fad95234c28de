//! Recipe core: pure state machines and view-model helpers.
mod detail;
mod dialog;
mod effect;
mod msg;
mod recipe;
mod search;
mod state;
mod update;
mod view_model;

pub use detail::{LoadPhase, RecipeLoadState};
pub use dialog::{Dialog, DialogQueue};
pub use effect::Effect;
pub use msg::Msg;
pub use recipe::{LoadFailure, Recipe, RecipeId, RecipeSummary, SessionId};
pub use search::{SearchState, PAGE_SIZE};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    current_view, source_host, AppViewModel, DetailView, FailurePresentation, RecipeRowView,
    SearchView, ViewKind,
};
