use crate::{RecipeId, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchRecipe {
        session_id: SessionId,
        recipe_id: RecipeId,
    },
    /// The session ended while its fetch was outstanding; the result must be dropped.
    CancelFetch { session_id: SessionId },
    Search {
        request_id: u64,
        page: u32,
        query: String,
    },
}
