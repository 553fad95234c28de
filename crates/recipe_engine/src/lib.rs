//! Recipe engine: REST client and background effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, RecipeClient, ReqwestRecipeClient};
pub use engine::EngineHandle;
pub use types::{
    ClientError, EngineError, EngineEvent, FailureKind, RecipeDto, RecipeSearchResponse,
};
