use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use recipe_core::{Effect, LoadFailure, Msg, Recipe, RecipeId, RecipeSummary};
use recipe_engine::{ClientError, EngineEvent, EngineHandle, FailureKind, RecipeDto};

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRecipe {
                    session_id,
                    recipe_id,
                } => {
                    engine_info!(
                        "FetchRecipe session_id={} recipe_id={}",
                        session_id,
                        recipe_id
                    );
                    self.engine.fetch_recipe(session_id, recipe_id.get());
                }
                Effect::CancelFetch { session_id } => {
                    engine_debug!("CancelFetch session_id={}", session_id);
                    self.engine.cancel(session_id);
                }
                Effect::Search {
                    request_id,
                    page,
                    query,
                } => {
                    engine_info!(
                        "Search request_id={} page={} query_len={}",
                        request_id,
                        page,
                        query.len()
                    );
                    self.engine.search(request_id, page, query);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if map_event(event).into_iter().any(|msg| msg_tx.send(msg).is_err()) {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Maps an engine event to messages. The first message reports connectivity
/// when the outcome says something about it.
fn map_event(event: EngineEvent) -> Vec<Msg> {
    let connectivity = match &event {
        EngineEvent::RecipeFetched { result, .. } => network_reachable(result),
        EngineEvent::SearchCompleted { result, .. } => network_reachable(result),
    };
    let msg = match event {
        EngineEvent::RecipeFetched { session_id, result } => Msg::RecipeFetched {
            session_id,
            result: result
                .map_err(|err| log_failure("Recipe fetch", &err))
                .and_then(map_recipe)
                .map(Some),
        },
        EngineEvent::SearchCompleted {
            request_id,
            page,
            result,
        } => Msg::SearchCompleted {
            request_id,
            page,
            result: result
                .map_err(|err| log_failure("Search", &err))
                .and_then(|response| {
                    let summaries = response
                        .recipes
                        .into_iter()
                        .map(map_summary)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok((summaries, response.total_results))
                }),
        },
    };
    connectivity
        .map(Msg::NetworkAvailabilityChanged)
        .into_iter()
        .chain(std::iter::once(msg))
        .collect()
}

/// Whether a result proves the network reachable (`Some(true)`) or not
/// (`Some(false)`). Failures that came back from the server say nothing.
fn network_reachable<T>(result: &Result<T, ClientError>) -> Option<bool> {
    match result {
        Ok(_) => Some(true),
        Err(err) => match err.kind {
            FailureKind::Network | FailureKind::Timeout => Some(false),
            FailureKind::InvalidUrl => None,
            _ => Some(true),
        },
    }
}

fn log_failure(what: &str, err: &ClientError) -> LoadFailure {
    engine_warn!("{} failed: {}", what, err);
    map_failure(&err.kind)
}

fn map_failure(kind: &FailureKind) -> LoadFailure {
    match kind {
        FailureKind::Auth => LoadFailure::Auth,
        FailureKind::NotFound => LoadFailure::NotFound,
        FailureKind::Malformed | FailureKind::TooLarge { .. } => LoadFailure::Malformed,
        FailureKind::InvalidUrl
        | FailureKind::HttpStatus(_)
        | FailureKind::Timeout
        | FailureKind::Network => LoadFailure::Network,
    }
}

fn map_recipe(dto: RecipeDto) -> Result<Recipe, LoadFailure> {
    let id = RecipeId::new(dto.id).ok_or(LoadFailure::Malformed)?;
    Ok(Recipe {
        id,
        title: dto.title,
        publisher: dto.publisher,
        featured_image: dto.featured_image,
        rating: dto.rating,
        source_url: dto.source_url,
        ingredients: dto.ingredients,
        date_added: dto.date_added,
        date_updated: dto.date_updated,
    })
}

fn map_summary(dto: RecipeDto) -> Result<RecipeSummary, LoadFailure> {
    let id = RecipeId::new(dto.id).ok_or(LoadFailure::Malformed)?;
    Ok(RecipeSummary {
        id,
        title: dto.title,
        publisher: dto.publisher,
        featured_image: dto.featured_image,
        rating: dto.rating,
    })
}
