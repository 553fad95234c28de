use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use engine_logging::{engine_debug, engine_info};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, RecipeClient, ReqwestRecipeClient};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    FetchRecipe { session_id: u64, recipe_id: u32 },
    Search {
        request_id: u64,
        page: u32,
        query: String,
    },
    Cancel { session_id: u64 },
}

/// In-flight detail fetches, keyed by session.
#[derive(Default)]
struct InFlight {
    next_fetch_id: u64,
    fetches: HashMap<u64, (u64, CancellationToken)>,
}

type SessionTokens = Arc<Mutex<InFlight>>;

/// Runs client calls on a background tokio runtime and reports results as events.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(
        settings: ClientSettings,
        auth_token: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let client = ReqwestRecipeClient::new(settings)?;
        Self::with_client(Arc::new(client), auth_token)
    }

    /// Starts the engine thread around `client`. The runtime is built before
    /// the thread starts, so a handle is only returned for a working engine.
    pub fn with_client(
        client: Arc<dyn RecipeClient>,
        auth_token: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let auth_token: Arc<str> = Arc::from(auth_token.into());

        thread::spawn(move || {
            let sessions: SessionTokens = Arc::new(Mutex::new(InFlight::default()));
            while let Ok(command) = cmd_rx.recv() {
                handle_command(
                    &runtime,
                    client.clone(),
                    auth_token.clone(),
                    &sessions,
                    command,
                    event_tx.clone(),
                );
            }
            engine_info!("Engine command channel closed; shutting down");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_recipe(&self, session_id: u64, recipe_id: u32) {
        let _ = self.cmd_tx.send(EngineCommand::FetchRecipe {
            session_id,
            recipe_id,
        });
    }

    pub fn search(&self, request_id: u64, page: u32, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            page,
            query: query.into(),
        });
    }

    /// Cancels the session's fetch. Its result, if any, is never delivered.
    pub fn cancel(&self, session_id: u64) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { session_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: Arc<dyn RecipeClient>,
    auth_token: Arc<str>,
    sessions: &SessionTokens,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchRecipe {
            session_id,
            recipe_id,
        } => {
            let token = CancellationToken::new();
            let fetch_id = match sessions.lock() {
                Ok(mut guard) => {
                    guard.next_fetch_id += 1;
                    let fetch_id = guard.next_fetch_id;
                    let previous = guard
                        .fetches
                        .insert(session_id, (fetch_id, token.clone()));
                    if let Some((_, previous)) = previous {
                        previous.cancel();
                    }
                    fetch_id
                }
                Err(_) => 0,
            };
            let sessions = sessions.clone();
            runtime.spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        engine_debug!("Fetch for session {} cancelled", session_id);
                    }
                    result = client.get_by_id(&auth_token, recipe_id) => {
                        if !token.is_cancelled() {
                            let _ = event_tx.send(EngineEvent::RecipeFetched {
                                session_id,
                                result,
                            });
                        }
                    }
                }
                if let Ok(mut guard) = sessions.lock() {
                    let is_current = guard
                        .fetches
                        .get(&session_id)
                        .is_some_and(|(id, _)| *id == fetch_id);
                    if is_current {
                        guard.fetches.remove(&session_id);
                    }
                }
            });
        }
        EngineCommand::Search {
            request_id,
            page,
            query,
        } => {
            runtime.spawn(async move {
                let result = client.search(&auth_token, page, &query).await;
                let _ = event_tx.send(EngineEvent::SearchCompleted {
                    request_id,
                    page,
                    result,
                });
            });
        }
        EngineCommand::Cancel { session_id } => {
            let removed = sessions
                .lock()
                .ok()
                .and_then(|mut guard| guard.fetches.remove(&session_id));
            if let Some((_, token)) = removed {
                token.cancel();
                engine_info!("Cancelled fetch for session {}", session_id);
            }
        }
    }
}
