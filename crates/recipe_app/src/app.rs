use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use engine_logging::{engine_debug, engine_warn};
use recipe_core::{update, AppState, LoadPhase, Msg, RecipeLoadState};
use recipe_engine::EngineHandle;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render::render;

/// Upper bound between render passes while waiting on the engine.
const RENDER_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The recipe or search could not be shown.
    Unavailable,
}

pub fn run(command: &Command, config: &AppConfig) -> anyhow::Result<Outcome> {
    let engine = EngineHandle::new(config.client_settings(), config.auth_token.clone())
        .context("failed to start recipe engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx);
    let mut driver = Driver {
        state: AppState::with_presentation(config.failure_presentation.into()),
        runner,
        msg_rx,
        deadline: config.load_deadline(),
    };

    let outcome = match command {
        Command::Get { id } => driver.show_recipe(id)?,
        Command::Search { query, pages } => driver.search(query, *pages)?,
    };
    for line in render(&driver.state.view()) {
        println!("{line}");
    }
    Ok(outcome)
}

struct Driver {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    deadline: Duration,
}

impl Driver {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!("view: {:?}", render(&state.view()));
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Pumps engine messages until `done` holds or the deadline passes.
    /// `on_pass` runs once per render pass, before `done` is checked.
    fn pump_until(
        &mut self,
        mut on_pass: impl FnMut(&mut Self),
        done: impl Fn(&AppState) -> bool,
    ) -> anyhow::Result<()> {
        // A deadline too far out to represent means no deadline.
        let deadline = Instant::now().checked_add(self.deadline);
        loop {
            on_pass(self);
            if done(&self.state) {
                return Ok(());
            }
            let Some(wait) = next_wait(deadline, Instant::now()) else {
                bail!("timed out after {:?}", self.deadline);
            };
            match self.msg_rx.recv_timeout(wait) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => self.dispatch(Msg::Tick),
                Err(mpsc::RecvTimeoutError::Disconnected) => bail!("engine stopped"),
            }
        }
    }

    fn show_recipe(&mut self, raw_id: &str) -> anyhow::Result<Outcome> {
        let requested = raw_id.trim().parse::<i64>().ok();
        self.dispatch(Msg::DetailOpened);

        // Every pass asks for the load again; the session only honours the first.
        let waited = self.pump_until(
            |driver| driver.dispatch(Msg::EnsureLoadTriggered { requested }),
            |state| {
                !matches!(
                    state.detail().map(RecipeLoadState::phase),
                    Some(LoadPhase::Idle | LoadPhase::Loading)
                )
            },
        );
        if let Err(err) = waited {
            self.dispatch(Msg::DetailClosed);
            return Err(err.context(format!("loading recipe {raw_id:?}")));
        }

        let phase = self.state.detail().map(RecipeLoadState::phase);
        if phase == Some(LoadPhase::Loaded) {
            Ok(Outcome::Success)
        } else {
            if let Some(failure) = self.state.detail().and_then(RecipeLoadState::failure) {
                engine_warn!("Recipe {:?} unavailable: {}", raw_id, failure);
            }
            Ok(Outcome::Unavailable)
        }
    }

    fn search(&mut self, query: &str, pages: u32) -> anyhow::Result<Outcome> {
        self.dispatch(Msg::QueryChanged(query.to_string()));
        self.dispatch(Msg::SearchSubmitted);

        let mut pages_loaded = 0;
        loop {
            self.pump_until(|_| {}, |state| !state.search().is_loading())
                .with_context(|| format!("searching for {query:?}"))?;
            pages_loaded += 1;

            let search = self.state.search();
            if search.last_failure().is_some() || !search.has_more() || pages_loaded >= pages {
                break;
            }
            self.dispatch(Msg::NextPageRequested);
        }

        if self.state.search().last_failure().is_some() {
            Ok(Outcome::Unavailable)
        } else {
            Ok(Outcome::Success)
        }
    }
}

/// Time to block before the next render pass, or `None` once `deadline` has passed.
fn next_wait(deadline: Option<Instant>, now: Instant) -> Option<Duration> {
    match deadline {
        None => Some(RENDER_INTERVAL),
        Some(deadline) if now >= deadline => None,
        Some(deadline) => Some(RENDER_INTERVAL.min(deadline - now)),
    }
}
