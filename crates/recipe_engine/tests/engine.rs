use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use recipe_engine::{
    ClientError, EngineError, EngineEvent, EngineHandle, RecipeClient, RecipeDto,
    RecipeSearchResponse,
};

struct FakeClient {
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeClient {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

fn dto(id: u32) -> RecipeDto {
    RecipeDto {
        id: i64::from(id),
        title: format!("Recipe {id}"),
        publisher: String::new(),
        featured_image: None,
        rating: 0,
        source_url: None,
        ingredients: Vec::new(),
        date_added: None,
        date_updated: None,
    }
}

#[async_trait::async_trait]
impl RecipeClient for FakeClient {
    async fn search(
        &self,
        _token: &str,
        page: u32,
        _query: &str,
    ) -> Result<RecipeSearchResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(RecipeSearchResponse {
            total_results: 1,
            recipes: vec![dto(page)],
        })
    }

    async fn get_by_id(&self, _token: &str, id: u32) -> Result<RecipeDto, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(dto(id))
    }
}

fn wait_for_event(engine: &EngineHandle, timeout: Duration) -> Option<EngineEvent> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(event) = engine.try_recv() {
            return Some(event);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn fetch_reports_result_for_session() {
    let client = FakeClient::new(Duration::from_millis(10));
    let engine = EngineHandle::with_client(client.clone(), "Token t").expect("engine");

    engine.fetch_recipe(3, 42);
    let event = wait_for_event(&engine, Duration::from_secs(2)).expect("event");

    assert_eq!(
        event,
        EngineEvent::RecipeFetched {
            session_id: 3,
            result: Ok(dto(42)),
        }
    );
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cancelled_fetch_never_reports() {
    let client = FakeClient::new(Duration::from_millis(300));
    let engine = EngineHandle::with_client(client, "Token t").expect("engine");

    engine.fetch_recipe(1, 7);
    thread::sleep(Duration::from_millis(30));
    engine.cancel(1);

    assert_eq!(wait_for_event(&engine, Duration::from_millis(600)), None);
}

#[test]
fn cancel_only_affects_its_session() {
    let client = FakeClient::new(Duration::from_millis(100));
    let engine = EngineHandle::with_client(client, "Token t").expect("engine");

    engine.fetch_recipe(1, 7);
    engine.fetch_recipe(2, 8);
    engine.cancel(1);

    let event = wait_for_event(&engine, Duration::from_secs(2)).expect("event");
    assert_eq!(
        event,
        EngineEvent::RecipeFetched {
            session_id: 2,
            result: Ok(dto(8)),
        }
    );
    assert_eq!(wait_for_event(&engine, Duration::from_millis(300)), None);
}

#[test]
fn search_reports_page() {
    let client = FakeClient::new(Duration::from_millis(5));
    let engine = EngineHandle::with_client(client, "Token t").expect("engine");

    engine.search(4, 2, "beef");
    let event = wait_for_event(&engine, Duration::from_secs(2)).expect("event");

    match event {
        EngineEvent::SearchCompleted {
            request_id,
            page,
            result,
        } => {
            assert_eq!(request_id, 4);
            assert_eq!(page, 2);
            assert_eq!(result.unwrap().recipes, vec![dto(2)]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn handles_from_one_engine_share_events() {
    let client = FakeClient::new(Duration::from_millis(5));
    let engine = match EngineHandle::with_client(client, "Token t") {
        Ok(engine) => engine,
        Err(err) => panic!("engine failed to start: {err}"),
    };
    let observer = engine.clone();

    engine.fetch_recipe(6, 11);
    let event = wait_for_event(&observer, Duration::from_secs(2)).expect("event");
    assert_eq!(
        event,
        EngineEvent::RecipeFetched {
            session_id: 6,
            result: Ok(dto(11)),
        }
    );
}

#[test]
fn runtime_failure_is_reported_as_engine_error() {
    let err = EngineError::from(std::io::Error::other("no threads"));
    assert!(matches!(err, EngineError::Runtime(_)));
    assert_eq!(err.to_string(), "failed to start engine runtime: no threads");
}
