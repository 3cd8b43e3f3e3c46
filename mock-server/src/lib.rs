use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: i64,
    #[serde(rename = "type")]
    pub joke_type: String,
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    fn new(id: i64, joke_type: &str, setup: &str, punchline: &str) -> Self {
        Self {
            id,
            joke_type: joke_type.to_string(),
            setup: setup.to_string(),
            punchline: punchline.to_string(),
        }
    }
}

/// How `/random_joke` answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Serve the seeded jokes in round-robin order.
    Normal,
    /// Reply with this status and an empty body.
    Status(u16),
    /// Reply 200 with this raw body.
    Body(String),
}

#[derive(Debug)]
pub struct MockState {
    jokes: Vec<Joke>,
    next: AtomicUsize,
    hits: AtomicUsize,
    behavior: RwLock<Behavior>,
}

impl MockState {
    pub fn new(jokes: Vec<Joke>) -> Arc<Self> {
        Arc::new(Self {
            jokes,
            next: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            behavior: RwLock::new(Behavior::Normal),
        })
    }

    pub fn seeded() -> Arc<Self> {
        Self::new(seed_jokes())
    }

    pub async fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.write().await = behavior;
    }

    /// Number of `/random_joke` requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn seed_jokes() -> Vec<Joke> {
    vec![
        Joke::new(
            1,
            "general",
            "Why did the chicken cross the road?",
            "To get to the other side.",
        ),
        Joke::new(
            2,
            "programming",
            "Why do programmers prefer dark mode?",
            "Because light attracts bugs.",
        ),
        Joke::new(
            3,
            "knock-knock",
            "Knock knock. Who's there? Boo.",
            "Boo who? Don't cry, it's only a joke.",
        ),
        Joke::new(4, "general", "What do you call a fake noodle?", "An impasta."),
    ]
}

pub fn app() -> Router {
    app_with(MockState::seeded())
}

pub fn app_with(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/random_joke", get(random_joke))
        .route("/jokes/{id}", get(get_joke))
        .route("/types", get(list_types))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockState::seeded()).await
}

pub async fn run_with(listener: TcpListener, state: Arc<MockState>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

async fn random_joke(State(state): State<Arc<MockState>>) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    let behavior = state.behavior.read().await.clone();
    tracing::debug!(hit, ?behavior, "GET /random_joke");

    match behavior {
        Behavior::Normal => {
            if state.jokes.is_empty() {
                return StatusCode::NOT_FOUND.into_response();
            }
            let index = state.next.fetch_add(1, Ordering::SeqCst) % state.jokes.len();
            Json(state.jokes[index].clone()).into_response()
        }
        Behavior::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Behavior::Body(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
    }
}

async fn get_joke(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
) -> Result<Json<Joke>, StatusCode> {
    state
        .jokes
        .iter()
        .find(|joke| joke.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_types(State(state): State<Arc<MockState>>) -> Json<Vec<String>> {
    let mut types: Vec<String> = state.jokes.iter().map(|j| j.joke_type.clone()).collect();
    types.sort();
    types.dedup();
    Json(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joke_serializes_with_type_key() {
        let joke = Joke::new(1, "general", "Setup", "Punchline");
        let json = serde_json::to_value(&joke).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "general");
        assert_eq!(json["setup"], "Setup");
        assert_eq!(json["punchline"], "Punchline");
        assert!(json.get("joke_type").is_none());
    }

    #[test]
    fn seed_ids_are_unique() {
        let jokes = seed_jokes();
        let mut ids: Vec<i64> = jokes.iter().map(|j| j.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), jokes.len());
    }

    #[test]
    fn seeded_state_starts_normal_with_no_hits() {
        let state = MockState::seeded();
        assert_eq!(state.hits(), 0);
        assert_eq!(*state.behavior.try_read().unwrap(), Behavior::Normal);
    }
}
