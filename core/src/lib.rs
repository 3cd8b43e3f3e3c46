//! Client core for the random-joke screen.
//!
//! # Overview
//! Fetches one joke from the Official Joke API and keeps the state a screen
//! renders: the current joke, whether a load is in flight, and the last error.
//!
//! # Design
//! - `JokeClient` is stateless and does no I/O: `build_fetch_joke` produces
//!   an `HttpRequest`, `parse_fetch_joke` consumes an `HttpResponse`. A
//!   native host can drive it directly through the FFI crate.
//! - `JokeService` runs that pair over an async `Transport` (`reqwest` by
//!   default) and classifies failures into `FetchError`.
//! - `JokeViewModel` owns the observable `JokeState`, allows one load at a
//!   time, and maps failures to user-facing messages.
//! - `Screen` projects a state snapshot onto what the view shows.

pub mod client;
pub mod error;
pub mod http;
pub mod screen;
pub mod service;
pub mod transport;
pub mod types;
pub mod view_model;

pub use client::{JokeClient, DEFAULT_ENDPOINT};
pub use error::{FetchError, TransportError, BAD_RESPONSE_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use screen::{
    Content, Screen, LOADING_SUBTITLE, LOADING_TITLE, LOAD_ACTION_LABEL, PLACEHOLDER_TEXT,
    SCREEN_TITLE,
};
pub use service::JokeService;
pub use transport::{ReqwestTransport, Transport};
pub use types::Joke;
pub use view_model::{error_message, JokeSource, JokeState, JokeStore, JokeViewModel};
