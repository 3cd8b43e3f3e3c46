//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, nullable pointers instead of `Option`,
//! and enums with explicit discriminants. Conversion helpers live here to
//! keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use joke_core::{Content, FetchError, HttpMethod, Joke, JokeClient, JokeState, JokeStore, Screen};

/// Opaque handle to a `JokeClient`.
pub struct FfiJokeClient {
    pub(crate) inner: JokeClient,
}

/// Opaque handle to the presentation state for hosts that perform the HTTP
/// exchange themselves.
pub struct FfiJokeViewModel {
    pub(crate) client: JokeClient,
    pub(crate) store: JokeStore,
}

/// Convert to a heap-allocated C string. Interior NUL bytes cannot be
/// represented and are dropped.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let c_string = CString::new(s).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c_string.into_raw()
}

fn option_to_c_string(s: Option<String>) -> *mut c_char {
    s.map(to_c_string).unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// An HTTP request described as C-compatible plain data.
///
/// The host executes it and hands the response back through
/// `joke_parse_fetch_joke` or `joke_view_model_complete_load`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: joke_core::HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(req.url),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this on the stack after executing a request. The FFI
/// layer reads but does not free these fields. A null `body` is treated as
/// empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiJokeResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    BadResponse = 1,
    Decoding = 2,
    Network = 3,
    Panic = 4,
    NullArg = 5,
}

/// A joke exposed to C. All strings are owned by the enclosing result or
/// state and released with it.
#[repr(C)]
pub struct FfiJoke {
    pub id: i64,
    pub joke_type: *mut c_char,
    pub setup: *mut c_char,
    pub punchline: *mut c_char,
}

impl FfiJoke {
    fn boxed(joke: Joke) -> *mut Self {
        Box::into_raw(Box::new(FfiJoke {
            id: joke.id,
            joke_type: to_c_string(joke.joke_type),
            setup: to_c_string(joke.setup),
            punchline: to_c_string(joke.punchline),
        }))
    }
}

/// Result envelope for `joke_parse_fetch_joke`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `joke`
/// points to the parsed joke. On failure `error_message` holds the text to
/// show the user, `http_status` is set for `BadResponse`, and `joke` is null.
#[repr(C)]
pub struct FfiJokeResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub joke: *mut FfiJoke,
}

impl FfiJokeResult {
    fn boxed(
        error_code: FfiErrorCode,
        message: Option<String>,
        http_status: u16,
        joke: *mut FfiJoke,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiJokeResult {
            error_code,
            error_message: option_to_c_string(message),
            http_status,
            joke,
        }))
    }

    pub(crate) fn from_outcome(outcome: Result<Joke, FetchError>) -> *mut Self {
        match outcome {
            Ok(joke) => Self::boxed(FfiErrorCode::Ok, None, 0, FfiJoke::boxed(joke)),
            Err(err) => {
                let (code, status) = match &err {
                    FetchError::BadResponse { status } => (FfiErrorCode::BadResponse, *status),
                    FetchError::Decoding(_) => (FfiErrorCode::Decoding, 0),
                    FetchError::Network(_) => (FfiErrorCode::Network, 0),
                };
                Self::boxed(code, Some(err.user_message()), status, std::ptr::null_mut())
            }
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            Some(format!("null argument: {name}")),
            0,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), 0, std::ptr::null_mut())
    }
}

/// Which of the three screen bodies to draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiContent {
    Placeholder = 0,
    Loading = 1,
    Joke = 2,
}

/// Snapshot of the presentation state.
///
/// `joke` and `error_message` are null when absent. A stale joke may be
/// present together with an error message. `headline` and `detail` hold the
/// text of the content area: the loading copy, the setup and punchline, or
/// the placeholder (with an empty `detail`).
#[repr(C)]
pub struct FfiJokeState {
    pub is_loading: bool,
    pub content: FfiContent,
    pub title: *mut c_char,
    pub action_label: *mut c_char,
    pub headline: *mut c_char,
    pub detail: *mut c_char,
    pub joke: *mut FfiJoke,
    pub error_message: *mut c_char,
}

impl FfiJokeState {
    pub(crate) fn from_core(state: JokeState) -> *mut Self {
        let screen = Screen::from_state(&state);
        let content = match screen.content {
            Content::Placeholder { .. } => FfiContent::Placeholder,
            Content::Loading { .. } => FfiContent::Loading,
            Content::Joke { .. } => FfiContent::Joke,
        };
        let (headline, detail) = screen.content.lines();
        let joke = state.joke.map(FfiJoke::boxed).unwrap_or(std::ptr::null_mut());
        Box::into_raw(Box::new(FfiJokeState {
            is_loading: state.is_loading,
            content,
            title: to_c_string(screen.title.to_string()),
            action_label: to_c_string(screen.action_label.to_string()),
            headline: to_c_string(headline.to_string()),
            detail: to_c_string(detail.to_string()),
            joke,
            error_message: option_to_c_string(state.error_message),
        }))
    }
}
