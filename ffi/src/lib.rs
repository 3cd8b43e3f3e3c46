//! C-ABI wrapper around `joke-core`.
//!
//! # Overview
//! Lets a native mobile host fetch and display jokes without linking Rust's
//! async runtime: the host asks for an `FfiHttpRequest`, performs the GET
//! with its own networking stack, and passes the response back in.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `joke_build_fetch_joke` / `joke_parse_fetch_joke` mirror the core client
//!   1:1 for hosts that keep their own state.
//! - `joke_view_model_*` keeps the presentation state on the Rust side,
//!   including the one-load-at-a-time guard, for hosts that only render.
//! - The C caller owns all returned pointers and must call the matching
//!   `joke_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use joke_core::{FetchError, HttpResponse, JokeClient, JokeStore, TransportError};

use types::*;

/// Read an optional endpoint argument. Null selects the public API; invalid
/// UTF-8 yields `None`.
fn client_from_endpoint(endpoint: *const c_char) -> Option<JokeClient> {
    if endpoint.is_null() {
        return Some(JokeClient::default());
    }
    let url = unsafe { CStr::from_ptr(endpoint) }.to_str().ok()?;
    Some(JokeClient::new(url))
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
///
/// A null body reads as empty. Invalid UTF-8 is replaced rather than
/// rejected; the JSON decoder then reports it.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_string_lossy()
            .into_owned()
    };
    HttpResponse {
        status: resp.status,
        body,
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `JokeClient` bound to `endpoint`, or to the public Official
/// Joke API when `endpoint` is null.
///
/// Returns null if `endpoint` is not valid UTF-8 or if an internal panic
/// occurs. The caller must free the returned pointer with `joke_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_client_new(endpoint: *const c_char) -> *mut FfiJokeClient {
    catch_unwind(|| match client_from_endpoint(endpoint) {
        Some(inner) => Box::into_raw(Box::new(FfiJokeClient { inner })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `JokeClient` created by `joke_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_client_free(client: *mut FfiJokeClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Stateless build / parse
// ---------------------------------------------------------------------------

/// Build the HTTP request that fetches one random joke.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `joke_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_build_fetch_joke(client: *const FfiJokeClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_fetch_joke())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse the response to a fetch-joke request.
///
/// Never returns null. The caller must free the result with
/// `joke_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_parse_fetch_joke(
    client: *const FfiJokeClient,
    response: *const FfiHttpResponse,
) -> *mut FfiJokeResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiJokeResult::null_arg("client");
        }
        if response.is_null() {
            return FfiJokeResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        FfiJokeResult::from_outcome(client.inner.parse_fetch_joke(ffi_response_to_core(resp)))
    })
    .unwrap_or_else(|_| FfiJokeResult::panic("panic in joke_parse_fetch_joke"))
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Create an idle view model whose loads target `endpoint` (null selects the
/// public API).
///
/// Returns null if `endpoint` is not valid UTF-8. Free with
/// `joke_view_model_free`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_new(endpoint: *const c_char) -> *mut FfiJokeViewModel {
    catch_unwind(|| match client_from_endpoint(endpoint) {
        Some(client) => Box::into_raw(Box::new(FfiJokeViewModel {
            client,
            store: JokeStore::new(),
        })),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a view model created by `joke_view_model_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_free(vm: *mut FfiJokeViewModel) {
    if !vm.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(vm) });
        }));
    }
}

/// Start a load: enters the loading state, clears the previous error, and
/// returns the request the host must execute.
///
/// Returns null, changing nothing, when a load is already in flight or `vm`
/// is null. Every non-null return must be followed by exactly one
/// `joke_view_model_complete_load` or `joke_view_model_fail_load`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_begin_load(vm: *const FfiJokeViewModel) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if vm.is_null() {
            return std::ptr::null_mut();
        }
        let vm = unsafe { &*vm };
        if !vm.store.try_begin() {
            return std::ptr::null_mut();
        }
        FfiHttpRequest::from_core(vm.client.build_fetch_joke())
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Finish the in-flight load with the response the host received.
///
/// Returns false if `vm` or `response` is null or no load is in flight.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_complete_load(
    vm: *const FfiJokeViewModel,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if vm.is_null() || response.is_null() {
            return false;
        }
        let vm = unsafe { &*vm };
        let resp = unsafe { &*response };
        let outcome = vm.client.parse_fetch_joke(ffi_response_to_core(resp));
        vm.store.finish(outcome.map_err(Into::into))
    }))
    .unwrap_or(false)
}

/// Finish the in-flight load as a network failure described by `message`
/// (null reads as "unknown error").
///
/// Returns false if `vm` is null or no load is in flight.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_fail_load(
    vm: *const FfiJokeViewModel,
    message: *const c_char,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if vm.is_null() {
            return false;
        }
        let vm = unsafe { &*vm };
        let cause = if message.is_null() {
            "unknown error".to_string()
        } else {
            unsafe { CStr::from_ptr(message) }
                .to_string_lossy()
                .into_owned()
        };
        let err = FetchError::Network(TransportError::new(cause));
        vm.store.finish(Err(err.into()))
    }))
    .unwrap_or(false)
}

/// Snapshot the current presentation state.
///
/// Returns null if `vm` is null. Free with `joke_free_state`.
#[unsafe(no_mangle)]
pub extern "C" fn joke_view_model_state(vm: *const FfiJokeViewModel) -> *mut FfiJokeState {
    catch_unwind(AssertUnwindSafe(|| {
        if vm.is_null() {
            return std::ptr::null_mut();
        }
        let vm = unsafe { &*vm };
        FfiJokeState::from_core(vm.store.snapshot())
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `joke_build_fetch_joke` or
/// `joke_view_model_begin_load`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
    });
}

/// Free an `FfiJokeResult` returned by `joke_parse_fetch_joke`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_free_result(result: *mut FfiJokeResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_ffi_joke(result.joke);
    });
}

/// Free an `FfiJokeState` returned by `joke_view_model_state`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_free_state(state: *mut FfiJokeState) {
    if state.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let state = unsafe { Box::from_raw(state) };
        free_c_string(state.title);
        free_c_string(state.action_label);
        free_c_string(state.headline);
        free_c_string(state.detail);
        free_c_string(state.error_message);
        free_ffi_joke(state.joke);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn joke_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a boxed `FfiJoke` and its strings.
fn free_ffi_joke(joke: *mut FfiJoke) {
    if joke.is_null() {
        return;
    }
    let joke = unsafe { Box::from_raw(joke) };
    free_c_string(joke.joke_type);
    free_c_string(joke.setup);
    free_c_string(joke.punchline);
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
