//! C-ABI wrapper around `rickmorty-core`.
//!
//! # Overview
//! Exposes the character browser's app shell through `extern "C"` functions
//! so a native or web host can drive both screens. The host performs every
//! HTTP round-trip; Rust decides which requests to make and which responses
//! to keep.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Host events (`navigate`, `set_search`, `next_page`, `prev_page`)
//!   return the `FfiFetch` to run next, or null when nothing needs fetching.
//! - Responses go back through `rm_app_resolve` with the fetch's
//!   `view_id`/`generation`; responses for superseded fetches are dropped
//!   silently.
//! - Screen state is read as a JSON snapshot via `rm_app_snapshot_json`.
//! - The C caller owns all returned pointers and must call the matching
//!   `rm_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rickmorty_core::{ApiError, App, FetchOutcome, PendingFetch, RickMortyClient};

use types::*;

/// Borrow a C string argument. Null and non-UTF-8 input read as `None`.
fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Run `f` against the app behind `app` and box the fetch it returns.
fn with_app(
    app: *mut FfiApp,
    f: impl FnOnce(&mut App) -> Option<PendingFetch>,
) -> *mut FfiFetch {
    catch_unwind(AssertUnwindSafe(|| {
        if app.is_null() {
            return std::ptr::null_mut();
        }
        let app = unsafe { &mut *app };
        match f(&mut app.inner) {
            Some(fetch) => FfiFetch::from_core(fetch),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// App lifecycle
// ---------------------------------------------------------------------------

/// Create an app talking to `base_url`, or to the public service when
/// `base_url` is null.
///
/// Returns null if `base_url` is not valid UTF-8 or if an internal panic
/// occurs. The caller must free the returned pointer with `rm_app_free`.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_new(base_url: *const c_char) -> *mut FfiApp {
    catch_unwind(|| {
        let client = if base_url.is_null() {
            RickMortyClient::default()
        } else {
            match str_arg(base_url) {
                Some(url) => RickMortyClient::new(url),
                None => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiApp {
            inner: App::new(client),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an app created by `rm_app_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_free(app: *mut FfiApp) {
    if !app.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(app) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Host events
// ---------------------------------------------------------------------------

/// Move to `location` (`/` or `/character/{id}`).
///
/// Returns the first fetch of the mounted screen, or null when it needs
/// none (cache hit, invalid id, unknown route) or `app`/`location` is null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_navigate(app: *mut FfiApp, location: *const c_char) -> *mut FfiFetch {
    let Some(location) = str_arg(location) else {
        return std::ptr::null_mut();
    };
    with_app(app, |app| app.navigate(location))
}

/// Search box edit. A null `text` clears the search.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_set_search(app: *mut FfiApp, text: *const c_char) -> *mut FfiFetch {
    let text = str_arg(text).unwrap_or_default();
    with_app(app, |app| app.set_search(text))
}

/// "Next" control. Null while the control is disabled.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_next_page(app: *mut FfiApp) -> *mut FfiFetch {
    with_app(app, App::next_page)
}

/// "Prev" control. Null while the control is disabled.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_prev_page(app: *mut FfiApp) -> *mut FfiFetch {
    with_app(app, App::prev_page)
}

/// Hand back the response for the fetch identified by `view_id` and
/// `generation`.
///
/// Returns the follow-up fetch (e.g. a character's episodes), or null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_resolve(
    app: *mut FfiApp,
    view_id: u64,
    generation: u64,
    response: *const FfiHttpResponse,
) -> *mut FfiFetch {
    if response.is_null() {
        return std::ptr::null_mut();
    }
    let response = unsafe { &*response }.to_core();
    resolve(app, view_id, generation, Ok(response))
}

/// Report that the fetch identified by `view_id` and `generation` could not
/// be executed at all. `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_fail(
    app: *mut FfiApp,
    view_id: u64,
    generation: u64,
    message: *const c_char,
) -> *mut FfiFetch {
    let message = str_arg(message).unwrap_or("request failed").to_string();
    resolve(app, view_id, generation, Err(ApiError::Transport(message)))
}

fn resolve(app: *mut FfiApp, view_id: u64, generation: u64, outcome: FetchOutcome) -> *mut FfiFetch {
    with_app(app, |app| app.resolve(ticket(view_id, generation), outcome))
}

// ---------------------------------------------------------------------------
// Reading state
// ---------------------------------------------------------------------------

/// JSON picture of the mounted screen, tagged by `"screen"`.
///
/// Returns null if `app` is null. Free with `rm_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn rm_app_snapshot_json(app: *const FfiApp) -> *mut c_char {
    catch_unwind(AssertUnwindSafe(|| {
        if app.is_null() {
            return std::ptr::null_mut();
        }
        let app = unsafe { &*app };
        match serde_json::to_string(&app.inner.snapshot()) {
            Ok(json) => c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFetch` returned by any `rm_app_*` function. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_free_fetch(fetch: *mut FfiFetch) {
    if fetch.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let fetch = unsafe { Box::from_raw(fetch) };
        if !fetch.url.is_null() {
            drop(unsafe { CString::from_raw(fetch.url) });
        }
        if !fetch.headers.is_null() && fetch.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    fetch.headers,
                    fetch.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    }));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn rm_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const BASE: &str = "http://localhost:3000";

    fn new_app() -> *mut FfiApp {
        let url = CString::new(BASE).unwrap();
        let app = rm_app_new(url.as_ptr());
        assert!(!app.is_null());
        app
    }

    fn url_of(fetch: *mut FfiFetch) -> String {
        let fetch = unsafe { &*fetch };
        unsafe { CStr::from_ptr(fetch.url) }
            .to_str()
            .unwrap()
            .to_string()
    }

    fn snapshot(app: *mut FfiApp) -> serde_json::Value {
        let json = rm_app_snapshot_json(app);
        assert!(!json.is_null());
        let value = serde_json::from_str(unsafe { CStr::from_ptr(json) }.to_str().unwrap()).unwrap();
        rm_free_string(json);
        value
    }

    fn respond(app: *mut FfiApp, fetch: *mut FfiFetch, status: u16, body: &str) -> *mut FfiFetch {
        let body = CString::new(body).unwrap();
        let response = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        let (view_id, generation) = {
            let f = unsafe { &*fetch };
            (f.view_id, f.generation)
        };
        rm_free_fetch(fetch);
        rm_app_resolve(app, view_id, generation, &response)
    }

    #[test]
    fn app_new_and_free() {
        let app = new_app();
        rm_app_free(app);
    }

    #[test]
    fn app_new_null_uses_public_service() {
        let app = rm_app_new(std::ptr::null());
        assert!(!app.is_null());
        let root = CString::new("/").unwrap();
        let fetch = rm_app_navigate(app, root.as_ptr());
        assert_eq!(
            url_of(fetch),
            "https://rickandmortyapi.com/api/character/?page=1"
        );
        rm_free_fetch(fetch);
        rm_app_free(app);
    }

    #[test]
    fn app_free_null_is_safe() {
        rm_app_free(std::ptr::null_mut());
    }

    #[test]
    fn navigate_root_returns_list_fetch() {
        let app = new_app();
        let root = CString::new("/").unwrap();
        let fetch = rm_app_navigate(app, root.as_ptr());
        assert!(!fetch.is_null());

        let f = unsafe { &*fetch };
        assert!(matches!(f.method, FfiHttpMethod::Get));
        assert_eq!(f.headers_len, 1);
        assert_eq!(url_of(fetch), format!("{BASE}/character/?page=1"));

        rm_free_fetch(fetch);
        rm_app_free(app);
    }

    #[test]
    fn navigate_null_arguments_return_null() {
        let root = CString::new("/").unwrap();
        assert!(rm_app_navigate(std::ptr::null_mut(), root.as_ptr()).is_null());
        let app = new_app();
        assert!(rm_app_navigate(app, std::ptr::null()).is_null());
        rm_app_free(app);
    }

    #[test]
    fn invalid_detail_id_needs_no_fetch() {
        let app = new_app();
        let path = CString::new("/character/abc").unwrap();
        assert!(rm_app_navigate(app, path.as_ptr()).is_null());
        let snap = snapshot(app);
        assert_eq!(snap["screen"], "details");
        assert_eq!(snap["message"], "Invalid character id");
        rm_app_free(app);
    }

    #[test]
    fn list_response_updates_snapshot() {
        let app = new_app();
        let root = CString::new("/").unwrap();
        let fetch = rm_app_navigate(app, root.as_ptr());
        let body = r#"{"info":{"count":1,"pages":2,"next":"p2","prev":null},"results":[
            {"id":1,"name":"Rick Sanchez","status":"Alive","species":"Human","type":"","gender":"Male",
             "origin":{"name":"Earth (C-137)","url":""},"location":{"name":"Citadel of Ricks","url":""},
             "image":"","episode":[]}
        ]}"#;
        assert!(respond(app, fetch, 200, body).is_null());

        let snap = snapshot(app);
        assert_eq!(snap["screen"], "characters");
        assert_eq!(snap["state"], "success");
        assert_eq!(snap["characters"][0]["name"], "Rick Sanchez");
        assert_eq!(snap["prev_enabled"], false);
        assert_eq!(snap["next_enabled"], true);

        let next = rm_app_next_page(app);
        assert!(url_of(next).ends_with("page=2"));
        rm_free_fetch(next);
        assert!(rm_app_prev_page(app).is_null());
        rm_app_free(app);
    }

    #[test]
    fn detail_flow_continues_with_episodes() {
        let app = new_app();
        let path = CString::new("/character/2").unwrap();
        let fetch = rm_app_navigate(app, path.as_ptr());
        assert_eq!(url_of(fetch), format!("{BASE}/character/2"));

        let body = r#"{"id":2,"name":"Morty Smith","status":"Alive","species":"Human","type":"",
            "gender":"Male","origin":{"name":"unknown","url":""},"location":{"name":"Earth","url":""},
            "image":"","episode":["http://localhost:3000/episode/1"]}"#;
        let episodes = respond(app, fetch, 200, body);
        assert!(!episodes.is_null());
        assert_eq!(url_of(episodes), format!("{BASE}/episode/1"));

        let body = r#"{"id":1,"name":"Pilot","air_date":"December 2, 2013","episode":"S01E01"}"#;
        assert!(respond(app, episodes, 200, body).is_null());

        let snap = snapshot(app);
        assert_eq!(snap["character"]["name"], "Morty Smith");
        assert_eq!(snap["episodes"][0]["episode"], "S01E01");
        assert_eq!(snap["loading"], false);
        rm_app_free(app);
    }

    #[test]
    fn stale_response_is_ignored() {
        let app = new_app();
        let first = CString::new("/character/1").unwrap();
        let second = CString::new("/character/2").unwrap();
        let stale = rm_app_navigate(app, first.as_ptr());
        let current = rm_app_navigate(app, second.as_ptr());

        assert!(respond(app, stale, 404, "").is_null());
        let snap = snapshot(app);
        assert!(snap["error"].is_null());
        assert_eq!(snap["loading"], true);

        assert!(respond(app, current, 404, "").is_null());
        let snap = snapshot(app);
        assert_eq!(snap["error"], "Character not found");
        rm_app_free(app);
    }

    #[test]
    fn fail_records_transport_error() {
        let app = new_app();
        let root = CString::new("/").unwrap();
        let fetch = rm_app_navigate(app, root.as_ptr());
        let (view_id, generation) = {
            let f = unsafe { &*fetch };
            (f.view_id, f.generation)
        };
        rm_free_fetch(fetch);

        let message = CString::new("connection refused").unwrap();
        assert!(rm_app_fail(app, view_id, generation, message.as_ptr()).is_null());
        let snap = snapshot(app);
        assert_eq!(snap["state"], "error");
        assert_eq!(snap["error"], "network error: connection refused");
        rm_app_free(app);
    }

    #[test]
    fn resolve_null_response_returns_null() {
        let app = new_app();
        assert!(rm_app_resolve(app, 1, 1, std::ptr::null()).is_null());
        rm_app_free(app);
    }

    #[test]
    fn snapshot_null_app_returns_null() {
        assert!(rm_app_snapshot_json(std::ptr::null()).is_null());
    }

    #[test]
    fn free_fetch_null_is_safe() {
        rm_free_fetch(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        rm_free_string(std::ptr::null_mut());
    }
}
