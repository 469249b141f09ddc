//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use rickmorty_core::{HttpMethod, HttpResponse, PendingFetch, Ticket};

/// Opaque handle to an `App`. C callers receive a pointer to this and pass
/// it back into every FFI function.
pub struct FfiApp {
    pub(crate) inner: rickmorty_core::App,
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

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request a screen wants executed.
///
/// The host runs it and hands the response back through `rm_app_resolve`
/// (or the failure through `rm_app_fail`) together with `view_id` and
/// `generation` exactly as received.
#[repr(C)]
pub struct FfiFetch {
    pub view_id: u64,
    pub generation: u64,
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

/// Interior NULs cannot occur in URLs or header values the core builds;
/// should one appear the field degrades to an empty string.
pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

impl FfiFetch {
    /// Convert a core `PendingFetch` into a heap-allocated `FfiFetch`.
    pub(crate) fn from_core(fetch: PendingFetch) -> *mut Self {
        let request = fetch.request;
        let headers_len = request.headers.len() as u32;
        let headers = if request.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = request
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiFetch {
            view_id: fetch.ticket.view,
            generation: fetch.ticket.generation,
            method: request.method.into(),
            url: c_string(request.url),
            headers,
            headers_len,
        }))
    }
}

pub(crate) fn ticket(view_id: u64, generation: u64) -> Ticket {
    Ticket {
        view: view_id,
        generation,
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a fetch, then
/// passes a pointer to `rm_app_resolve`. The FFI layer reads but does not
/// free these fields. A null `body` is read as an empty body.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> HttpResponse {
        let body = if self.body.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(self.body) }
                .to_string_lossy()
                .into_owned()
        };
        HttpResponse::new(self.status, body)
    }
}
