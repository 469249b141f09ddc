//! Request generations: the commit guard shared by every screen.
//!
//! A screen bumps its generation each time it starts a fetch and hands the
//! resulting [`Ticket`] to the host together with the request. When the
//! response comes back the screen commits it only if the ticket still names
//! its current generation. Tickets also carry the id of the screen instance
//! that issued them, so a response addressed to a screen that has since been
//! replaced can never match the new one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one in-flight fetch of one screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Ticket {
    pub view: u64,
    pub generation: u64,
}

/// Monotonic generation counter owned by a single screen instance.
#[derive(Debug)]
pub struct RequestGeneration {
    view: u64,
    current: u64,
}

impl Default for RequestGeneration {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self {
            view: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
            current: 0,
        }
    }

    pub fn view(&self) -> u64 {
        self.view
    }

    /// Supersede whatever is in flight and return the ticket for the next
    /// fetch.
    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        self.current_ticket()
    }

    /// Supersede whatever is in flight without starting anything new.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn current_ticket(&self) -> Ticket {
        Ticket {
            view: self.view,
            generation: self.current,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.current_ticket()
    }
}

/// A request a screen wants executed, tagged with the ticket its response
/// must be returned with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFetch {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// What the host hands back for a `PendingFetch`: the response, or the
/// transport failure that prevented one.
pub type FetchOutcome = Result<HttpResponse, ApiError>;

/// What happened to a response handed back to a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// The response belonged to the current generation and was applied.
    Applied,
    /// The response belonged to a superseded fetch and was dropped.
    Stale,
}
