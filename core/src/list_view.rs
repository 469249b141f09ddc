//! The characters screen: name search plus pagination.
//!
//! # Design
//! Every trigger (mount, search edit, page change) starts a new generation
//! and returns the one request the host must run. A search edit moves the
//! search text and the page back to 1 in the same transition, so it yields
//! a single fetch for `(text, 1)`. Responses come back through `resolve`
//! and are committed only when their ticket is still current.
//!
//! A failed fetch records its message and leaves the previous page of
//! results on screen under it.

use serde::Serialize;
use tracing::debug;

use crate::client::RickMortyClient;
use crate::generation::{Commit, FetchOutcome, PendingFetch, RequestGeneration, Ticket};
use crate::types::{Character, PageInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug)]
pub struct CharactersView {
    client: RickMortyClient,
    generation: RequestGeneration,
    search: String,
    page: u32,
    load: LoadState,
    error: Option<String>,
    characters: Vec<Character>,
    info: Option<PageInfo>,
}

impl CharactersView {
    pub fn new(client: RickMortyClient) -> Self {
        Self::with_search(client, String::new())
    }

    /// A screen that starts out filtered by `search`, e.g. restored from
    /// the app store when returning from a detail screen.
    pub fn with_search(client: RickMortyClient, search: impl Into<String>) -> Self {
        Self {
            client,
            generation: RequestGeneration::new(),
            search: search.into(),
            page: 1,
            load: LoadState::Idle,
            error: None,
            characters: Vec::new(),
            info: None,
        }
    }

    /// Initial fetch for the current search and page.
    pub fn mount(&mut self) -> PendingFetch {
        self.start_fetch()
    }

    /// Replace the search text and go back to page 1.
    ///
    /// Returns `None` when neither the text nor the page would change.
    pub fn set_search(&mut self, text: impl Into<String>) -> Option<PendingFetch> {
        let text = text.into();
        if text == self.search && self.page == 1 {
            return None;
        }
        self.search = text;
        self.page = 1;
        Some(self.start_fetch())
    }

    /// Jump to `page`, clamped to a minimum of 1.
    pub fn set_page(&mut self, page: u32) -> Option<PendingFetch> {
        let page = page.max(1);
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.start_fetch())
    }

    /// The "Next" control. Does nothing while it is disabled.
    pub fn next_page(&mut self) -> Option<PendingFetch> {
        if !self.next_enabled() {
            return None;
        }
        self.set_page(self.page.saturating_add(1))
    }

    /// The "Prev" control. Does nothing while it is disabled.
    pub fn prev_page(&mut self) -> Option<PendingFetch> {
        if !self.prev_enabled() {
            return None;
        }
        self.set_page(self.page.saturating_sub(1))
    }

    /// Hand back the outcome of a fetch issued by this screen.
    pub fn resolve(&mut self, ticket: Ticket, outcome: FetchOutcome) -> Commit {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "dropping stale character list response");
            return Commit::Stale;
        }
        // One response per ticket.
        self.generation.invalidate();

        match outcome.and_then(|response| self.client.parse_list_characters(response)) {
            Ok(page) => {
                debug!(
                    search = %self.search,
                    page = self.page,
                    results = page.results.len(),
                    "character list loaded"
                );
                self.characters = page.results;
                self.info = Some(page.info);
                self.load = LoadState::Success;
            }
            Err(e) => {
                debug!(search = %self.search, page = self.page, error = %e, "character list failed");
                self.error = Some(e.to_string());
                self.load = LoadState::Error;
            }
        }
        Commit::Applied
    }

    fn start_fetch(&mut self) -> PendingFetch {
        let ticket = self.generation.begin();
        self.load = LoadState::Loading;
        self.error = None;
        debug!(search = %self.search, page = self.page, ?ticket, "fetching characters");
        PendingFetch {
            ticket,
            request: self.client.build_list_characters(&self.search, self.page),
        }
    }

    pub fn view_id(&self) -> u64 {
        self.generation.view()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn info(&self) -> Option<&PageInfo> {
        self.info.as_ref()
    }

    /// Enabled exactly when the last successful page reported a `prev`
    /// cursor.
    pub fn prev_enabled(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.prev.is_some())
    }

    /// Enabled exactly when the last successful page reported a `next`
    /// cursor.
    pub fn next_enabled(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.next.is_some())
    }
}
