//! The character details screen.
//!
//! # Design
//! Opening an id first consults the screen's own [`DetailCache`]; a hit is
//! rendered synchronously with no request at all. A miss runs a two-step
//! sequence: the character, then a single batch request for its episodes.
//! Each step is one generation. Opening another id, or the same id again,
//! supersedes whatever step is in flight, and its response is dropped when
//! it arrives. Only a sequence that reaches the end is written to the cache.

use tracing::{debug, warn};

use crate::cache::{cache_key, CachedCharacter, DetailCache};
use crate::client::RickMortyClient;
use crate::error::ApiError;
use crate::generation::{FetchOutcome, PendingFetch, RequestGeneration, Ticket};
use crate::types::{Character, Episode};

/// Shown instead of the details when the route carries no usable id.
pub const INVALID_ID_MESSAGE: &str = "Invalid character id";

/// Result of handing a response back to the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStep {
    /// The response was applied and the sequence is over.
    Done,
    /// The response was applied and the next request must be run.
    Continue(PendingFetch),
    /// The response belonged to a superseded step and was dropped.
    Stale,
}

#[derive(Debug)]
enum Stage {
    Character { id: u32 },
    Episodes { id: u32, character: Character },
}

#[derive(Debug)]
pub struct CharacterDetailView {
    client: RickMortyClient,
    generation: RequestGeneration,
    cache: DetailCache,
    id: Option<u32>,
    invalid: bool,
    character: Option<Character>,
    episodes: Vec<Episode>,
    loading: bool,
    error: Option<String>,
    in_flight: Option<Stage>,
}

impl CharacterDetailView {
    pub fn new(client: RickMortyClient) -> Self {
        Self {
            client,
            generation: RequestGeneration::new(),
            cache: DetailCache::new(),
            id: None,
            invalid: false,
            character: None,
            episodes: Vec::new(),
            loading: false,
            error: None,
            in_flight: None,
        }
    }

    /// Show the character named by the route parameter.
    ///
    /// Returns the request to run, or `None` when the screen is already
    /// complete: a cache hit, or an id that is missing or not a positive
    /// integer.
    pub fn open(&mut self, id_param: Option<&str>) -> Option<PendingFetch> {
        self.generation.invalidate();
        self.in_flight = None;
        self.error = None;

        let Some(id) = id_param.and_then(parse_id) else {
            debug!(id = ?id_param, "invalid character id");
            self.id = None;
            self.invalid = true;
            self.loading = false;
            self.character = None;
            self.episodes.clear();
            return None;
        };
        self.id = Some(id);
        self.invalid = false;

        let key = cache_key(id);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "character served from cache");
            self.character = Some(cached.character.clone());
            self.episodes = cached.episodes.clone();
            self.loading = false;
            return None;
        }

        self.character = None;
        self.episodes.clear();
        self.loading = true;
        self.in_flight = Some(Stage::Character { id });
        let ticket = self.generation.begin();
        debug!(id, ?ticket, "fetching character");
        Some(PendingFetch {
            ticket,
            request: self.client.build_get_character(id),
        })
    }

    /// Hand back the outcome of a request issued by this screen.
    pub fn resolve(&mut self, ticket: Ticket, outcome: FetchOutcome) -> DetailStep {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "dropping stale character details response");
            return DetailStep::Stale;
        }
        let Some(stage) = self.in_flight.take() else {
            return DetailStep::Stale;
        };

        match stage {
            Stage::Character { id } => {
                let character =
                    match outcome.and_then(|response| self.client.parse_get_character(response)) {
                        Ok(character) => character,
                        Err(e) => return self.fail(id, e),
                    };
                self.character = Some(character.clone());

                match self.client.build_get_episodes(&character.episode) {
                    Some(request) => {
                        let ticket = self.generation.begin();
                        debug!(id, episodes = character.episode.len(), ?ticket, "fetching episodes");
                        self.in_flight = Some(Stage::Episodes { id, character });
                        DetailStep::Continue(PendingFetch { ticket, request })
                    }
                    None => self.finish(id, character, Vec::new()),
                }
            }
            Stage::Episodes { id, character } => {
                match outcome.and_then(|response| self.client.parse_get_episodes(response)) {
                    Ok(episodes) => self.finish(id, character, episodes),
                    Err(e) => self.fail(id, e),
                }
            }
        }
    }

    fn finish(&mut self, id: u32, character: Character, episodes: Vec<Episode>) -> DetailStep {
        self.generation.invalidate();
        self.episodes = episodes.clone();
        self.loading = false;
        let key = cache_key(id);
        debug!(%key, episodes = episodes.len(), "character details cached");
        self.cache.insert(key, CachedCharacter { character, episodes });
        DetailStep::Done
    }

    fn fail(&mut self, id: u32, error: ApiError) -> DetailStep {
        self.generation.invalidate();
        warn!(id, %error, "character details failed");
        self.error = Some(error.to_string());
        self.loading = false;
        DetailStep::Done
    }

    pub fn view_id(&self) -> u64 {
        self.generation.view()
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|id| *id > 0)
}
