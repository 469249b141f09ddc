//! The app shell: routes locations to screens and forwards host events.
//!
//! # Design
//! One screen is mounted at a time. Moving between two detail routes keeps
//! the mounted detail screen, so its cache and its in-flight guard carry
//! over; any other move unmounts the current screen and its cache with it.
//! Responses for an unmounted screen fail the ticket's view check and are
//! dropped.
//!
//! The search text is mirrored into the app store so the list comes back
//! filtered after visiting a character.

use serde::Serialize;
use tracing::debug;

use crate::client::RickMortyClient;
use crate::detail_view::{CharacterDetailView, DetailStep, INVALID_ID_MESSAGE};
use crate::generation::{FetchOutcome, PendingFetch, Ticket};
use crate::list_view::{CharactersView, LoadState};
use crate::route::Route;
use crate::store::{Action, AppProvider, AppStore};
use crate::types::{Character, Episode};

#[derive(Debug)]
pub enum Screen {
    Unmounted,
    Characters(CharactersView),
    Details(CharacterDetailView),
    NotFound,
}

impl Screen {
    fn view_id(&self) -> Option<u64> {
        match self {
            Screen::Characters(view) => Some(view.view_id()),
            Screen::Details(view) => Some(view.view_id()),
            Screen::Unmounted | Screen::NotFound => None,
        }
    }
}

/// Serialisable picture of the mounted screen, for hosts that render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Snapshot {
    Unmounted,
    Characters {
        search: String,
        page: u32,
        state: LoadState,
        error: Option<String>,
        characters: Vec<Character>,
        prev_enabled: bool,
        next_enabled: bool,
    },
    Details {
        id: Option<u32>,
        /// Set instead of everything else when the route id is unusable.
        message: Option<String>,
        loading: bool,
        error: Option<String>,
        character: Option<Character>,
        episodes: Vec<Episode>,
    },
    NotFound,
}

#[derive(Debug)]
pub struct App {
    client: RickMortyClient,
    provider: AppProvider,
    route: Option<Route>,
    screen: Screen,
}

impl App {
    pub fn new(client: RickMortyClient) -> Self {
        Self {
            client,
            provider: AppProvider::default(),
            route: None,
            screen: Screen::Unmounted,
        }
    }

    /// Move to `location` and return the first request of the screen it
    /// mounts, if that screen needs one.
    pub fn navigate(&mut self, location: &str) -> Option<PendingFetch> {
        let route = Route::parse(location);
        debug!(location, ?route, "navigate");
        self.route = Some(route.clone());

        match route {
            Route::Characters => {
                if matches!(self.screen, Screen::Characters(_)) {
                    return None;
                }
                let mut view =
                    CharactersView::with_search(self.client.clone(), self.provider.store().search());
                let fetch = view.mount();
                self.screen = Screen::Characters(view);
                Some(fetch)
            }
            Route::CharacterDetails { id } => {
                if let Screen::Details(view) = &mut self.screen {
                    return view.open(Some(&id));
                }
                let mut view = CharacterDetailView::new(self.client.clone());
                let fetch = view.open(Some(&id));
                self.screen = Screen::Details(view);
                fetch
            }
            Route::NotFound => {
                self.screen = Screen::NotFound;
                None
            }
        }
    }

    /// Search box edit on the characters screen.
    pub fn set_search(&mut self, text: &str) -> Option<PendingFetch> {
        let Screen::Characters(view) = &mut self.screen else {
            return None;
        };
        self.provider
            .store()
            .dispatch(Action::SetSearch(text.to_string()));
        view.set_search(text)
    }

    pub fn next_page(&mut self) -> Option<PendingFetch> {
        match &mut self.screen {
            Screen::Characters(view) => view.next_page(),
            _ => None,
        }
    }

    pub fn prev_page(&mut self) -> Option<PendingFetch> {
        match &mut self.screen {
            Screen::Characters(view) => view.prev_page(),
            _ => None,
        }
    }

    /// Hand back the outcome of a fetch. Returns the follow-up request, if
    /// the mounted screen needs another one.
    pub fn resolve(&mut self, ticket: Ticket, outcome: FetchOutcome) -> Option<PendingFetch> {
        if self.screen.view_id() != Some(ticket.view) {
            debug!(?ticket, "dropping response for unmounted screen");
            return None;
        }
        match &mut self.screen {
            Screen::Characters(view) => {
                view.resolve(ticket, outcome);
                None
            }
            Screen::Details(view) => match view.resolve(ticket, outcome) {
                DetailStep::Continue(fetch) => Some(fetch),
                DetailStep::Done | DetailStep::Stale => None,
            },
            Screen::Unmounted | Screen::NotFound => None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &AppStore {
        self.provider.store()
    }

    pub fn provider(&self) -> &AppProvider {
        &self.provider
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.screen {
            Screen::Unmounted => Snapshot::Unmounted,
            Screen::NotFound => Snapshot::NotFound,
            Screen::Characters(view) => Snapshot::Characters {
                search: view.search().to_string(),
                page: view.page(),
                state: view.load_state(),
                error: view.error().map(str::to_string),
                characters: view.characters().to_vec(),
                prev_enabled: view.prev_enabled(),
                next_enabled: view.next_enabled(),
            },
            Screen::Details(view) => Snapshot::Details {
                id: view.id(),
                message: view.is_invalid().then(|| INVALID_ID_MESSAGE.to_string()),
                loading: view.is_loading(),
                error: view.error().map(str::to_string),
                character: view.character().cloned(),
                episodes: view.episodes().to_vec(),
            },
        }
    }
}
