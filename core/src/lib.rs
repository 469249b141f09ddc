//! Host-driven core of the Rick and Morty character browser.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sit the
//! two screens, the character list and the character details, as plain state
//! machines that hand out tagged requests and take tagged responses back.
//!
//! # Design
//! - `RickMortyClient` is stateless and holds only `base_url`. It is the
//!   single place that knows the service's URL layout.
//! - Every fetch carries a `Ticket`; a screen commits a response only when
//!   the ticket names its current generation, so superseded fetches can
//!   finish in any order without touching visible state.
//! - Each detail screen owns a `DetailCache` for its lifetime.
//! - `App` routes locations to screens and keeps the app-wide `AppStore`.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod app;
pub mod cache;
pub mod client;
pub mod detail_view;
pub mod error;
pub mod generation;
pub mod http;
pub mod list_view;
pub mod route;
pub mod store;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use app::{App, Screen, Snapshot};
pub use cache::{cache_key, CachedCharacter, DetailCache};
pub use client::{RickMortyClient, DEFAULT_BASE_URL};
pub use detail_view::{CharacterDetailView, DetailStep, INVALID_ID_MESSAGE};
pub use error::ApiError;
pub use generation::{Commit, FetchOutcome, PendingFetch, RequestGeneration, Ticket};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list_view::{CharactersView, LoadState};
pub use route::Route;
pub use store::{reduce, use_app_state, Action, AppProvider, AppState, AppStore};
pub use types::{Character, CharacterPage, Episode, NamedRef, PageInfo};
