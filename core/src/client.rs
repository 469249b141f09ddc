//! Stateless HTTP request builder and response parser for the character
//! service.
//!
//! # Design
//! `RickMortyClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the round-trip in between, so the client
//! is deterministic and free of I/O dependencies.
//!
//! This is the only place that knows the service's URL layout. Screens go
//! through it for every request.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Character, CharacterPage, Episode};

/// Public endpoint of the character service.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Error body the service sends with non-success statuses.
#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// The batch endpoint answers with a bare object for one id and an array
/// for several.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Synchronous, stateless client for the character service.
#[derive(Debug, Clone)]
pub struct RickMortyClient {
    base_url: String,
}

impl Default for RickMortyClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RickMortyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /character/?name=&page=`. An empty `name` is left out of the
    /// query entirely.
    pub fn build_list_characters(&self, name: &str, page: u32) -> HttpRequest {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !name.is_empty() {
            query.append_pair("name", name);
        }
        query.append_pair("page", &page.to_string());
        HttpRequest::get(format!("{}/character/?{}", self.base_url, query.finish()))
    }

    pub fn build_get_character(&self, id: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/character/{id}", self.base_url))
    }

    /// Batch lookup for the episodes behind `urls`.
    ///
    /// Returns `None` when there is nothing to fetch; the caller must treat
    /// that as an empty episode list without touching the network.
    pub fn build_get_episodes<S: AsRef<str>>(&self, urls: &[S]) -> Option<HttpRequest> {
        let ids = episode_ids(urls);
        if ids.is_empty() {
            return None;
        }
        Some(HttpRequest::get(format!(
            "{}/episode/{}",
            self.base_url,
            ids.join(",")
        )))
    }

    pub fn parse_list_characters(&self, response: HttpResponse) -> Result<CharacterPage, ApiError> {
        if !response.is_success() {
            let message = serde_json::from_str::<ServiceErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| response.status_text());
            return Err(ApiError::Service {
                status: response.status,
                message,
            });
        }
        decode(&response)
    }

    pub fn parse_get_character(&self, response: HttpResponse) -> Result<Character, ApiError> {
        if !response.is_success() {
            return Err(ApiError::CharacterNotFound {
                status: response.status,
            });
        }
        decode(&response)
    }

    pub fn parse_get_episodes(&self, response: HttpResponse) -> Result<Vec<Episode>, ApiError> {
        if !response.is_success() {
            return Err(ApiError::EpisodesUnavailable {
                status: response.status,
            });
        }
        let episodes: OneOrMany<Episode> = decode(&response)?;
        Ok(episodes.into())
    }
}

/// Episode ids are the last path segment of each episode URL.
pub fn episode_ids<S: AsRef<str>>(urls: &[S]) -> Vec<&str> {
    urls.iter()
        .filter_map(|url| url.as_ref().trim_end_matches('/').rsplit('/').next())
        .filter(|id| !id.is_empty())
        .collect()
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    Ok(serde_json::from_str(&response.body)?)
}
