//! Domain DTOs for the character service.
//!
//! # Design
//! These types mirror the external service's JSON but are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift. Fields the screens never read (`url`, `created`, an episode's
//! `characters`) are left out and ignored on decode.

use serde::{Deserialize, Serialize};

/// A named link to another resource, e.g. a character's origin.
///
/// `url` is never dereferenced and may be empty for unknown places.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A character as returned by the service. Replaced wholesale on re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub origin: NamedRef,
    pub location: NamedRef,
    pub image: String,
    /// Episode URLs, in the order the service lists them.
    #[serde(default)]
    pub episode: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Short code such as `S01E01`.
    pub episode: String,
}

/// Pagination cursors. `prev` and `next` are opaque and only checked for
/// presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of the character listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: PageInfo,
    #[serde(default)]
    pub results: Vec<Character>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RICK: &str = r#"{
        "id": 1,
        "name": "Rick Sanchez",
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
        "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
        "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
        "episode": [
            "https://rickandmortyapi.com/api/episode/1",
            "https://rickandmortyapi.com/api/episode/2"
        ],
        "url": "https://rickandmortyapi.com/api/character/1",
        "created": "2017-11-04T18:48:46.250Z"
    }"#;

    #[test]
    fn character_decodes_service_payload() {
        let rick: Character = serde_json::from_str(RICK).unwrap();
        assert_eq!(rick.id, 1);
        assert_eq!(rick.origin.name, "Earth (C-137)");
        assert_eq!(rick.episode.len(), 2);
        assert_eq!(rick.kind, "");
    }

    #[test]
    fn character_type_field_serializes_as_type() {
        let mut rick: Character = serde_json::from_str(RICK).unwrap();
        rick.kind = "Parasite".to_string();
        let json = serde_json::to_value(&rick).unwrap();
        assert_eq!(json["type"], "Parasite");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn page_info_tolerates_null_and_missing_cursors() {
        let info: PageInfo =
            serde_json::from_str(r#"{"count":2,"pages":1,"next":null}"#).unwrap();
        assert_eq!(info.count, 2);
        assert!(info.next.is_none());
        assert!(info.prev.is_none());
    }

    #[test]
    fn named_ref_without_url() {
        let r: NamedRef = serde_json::from_str(r#"{"name":"unknown"}"#).unwrap();
        assert_eq!(r.name, "unknown");
        assert!(r.url.is_empty());
    }
}
