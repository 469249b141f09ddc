//! Route table: `/` and `/character/{id}`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Characters,
    /// `id` is the raw path segment; the detail screen validates it.
    CharacterDetails { id: String },
    NotFound,
}

impl Route {
    /// Match a location path. Query strings and fragments are ignored.
    pub fn parse(location: &str) -> Route {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Characters,
            ["character", id] => Route::CharacterDetails {
                id: (*id).to_string(),
            },
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Characters => "/".to_string(),
            Route::CharacterDetails { id } => format!("/character/{id}"),
            Route::NotFound => "/404".to_string(),
        }
    }
}
