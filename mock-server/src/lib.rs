use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use url::form_urlencoded;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: NamedRef,
    pub location: NamedRef,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    pub episode: String,
    pub characters: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Info {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: Info,
    pub results: Vec<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub page: Option<usize>,
}

/// Where the server believes it lives, used to build resource URLs and
/// pagination cursors, and how many characters a page holds.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub base_url: String,
    pub page_size: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub characters: Vec<Character>,
    pub episodes: Vec<Episode>,
}

// (id, name, status, species, type, gender, origin, location, episode ids)
type CharacterRow = (u32, &'static str, &'static str, &'static str, &'static str, &'static str, (&'static str, u32), (&'static str, u32), &'static [u32]);

const CHARACTERS: &[CharacterRow] = &[
    (1, "Rick Sanchez", "Alive", "Human", "", "Male", ("Earth (C-137)", 1), ("Citadel of Ricks", 3), &[1, 2, 3, 4, 5, 6]),
    (2, "Morty Smith", "Alive", "Human", "", "Male", ("unknown", 0), ("Citadel of Ricks", 3), &[1, 2, 3, 4, 5, 6]),
    (3, "Summer Smith", "Alive", "Human", "", "Female", ("Earth (Replacement Dimension)", 20), ("Earth (Replacement Dimension)", 20), &[6]),
    (4, "Beth Smith", "Alive", "Human", "", "Female", ("Earth (Replacement Dimension)", 20), ("Earth (Replacement Dimension)", 20), &[6]),
    (5, "Jerry Smith", "Alive", "Human", "", "Male", ("Earth (Replacement Dimension)", 20), ("Earth (Replacement Dimension)", 20), &[6]),
    (6, "Abadango Cluster Princess", "Alive", "Alien", "", "Female", ("Abadango", 2), ("Abadango", 2), &[5]),
    (7, "Abradolf Lincler", "unknown", "Human", "Genetic experiment", "Male", ("Earth (Replacement Dimension)", 20), ("Testicle Monster Dimension", 21), &[]),
    (8, "Adjudicator Rick", "Dead", "Human", "", "Male", ("unknown", 0), ("Citadel of Ricks", 3), &[4]),
    (9, "Toxic Rick", "Dead", "Humanoid", "Rick's Toxic Side", "Male", ("Alien Spa", 64), ("Earth", 27), &[3]),
    (10, "Mr. Poopybutthole", "Alive", "Poopybutthole", "", "Male", ("unknown", 0), ("Earth (Replacement Dimension)", 20), &[2, 5]),
];

const EPISODES: &[(u32, &str, &str, &str)] = &[
    (1, "Pilot", "December 2, 2013", "S01E01"),
    (2, "Lawnmower Dog", "December 9, 2013", "S01E02"),
    (3, "Anatomy Park", "December 16, 2013", "S01E03"),
    (4, "M. Night Shaym-Aliens!", "January 13, 2014", "S01E04"),
    (5, "Meeseeks and Destroy", "January 20, 2014", "S01E05"),
    (6, "Rick Potion #9", "January 27, 2014", "S01E06"),
];

impl Dataset {
    /// A small, fixed slice of the real service's data.
    pub fn sample(base_url: &str) -> Self {
        let place = |(name, id): (&str, u32)| NamedRef {
            name: name.to_string(),
            url: if id == 0 {
                String::new()
            } else {
                format!("{base_url}/location/{id}")
            },
        };

        let characters: Vec<Character> = CHARACTERS
            .iter()
            .map(|&(id, name, status, species, kind, gender, origin, location, episodes)| Character {
                id,
                name: name.to_string(),
                status: status.to_string(),
                species: species.to_string(),
                kind: kind.to_string(),
                gender: gender.to_string(),
                origin: place(origin),
                location: place(location),
                image: format!("{base_url}/character/avatar/{id}.jpeg"),
                episode: episodes
                    .iter()
                    .map(|e| format!("{base_url}/episode/{e}"))
                    .collect(),
                url: format!("{base_url}/character/{id}"),
                created: "2017-11-04T18:48:46.250Z".to_string(),
            })
            .collect();

        let episodes = EPISODES
            .iter()
            .map(|&(id, name, air_date, code)| Episode {
                id,
                name: name.to_string(),
                air_date: air_date.to_string(),
                episode: code.to_string(),
                characters: CHARACTERS
                    .iter()
                    .filter(|row| row.8.contains(&id))
                    .map(|row| format!("{base_url}/character/{}", row.0))
                    .collect(),
                url: format!("{base_url}/episode/{id}"),
                created: "2017-11-10T12:56:33.798Z".to_string(),
            })
            .collect();

        Self {
            characters,
            episodes,
        }
    }
}

#[derive(Clone)]
struct AppState {
    data: Arc<Dataset>,
    config: Arc<MockConfig>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let data = Dataset::sample(config.base_url.trim_end_matches('/'));
    let state = AppState {
        data: Arc::new(data),
        config: Arc::new(config),
    };
    Router::new()
        .route("/character", get(list_characters))
        .route("/character/", get(list_characters))
        .route("/character/{id}", get(get_character))
        .route("/episode/{ids}", get(get_episodes))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn page_cursor(base_url: &str, page: usize, name: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    if !name.is_empty() {
        query.append_pair("name", name);
    }
    format!("{}/character/?{}", base_url.trim_end_matches('/'), query.finish())
}

async fn list_characters(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let name = params.name.unwrap_or_default();
    let needle = name.to_lowercase();
    let matches: Vec<&Character> = state
        .data
        .characters
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect();

    let page_size = state.config.page_size.max(1);
    let count = matches.len();
    let pages = count.div_ceil(page_size);
    let page = params.page.unwrap_or(1);
    if count == 0 || page == 0 || page > pages {
        return error(StatusCode::NOT_FOUND, "There is nothing here");
    }

    let base_url = &state.config.base_url;
    let results = matches
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();
    let info = Info {
        count,
        pages,
        next: (page < pages).then(|| page_cursor(base_url, page + 1, &name)),
        prev: (page > 1).then(|| page_cursor(base_url, page - 1, &name)),
    };
    (StatusCode::OK, Json(Page { info, results })).into_response()
}

async fn get_character(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<u32>() else {
        return error(StatusCode::BAD_REQUEST, "Hey! you must provide an id");
    };
    match state.data.characters.iter().find(|c| c.id == id) {
        Some(character) => (StatusCode::OK, Json(character.clone())).into_response(),
        None => error(StatusCode::NOT_FOUND, "Character not found"),
    }
}

/// `/episode/3` answers with one object, `/episode/1,2` with an array of
/// the episodes that exist, in the order requested.
async fn get_episodes(State(state): State<AppState>, Path(ids): Path<String>) -> Response {
    let find = |id: u32| state.data.episodes.iter().find(|e| e.id == id).cloned();

    if !ids.contains(',') {
        let Ok(id) = ids.trim().parse::<u32>() else {
            return error(StatusCode::BAD_REQUEST, "Hey! you must provide an id");
        };
        return match find(id) {
            Some(episode) => (StatusCode::OK, Json(episode)).into_response(),
            None => error(StatusCode::NOT_FOUND, "Episode not found"),
        };
    }

    let episodes: Vec<Episode> = ids
        .split(',')
        .filter_map(|raw| raw.trim().parse::<u32>().ok())
        .filter_map(find)
        .collect();
    (StatusCode::OK, Json(episodes)).into_response()
}
