//! Canned service payloads for unit tests.

use serde_json::json;

use crate::http::HttpResponse;

pub const BASE_URL: &str = "http://localhost:3000/api";

pub fn character_json(id: u32, name: &str, episode_ids: &[u32]) -> serde_json::Value {
    let episode: Vec<String> = episode_ids
        .iter()
        .map(|e| format!("{BASE_URL}/episode/{e}"))
        .collect();
    json!({
        "id": id,
        "name": name,
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {"name": "Earth (C-137)", "url": format!("{BASE_URL}/location/1")},
        "location": {"name": "Citadel of Ricks", "url": format!("{BASE_URL}/location/3")},
        "image": format!("{BASE_URL}/character/avatar/{id}.jpeg"),
        "episode": episode,
        "url": format!("{BASE_URL}/character/{id}"),
        "created": "2017-11-04T18:48:46.250Z"
    })
}

pub fn episode_json(id: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Episode {id}"),
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": [],
        "url": format!("{BASE_URL}/episode/{id}"),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

pub fn page_response(
    names: &[&str],
    prev: Option<&str>,
    next: Option<&str>,
) -> HttpResponse {
    let results: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| character_json(i as u32 + 1, name, &[1]))
        .collect();
    let body = json!({
        "info": {"count": names.len(), "pages": 1, "next": next, "prev": prev},
        "results": results,
    });
    HttpResponse::new(200, body.to_string())
}

pub fn ok(value: serde_json::Value) -> HttpResponse {
    HttpResponse::new(200, value.to_string())
}
