//! Shared fixtures for the wiremock-backed tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use swapi_browser::swapi::SwapiClient;
use swapi_browser::RecordStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Delay applied to link responses so that resolvers overlap
pub const SLOW: Duration = Duration::from_millis(150);

pub fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn url(server: &MockServer, collection: &str, id: u32) -> String {
    format!("{}/api/{}/{}/", server.uri(), collection, id)
}

pub fn client(server: &MockServer) -> SwapiClient {
    SwapiClient::new(&base_url(server)).expect("valid base url")
}

pub fn store(server: &MockServer) -> RecordStore {
    RecordStore::new(client(server))
}

/// A person payload with the given homeworld and films
pub fn person(server: &MockServer, id: u32, name: &str, homeworld: u32, films: &[u32]) -> Value {
    json!({
        "name": name,
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "skin_color": "fair",
        "eye_color": "blue",
        "birth_year": "19BBY",
        "gender": "male",
        "homeworld": url(server, "planets", homeworld),
        "films": films.iter().map(|f| url(server, "films", *f)).collect::<Vec<_>>(),
        "species": [],
        "vehicles": [],
        "starships": [],
        "url": url(server, "people", id),
    })
}

pub fn listing(count: u64, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": results,
    })
}

pub fn planet(server: &MockServer, id: u32, name: &str) -> Value {
    json!({
        "name": name,
        "climate": "arid",
        "terrain": "desert",
        "population": "200000",
        "url": url(server, "planets", id),
    })
}

pub fn film(server: &MockServer, id: u32, title: &str) -> Value {
    json!({
        "title": title,
        "episode_id": id + 3,
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "url": url(server, "films", id),
    })
}

/// Mount a linked resource that must be fetched exactly `times` times
pub async fn mount_resource(
    server: &MockServer,
    collection: &str,
    id: u32,
    body: Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{}/{}/", collection, id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(SLOW))
        .expect(times)
        .mount(server)
        .await;
}
