use super::{Country, Genre, Related};
use crate::framework::Resource;
use serde::{Deserialize, Serialize};

/// A movie or series as returned by `GET movie/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    /// `"Фильм"` or `"Сериал"` on the reference backend.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub rates_count: u64,
    #[serde(default)]
    pub actors: Vec<Related>,
    #[serde(default)]
    pub directors: Vec<Related>,
}

/// A row of `GET movie/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub rate: f64,
}

/// Payload for `POST movie/`. Genres and countries are referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCreate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<u64>,
    #[serde(default)]
    pub countries: Vec<u64>,
}

/// Payload for `PATCH movie/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<u64>>,
}

impl Resource for Movie {
    type Id = u64;
    type Summary = MovieSummary;
    type Create = MovieCreate;
    type Update = MovieUpdate;

    const PATH: &'static str = "movie";
}
