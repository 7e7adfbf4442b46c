//! Reference data: genres, countries and the professions linking people to movies.
//!
//! None of these has a `filter/` endpoint on the backend.

use super::Related;
use crate::framework::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Resource for Genre {
    type Id = u64;
    type Summary = Genre;
    type Create = GenreCreate;
    type Update = GenreUpdate;

    const PATH: &'static str = "genre";
    const FILTERABLE: bool = false;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: u64,
    pub name: String,
}

/// Countries take the same name-only payloads as genres.
pub type CountryCreate = GenreCreate;
pub type CountryUpdate = GenreUpdate;

impl Resource for Country {
    type Id = u64;
    type Summary = Country;
    type Create = CountryCreate;
    type Update = CountryUpdate;

    const PATH: &'static str = "country";
    const FILTERABLE: bool = false;
}

/// The role a person had on a movie (`"актер"` or `"режиссер"` on the reference backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    pub id: u64,
    pub name: String,
    pub movie: Related,
    pub person: Related,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionCreate {
    pub name: String,
    pub movie: u64,
    pub person: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<u64>,
}

impl Resource for Profession {
    type Id = u64;
    type Summary = Profession;
    type Create = ProfessionCreate;
    type Update = ProfessionUpdate;

    const PATH: &'static str = "profession";
    const FILTERABLE: bool = false;
}
