//! Routing table: resource names as typed on the command line, mapped to endpoint paths.

use crate::framework::Resource;
use crate::model::{Country, Genre, Movie, Person, Profession, Rating, Review, User};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Movie,
    Person,
    Review,
    Rating,
    Genre,
    Country,
    Profession,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Movie,
        ResourceKind::Person,
        ResourceKind::Review,
        ResourceKind::Rating,
        ResourceKind::Genre,
        ResourceKind::Country,
        ResourceKind::Profession,
        ResourceKind::User,
    ];

    /// Endpoint segment, e.g. `"movie"`.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Movie => Movie::PATH,
            ResourceKind::Person => Person::PATH,
            ResourceKind::Review => Review::PATH,
            ResourceKind::Rating => Rating::PATH,
            ResourceKind::Genre => Genre::PATH,
            ResourceKind::Country => Country::PATH,
            ResourceKind::Profession => Profession::PATH,
            ResourceKind::User => User::PATH,
        }
    }

    /// Whether the backend serves `{path}/filter/`.
    pub fn filterable(self) -> bool {
        match self {
            ResourceKind::Movie => Movie::FILTERABLE,
            ResourceKind::Person => Person::FILTERABLE,
            ResourceKind::Review => Review::FILTERABLE,
            ResourceKind::Rating => Rating::FILTERABLE,
            ResourceKind::Genre => Genre::FILTERABLE,
            ResourceKind::Country => Country::FILTERABLE,
            ResourceKind::Profession => Profession::FILTERABLE,
            ResourceKind::User => User::FILTERABLE,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Accepts the endpoint name in any case, singular or plural (`movie`, `Movies`).
impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let singular = match name.as_str() {
            "people" => "person",
            "countries" => "country",
            other => other.strip_suffix('s').unwrap_or(other),
        };
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == singular)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}
