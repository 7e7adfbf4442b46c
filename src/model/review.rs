//! Reviews and ratings: user-authored resources attached to a movie.

use super::Related;
use crate::framework::Resource;
use serde::{Deserialize, Serialize};

/// A written review (`GET review/{id}/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    /// Positive, negative or neutral.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub movie: Related,
    pub user: Related,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A row of `GET review/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    pub movie: Related,
    pub user: Related,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCreate {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub text: String,
    pub movie: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Resource for Review {
    type Id = u64;
    type Summary = ReviewSummary;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;

    const PATH: &'static str = "review";
}

/// A 1–10 rating of a movie by a user (`GET rating/{id}/`). Listing rows have the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: u64,
    pub movie: Related,
    pub user: Related,
    pub rate: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default = "watched_by_default")]
    pub is_watched: bool,
}

fn watched_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCreate {
    pub movie: u64,
    pub rate: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_watched: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_watched: Option<bool>,
}

impl Resource for Rating {
    type Id = u64;
    type Summary = Rating;
    type Create = RatingCreate;
    type Update = RatingUpdate;

    const PATH: &'static str = "rating";
}
