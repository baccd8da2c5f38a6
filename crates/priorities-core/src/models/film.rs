//! Film records shown on profile pages and in the sticky film stack

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short film a user shared, rendered as a card in the sticky stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilm {
    pub id: String,
    pub user_unique_id: String,
    pub title: String,
    pub uri: String,
    pub thumb_uri: String,
    pub duration_sec: u32,
    pub created_at: DateTime<Utc>,
}

/// Media kind of a profile header item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileFilmKind {
    Photo,
    Video,
}

/// Profile header media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFilm {
    pub id: String,
    pub user_unique_id: String,
    #[serde(rename = "type")]
    pub kind: ProfileFilmKind,
    pub uri: String,
    #[serde(default)]
    pub thumb_uri: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}
