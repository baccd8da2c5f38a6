//! Static fixture data bundled with the app.
//!
//! The fixtures are read-only; there is no schema versioning. Lookups are
//! linear because the data sets are a few dozen records.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{MediaItem, MediaSource, ProfileFilm, TimelineEvent, User, UserFilm, UserId};
use crate::timeline::media_pages;

const USERS_JSON: &str = include_str!("../../data/users.json");
const USER_FILMS_JSON: &str = include_str!("../../data/userFilms.json");
const TIMELINE_JSON: &str = include_str!("../../data/timelineData.json");
const PROFILE_FILMS_JSON: &str = include_str!("../../data/profilesfilm.json");

/// Every fixture set, parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub user_films: Vec<UserFilm>,
    pub timeline: Vec<TimelineEvent>,
    pub profile_films: Vec<ProfileFilm>,
}

impl Fixtures {
    /// Parse the fixtures compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(
            USERS_JSON,
            USER_FILMS_JSON,
            TIMELINE_JSON,
            PROFILE_FILMS_JSON,
        )
    }

    /// Parse fixtures from raw JSON payloads
    pub fn from_json(
        users: &str,
        user_films: &str,
        timeline: &str,
        profile_films: &str,
    ) -> Result<Self> {
        let fixtures = Self {
            users: parse_array(users, "users")?,
            user_films: parse_array(user_films, "userFilms")?,
            timeline: parse_array(timeline, "timelineData")?,
            profile_films: parse_array(profile_films, "profilesfilm")?,
        };
        tracing::debug!(
            users = fixtures.users.len(),
            films = fixtures.user_films.len(),
            events = fixtures.timeline.len(),
            "Loaded fixtures"
        );
        Ok(fixtures)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_by_unique_id(&self, unique_user_id: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.unique_user_id == unique_user_id)
    }

    /// Films for a user, oldest first (stack order)
    pub fn films_for(&self, unique_user_id: &str) -> Vec<&UserFilm> {
        let mut films: Vec<&UserFilm> = self
            .user_films
            .iter()
            .filter(|film| film.user_unique_id == unique_user_id)
            .collect();
        films.sort_by_key(|film| film.created_at);
        films
    }

    pub fn profile_films_for(&self, unique_user_id: &str) -> Vec<&ProfileFilm> {
        self.profile_films
            .iter()
            .filter(|film| film.user_unique_id == unique_user_id)
            .collect()
    }

    pub fn timeline_for(&self, unique_user_id: &str) -> Vec<&TimelineEvent> {
        self.timeline
            .iter()
            .filter(|event| event.user_unique_id == unique_user_id)
            .collect()
    }

    /// Viewer pages for a user from `source`
    pub fn media_for(&self, unique_user_id: &str, source: MediaSource) -> Vec<MediaItem> {
        match source {
            MediaSource::Timeline => media_pages(self.timeline_for(unique_user_id)),
            MediaSource::Profile => self
                .profile_films_for(unique_user_id)
                .into_iter()
                .map(MediaItem::from)
                .collect(),
        }
    }
}

fn parse_array<T: DeserializeOwned>(payload: &str, name: &str) -> Result<Vec<T>> {
    serde_json::from_str(payload).map_err(|error| {
        tracing::error!("Failed to parse {name} fixture: {error}");
        error.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().unwrap();
        assert_eq!(fixtures.users.len(), 12);
        assert!(!fixtures.timeline.is_empty());
        assert!(!fixtures.user_films.is_empty());
        assert!(!fixtures.profile_films.is_empty());
    }

    #[test]
    fn every_record_references_a_known_user() {
        let fixtures = Fixtures::bundled().unwrap();
        for event in &fixtures.timeline {
            assert!(fixtures.user_by_unique_id(&event.user_unique_id).is_some());
        }
        for film in &fixtures.user_films {
            assert!(fixtures.user_by_unique_id(&film.user_unique_id).is_some());
        }
        for user in &fixtures.users {
            if let Some(partner) = user.partner_id {
                assert!(fixtures.user(partner).is_some(), "{} partner", user.name);
            }
        }
    }

    #[test]
    fn films_are_returned_oldest_first() {
        let fixtures = Fixtures::bundled().unwrap();
        let films = fixtures.films_for("u-ava");
        assert_eq!(films.len(), 5);
        assert!(films.windows(2).all(|pair| pair[0].created_at <= pair[1].created_at));
    }

    #[test]
    fn profile_media_keeps_fixture_order() {
        let fixtures = Fixtures::bundled().unwrap();
        let pages = fixtures.media_for("u-ava", MediaSource::Profile);
        let ids: Vec<&str> = pages.iter().map(MediaItem::id).collect();
        assert_eq!(ids, vec!["pf-01", "pf-02"]);
        assert!(pages[0].is_playable());
        assert!(!pages[1].is_playable());
        assert!(fixtures.media_for("u-nobody", MediaSource::Profile).is_empty());
    }

    #[test]
    fn timeline_media_matches_media_pages() {
        let fixtures = Fixtures::bundled().unwrap();
        assert_eq!(
            fixtures.media_for("u-ava", MediaSource::Timeline),
            media_pages(fixtures.timeline_for("u-ava"))
        );
    }

    #[test]
    fn malformed_payload_is_a_serialization_error() {
        let error = Fixtures::from_json("[{", "[]", "[]", "[]").unwrap_err();
        assert!(matches!(error, crate::Error::Serialization(_)));
    }
}
