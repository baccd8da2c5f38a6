//! View-normalized media items for the media viewer

use serde::{Deserialize, Serialize};

use super::{EventKind, ProfileFilm, ProfileFilmKind, TimelineEvent, UserFilm};

/// Which record set a media viewer pages through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    /// Media events from the user's timeline, oldest first
    Timeline,
    /// Profile header photos and videos
    Profile,
}

/// A single page of the media viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum MediaItem {
    Photo {
        id: String,
        uri: String,
        thumb_uri: Option<String>,
        caption: Option<String>,
    },
    Video {
        id: String,
        uri: String,
        thumb_uri: Option<String>,
        duration_sec: Option<u32>,
        caption: Option<String>,
    },
    Audio {
        id: String,
        uri: String,
        duration_sec: Option<u32>,
        title: Option<String>,
    },
}

impl MediaItem {
    /// Project a timeline event; calls and notes have no media page.
    pub fn from_event(event: &TimelineEvent) -> Option<Self> {
        let id = event.id.clone();
        match &event.kind {
            EventKind::Photo {
                uri,
                thumb_uri,
                caption,
            } => Some(Self::Photo {
                id,
                uri: uri.clone(),
                thumb_uri: thumb_uri.clone(),
                caption: caption.clone(),
            }),
            EventKind::Video {
                uri,
                thumb_uri,
                duration_sec,
                caption,
            } => Some(Self::Video {
                id,
                uri: uri.clone(),
                thumb_uri: thumb_uri.clone(),
                duration_sec: *duration_sec,
                caption: caption.clone(),
            }),
            EventKind::Audio {
                uri,
                duration_sec,
                title,
            } => Some(Self::Audio {
                id,
                uri: uri.clone(),
                duration_sec: *duration_sec,
                title: title.clone(),
            }),
            EventKind::VoiceCall { .. } | EventKind::VideoCall { .. } | EventKind::Note { .. } => {
                None
            }
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Photo { id, .. } | Self::Video { id, .. } | Self::Audio { id, .. } => id,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::Photo { uri, .. } | Self::Video { uri, .. } | Self::Audio { uri, .. } => uri,
        }
    }

    /// Image to show in grids; photos fall back to the full image.
    pub fn thumbnail(&self) -> Option<&str> {
        match self {
            Self::Photo { uri, thumb_uri, .. } => Some(thumb_uri.as_deref().unwrap_or(uri)),
            Self::Video { thumb_uri, .. } => thumb_uri.as_deref(),
            Self::Audio { .. } => None,
        }
    }

    pub const fn is_playable(&self) -> bool {
        matches!(self, Self::Video { .. } | Self::Audio { .. })
    }
}

impl From<&UserFilm> for MediaItem {
    fn from(film: &UserFilm) -> Self {
        Self::Video {
            id: film.id.clone(),
            uri: film.uri.clone(),
            thumb_uri: Some(film.thumb_uri.clone()),
            duration_sec: Some(film.duration_sec),
            caption: Some(film.title.clone()),
        }
    }
}

impl From<&ProfileFilm> for MediaItem {
    fn from(film: &ProfileFilm) -> Self {
        match film.kind {
            ProfileFilmKind::Photo => Self::Photo {
                id: film.id.clone(),
                uri: film.uri.clone(),
                thumb_uri: film.thumb_uri.clone(),
                caption: film.caption.clone(),
            },
            ProfileFilmKind::Video => Self::Video {
                id: film.id.clone(),
                uri: film.uri.clone(),
                thumb_uri: film.thumb_uri.clone(),
                duration_sec: None,
                caption: film.caption.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    fn event(kind: EventKind) -> TimelineEvent {
        TimelineEvent {
            id: "evt-9".to_string(),
            user_unique_id: "u-ava".to_string(),
            timestamp: "2026-10-01T08:00:00Z".parse().unwrap(),
            sender: Sender::Me,
            kind,
        }
    }

    #[test]
    fn photo_thumbnail_falls_back_to_uri() {
        let item = MediaItem::from_event(&event(EventKind::Photo {
            uri: "file://a.jpg".to_string(),
            thumb_uri: None,
            caption: None,
        }))
        .unwrap();

        assert_eq!(item.id(), "evt-9");
        assert_eq!(item.thumbnail(), Some("file://a.jpg"));
        assert!(!item.is_playable());
    }

    #[test]
    fn calls_and_notes_have_no_media_page() {
        assert!(MediaItem::from_event(&event(EventKind::VoiceCall { duration_sec: None })).is_none());
        assert!(MediaItem::from_event(&event(EventKind::Note {
            text: "hi".to_string(),
            title: None,
        }))
        .is_none());
    }
}
