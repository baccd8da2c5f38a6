//! Timeline event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Them,
}

impl Sender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Me => "me",
            Self::Them => "them",
        }
    }
}

/// Type-specific payload of a timeline event, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum EventKind {
    Photo {
        uri: String,
        #[serde(default)]
        thumb_uri: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    Video {
        uri: String,
        #[serde(default)]
        thumb_uri: Option<String>,
        #[serde(default)]
        duration_sec: Option<u32>,
        #[serde(default)]
        caption: Option<String>,
    },
    Audio {
        uri: String,
        #[serde(default)]
        duration_sec: Option<u32>,
        #[serde(default)]
        title: Option<String>,
    },
    VoiceCall {
        #[serde(default)]
        duration_sec: Option<u32>,
    },
    VideoCall {
        #[serde(default)]
        duration_sec: Option<u32>,
    },
    Note {
        text: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl EventKind {
    /// Fixture tag for this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Photo { .. } => "photo",
            Self::Video { .. } => "video",
            Self::Audio { .. } => "audio",
            Self::VoiceCall { .. } => "voice_call",
            Self::VideoCall { .. } => "video_call",
            Self::Note { .. } => "note",
        }
    }

    /// Whether the media viewer can show this kind
    pub const fn is_media(&self) -> bool {
        matches!(
            self,
            Self::Photo { .. } | Self::Video { .. } | Self::Audio { .. }
        )
    }
}

/// A single interaction record between the device owner and a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub user_unique_id: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimelineEvent {
    /// One-line summary used by list rows and the CLI
    pub fn summary(&self) -> String {
        match &self.kind {
            EventKind::Photo { caption, .. } => {
                caption.clone().unwrap_or_else(|| "Photo".to_string())
            }
            EventKind::Video { caption, .. } => {
                caption.clone().unwrap_or_else(|| "Video".to_string())
            }
            EventKind::Audio { title, .. } => {
                title.clone().unwrap_or_else(|| "Voice note".to_string())
            }
            EventKind::VoiceCall { duration_sec } => {
                format!("Voice call{}", format_duration_suffix(*duration_sec))
            }
            EventKind::VideoCall { duration_sec } => {
                format!("Video call{}", format_duration_suffix(*duration_sec))
            }
            EventKind::Note { text, title } => title.clone().unwrap_or_else(|| text.clone()),
        }
    }
}

fn format_duration_suffix(duration_sec: Option<u32>) -> String {
    duration_sec.map_or_else(String::new, |secs| {
        format!(" · {}", format_duration(secs))
    })
}

/// Format seconds as `m:ss`
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_kinds() {
        let event: TimelineEvent = serde_json::from_str(
            r#"{
                "id": "evt-1",
                "userUniqueId": "u-ava",
                "timestamp": "2026-09-14T18:30:00Z",
                "sender": "them",
                "type": "voice_call",
                "durationSec": 754
            }"#,
        )
        .unwrap();

        assert_eq!(event.sender, Sender::Them);
        assert_eq!(
            event.kind,
            EventKind::VoiceCall {
                duration_sec: Some(754)
            }
        );
        assert_eq!(event.summary(), "Voice call · 12:34");
        assert!(!event.kind.is_media());
    }

    #[test]
    fn note_requires_text() {
        let result = serde_json::from_str::<TimelineEvent>(
            r#"{
                "id": "evt-2",
                "userUniqueId": "u-ava",
                "timestamp": "2026-09-14T18:30:00Z",
                "sender": "me",
                "type": "note"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn kind_tag_round_trips_through_json() {
        let kind = EventKind::VideoCall { duration_sec: None };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "video_call");
        assert_eq!(kind.as_str(), "video_call");
    }
}
