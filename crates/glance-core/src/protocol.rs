//! Wire protocol: topic layout and payload schemas.
//!
//! All payloads are small human-readable JSON records. Decoding is
//! schema-driven with explicit optional fields so the sparse-update rules
//! are visible in the types rather than buried in string scanning.
//!
//! Topic layout, after a common prefix:
//!
//! | topic                      | payload                              |
//! |----------------------------|--------------------------------------|
//! | `{prefix}/{room}/timeline` | booking slots for the day window     |
//! | `{prefix}/{room}/status`   | comfort magnitudes + mood tag        |
//! | `{prefix}/encoder`         | remote input events for the mirror   |
//! | `{prefix}/current_room`    | selection broadcast between displays |

use core::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::config::TOPIC_PREFIX;
use crate::navigation::{InputEvent, RotationDirection};

/// Longest topic string either front end builds or matches.
pub type TopicString = heapless::String<96>;

/// Classified inbound topic. Room identifiers borrow from the topic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic<'a> {
    Timeline { room: &'a str },
    Status { room: &'a str },
    Encoder,
    CurrentRoom,
    Unknown,
}

impl<'a> Topic<'a> {
    /// Classify a topic by its trailing segments.
    ///
    /// Only the tail matters, so the broker-side prefix can be remapped
    /// without touching the core.
    pub fn parse(topic: &'a str) -> Self {
        let mut tail = topic.rsplit('/');
        match tail.next().unwrap_or("") {
            "timeline" => Self::Timeline {
                room: tail.next().unwrap_or(""),
            },
            "status" => Self::Status {
                room: tail.next().unwrap_or(""),
            },
            "encoder" => Self::Encoder,
            "current_room" => Self::CurrentRoom,
            _ => Self::Unknown,
        }
    }
}

/// `{prefix}/#`: the full feed, for the front end without physical
/// input. It needs the remote `encoder` events on top of the data topics.
pub fn subscription_filter() -> TopicString {
    let mut topic = TopicString::new();
    let _ = write!(topic, "{TOPIC_PREFIX}/#");
    topic
}

/// Topic filters for the front end that owns the physical encoder: the
/// data topics and the selection broadcast, but not `encoder`; it
/// publishes those itself and must not re-apply its own echo.
pub fn feed_subscription_filters() -> [TopicString; 3] {
    let mut timeline = TopicString::new();
    let _ = write!(timeline, "{TOPIC_PREFIX}/+/timeline");
    let mut status = TopicString::new();
    let _ = write!(status, "{TOPIC_PREFIX}/+/status");
    [timeline, status, current_room_topic()]
}

/// Topic the physical front end publishes input events on.
pub fn encoder_topic() -> TopicString {
    let mut topic = TopicString::new();
    let _ = write!(topic, "{TOPIC_PREFIX}/encoder");
    topic
}

/// Topic carrying the room-selection broadcast.
pub fn current_room_topic() -> TopicString {
    let mut topic = TopicString::new();
    let _ = write!(topic, "{TOPIC_PREFIX}/current_room");
    topic
}

/// One data message from the feed.
///
/// A single payload may carry timeline content, comfort content, or both;
/// the reducer applies each independently. Absent fields decode as `None`
/// and leave prior state untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct DataPayload<'a> {
    /// Explicit room identifier; falls back to the topic segment.
    #[serde(default)]
    pub room: Option<&'a str>,
    /// Per-slot tokens, `"booked"` or anything else meaning free.
    #[serde(default)]
    pub timeline: Option<alloc::vec::Vec<&'a str>>,
    #[serde(default)]
    pub occupancy: Option<f32>,
    #[serde(default)]
    pub noise: Option<f32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub light: Option<f32>,
    /// Mood tag; the feed publishes it as `state`.
    #[serde(default, rename = "state")]
    pub mood: Option<&'a str>,
}

impl<'a> DataPayload<'a> {
    pub fn from_slice(payload: &'a [u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Whether any comfort field (magnitude or mood) is present.
    pub fn has_comfort_content(&self) -> bool {
        self.occupancy.is_some()
            || self.noise.is_some()
            || self.temperature.is_some()
            || self.light.is_some()
            || self.mood.is_some()
    }
}

/// Remote input event for the front end without physical controls.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct EncoderPayload<'a> {
    pub encoder: &'a str,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<&'a str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressed: Option<bool>,
}

impl<'a> EncoderPayload<'a> {
    pub fn from_slice(payload: &'a [u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Encode for publishing on the encoder topic.
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        // the record is a flat struct of plain fields; encoding cannot fail
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn rotation(direction: RotationDirection) -> Self {
        Self {
            encoder: "rotation",
            direction: Some(match direction {
                RotationDirection::Clockwise => "cw",
                RotationDirection::CounterClockwise => "ccw",
            }),
            pressed: None,
        }
    }

    pub fn press() -> Self {
        Self {
            encoder: "button",
            direction: None,
            pressed: Some(true),
        }
    }

    /// Decode into a core input event, if the record is well-formed.
    pub fn input_event(&self) -> Option<InputEvent> {
        match self.encoder {
            "rotation" => match self.direction {
                Some("cw") => Some(InputEvent::RotateRight),
                Some("ccw") => Some(InputEvent::RotateLeft),
                _ => None,
            },
            "button" => match self.pressed {
                Some(true) => Some(InputEvent::Press),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Selection broadcast keeping the two front ends on the same room.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct CurrentRoomPayload<'a> {
    pub room: &'a str,
}

impl<'a> CurrentRoomPayload<'a> {
    pub fn from_slice(payload: &'a [u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Encode for publishing on the selection topic.
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_classify_by_trailing_segments() {
        assert_eq!(
            Topic::parse("studyspace/24380/timeline"),
            Topic::Timeline { room: "24380" }
        );
        assert_eq!(
            Topic::parse("some/other/prefix/24547/status"),
            Topic::Status { room: "24547" }
        );
        assert_eq!(Topic::parse("studyspace/encoder"), Topic::Encoder);
        assert_eq!(Topic::parse("studyspace/current_room"), Topic::CurrentRoom);
        assert_eq!(Topic::parse("studyspace/24380/bookings"), Topic::Unknown);
        assert_eq!(Topic::parse(""), Topic::Unknown);
    }

    #[test]
    fn data_payload_decodes_combined_content() {
        let raw = br#"{
            "room": "24380",
            "timeline": ["booked", "free"],
            "occupancy": 62.5,
            "state": "busy",
            "timestamp": "2025-12-05T10:30:00"
        }"#;
        let payload = DataPayload::from_slice(raw).unwrap();
        assert_eq!(payload.room, Some("24380"));
        assert_eq!(payload.timeline.as_deref(), Some(&["booked", "free"][..]));
        assert_eq!(payload.occupancy, Some(62.5));
        assert_eq!(payload.mood, Some("busy"));
        assert!(payload.has_comfort_content());
        assert!(payload.noise.is_none());
    }

    #[test]
    fn timeline_only_payload_has_no_comfort_content() {
        let payload = DataPayload::from_slice(br#"{"timeline":["free"]}"#).unwrap();
        assert!(!payload.has_comfort_content());
        assert!(payload.room.is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(DataPayload::from_slice(b"{not json").is_err());
        assert!(DataPayload::from_slice(br#"{"occupancy":"high"}"#).is_err());
    }

    #[test]
    fn encoder_payload_round_trips_to_input_events() {
        let cw = EncoderPayload::from_slice(br#"{"encoder":"rotation","direction":"cw"}"#).unwrap();
        assert_eq!(cw.input_event(), Some(InputEvent::RotateRight));

        let ccw =
            EncoderPayload::from_slice(br#"{"encoder":"rotation","direction":"ccw"}"#).unwrap();
        assert_eq!(ccw.input_event(), Some(InputEvent::RotateLeft));

        let press = EncoderPayload::from_slice(br#"{"encoder":"button","pressed":true}"#).unwrap();
        assert_eq!(press.input_event(), Some(InputEvent::Press));

        let released =
            EncoderPayload::from_slice(br#"{"encoder":"button","pressed":false}"#).unwrap();
        assert_eq!(released.input_event(), None);

        let odd = EncoderPayload::from_slice(br#"{"encoder":"slider"}"#).unwrap();
        assert_eq!(odd.input_event(), None);
    }

    #[test]
    fn encoder_payload_serializes_without_null_fields() {
        let json = serde_json::to_string(&EncoderPayload::press()).unwrap();
        assert_eq!(json, r#"{"encoder":"button","pressed":true}"#);

        let json =
            serde_json::to_string(&EncoderPayload::rotation(RotationDirection::Clockwise)).unwrap();
        assert_eq!(json, r#"{"encoder":"rotation","direction":"cw"}"#);
    }

    #[test]
    fn topic_builders_share_the_prefix() {
        assert_eq!(subscription_filter().as_str(), "studyspace/#");
        assert_eq!(encoder_topic().as_str(), "studyspace/encoder");
        assert_eq!(current_room_topic().as_str(), "studyspace/current_room");
    }

    #[test]
    fn physical_front_end_filters_exclude_the_encoder_topic() {
        let filters = feed_subscription_filters();
        assert_eq!(filters[0].as_str(), "studyspace/+/timeline");
        assert_eq!(filters[1].as_str(), "studyspace/+/status");
        assert_eq!(filters[2].as_str(), "studyspace/current_room");
        assert!(filters.iter().all(|f| !f.as_str().contains("encoder")));
    }
}
