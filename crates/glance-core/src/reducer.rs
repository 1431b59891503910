//! Message reducer: one inbound (topic, payload) pair to one store update.
//!
//! The reducer is the only writer of the [`RoomStateStore`]. It never
//! touches the selection, and it never partially applies a record: the
//! whole payload is decoded before any field is written.

use log::debug;
use thiserror_no_std::Error;

use crate::config::BOOKED_TOKEN;
use crate::metrics::{ComfortAttribute, MoodTag};
use crate::protocol::{DataPayload, Topic};
use crate::rooms::RoomRegistry;
use crate::store::{RoomStateStore, SlotState};

/// Failures that discard a single message. None of these is fatal; the
/// caller logs and keeps reducing.
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),
    /// Payload names no room and the topic carries no room segment either.
    #[error("message resolves to no room")]
    MissingRoom,
}

/// Which parts of a room's state a message changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomUpdate {
    pub room_index: usize,
    pub timeline_changed: bool,
    pub comfort_changed: bool,
}

/// Apply one data message to the store.
///
/// Returns `Ok(None)` when the message resolved to a room outside the
/// registry; unprovisioned rooms are expected steady-state noise, not an
/// error. Room resolution prefers the payload's explicit field over the
/// topic segment.
pub fn reduce(
    registry: &RoomRegistry,
    store: &mut RoomStateStore,
    topic: Topic<'_>,
    payload: &[u8],
) -> Result<Option<RoomUpdate>, ReduceError> {
    let record = DataPayload::from_slice(payload)?;

    let topic_room = match topic {
        Topic::Timeline { room } | Topic::Status { room } => Some(room),
        _ => None,
    };
    let room_id = record
        .room
        .or(topic_room)
        .filter(|id| !id.is_empty())
        .ok_or(ReduceError::MissingRoom)?;

    let Some(room_index) = registry.index_of(room_id) else {
        debug!("message for unprovisioned room {room_id}, ignoring");
        return Ok(None);
    };
    let Some(state) = store.get_mut(room_index) else {
        // store is sized from the registry, so this cannot happen
        return Ok(None);
    };

    let mut update = RoomUpdate {
        room_index,
        timeline_changed: false,
        comfort_changed: false,
    };

    if let Some(tokens) = &record.timeline {
        state.timeline.replace(tokens.iter().map(|token| {
            if *token == BOOKED_TOKEN {
                SlotState::Booked
            } else {
                SlotState::Free
            }
        }));
        update.timeline_changed = true;
    }

    // A status message counts as comfort data even when every field is
    // absent: magnitudes default to zero from the first such message on.
    if record.has_comfort_content() || matches!(topic, Topic::Status { .. }) {
        if let Some(value) = record.occupancy {
            state.comfort.set_value(ComfortAttribute::Occupancy, value);
        }
        if let Some(value) = record.noise {
            state.comfort.set_value(ComfortAttribute::Noise, value);
        }
        if let Some(value) = record.temperature {
            state.comfort.set_value(ComfortAttribute::Temperature, value);
        }
        if let Some(value) = record.light {
            state.comfort.set_value(ComfortAttribute::Light, value);
        }
        if let Some(tag) = record.mood {
            state.comfort.set_mood(MoodTag::from_tag(tag));
        }
        state.comfort.mark_known();
        update.comfort_changed = true;
    }

    if update.timeline_changed || update.comfort_changed {
        Ok(Some(update))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (RoomRegistry, RoomStateStore) {
        let registry = RoomRegistry::default_rooms();
        let store = RoomStateStore::new(registry.len());
        (registry, store)
    }

    fn status_topic() -> Topic<'static> {
        Topic::Status { room: "24380" }
    }

    #[test]
    fn timeline_message_replaces_slots_and_sets_flag() {
        let (registry, mut store) = fixture();
        let payload = br#"{"room":"24380","timeline":["booked","free","free"]}"#;

        let update = reduce(
            &registry,
            &mut store,
            Topic::Timeline { room: "24380" },
            payload,
        )
        .unwrap()
        .expect("known room");
        assert!(update.timeline_changed);
        assert!(!update.comfort_changed);

        let state = store.get(update.room_index).unwrap();
        assert!(state.timeline.has_data());
        assert_eq!(state.timeline.len(), 3);
        assert_eq!(state.timeline.slot(0), Some(SlotState::Booked));
        assert_eq!(state.timeline.slot(1), Some(SlotState::Free));
        assert!(!state.comfort.has_data());
    }

    #[test]
    fn only_the_exact_booked_token_means_booked() {
        let (registry, mut store) = fixture();
        let payload = br#"{"room":"24380","timeline":["BOOKED","Booked","booked","busy"]}"#;

        reduce(
            &registry,
            &mut store,
            Topic::Timeline { room: "24380" },
            payload,
        )
        .unwrap();

        let timeline = &store.get(0).unwrap().timeline;
        assert_eq!(timeline.slot(0), Some(SlotState::Free));
        assert_eq!(timeline.slot(1), Some(SlotState::Free));
        assert_eq!(timeline.slot(2), Some(SlotState::Booked));
        assert_eq!(timeline.slot(3), Some(SlotState::Free));
    }

    #[test]
    fn oversized_timeline_is_truncated_silently() {
        let (registry, mut store) = fixture();
        let mut json = alloc::string::String::from(r#"{"room":"24380","timeline":["#);
        for i in 0..30 {
            if i > 0 {
                json.push(',');
            }
            json.push_str(r#""free""#);
        }
        json.push_str("]}");

        reduce(
            &registry,
            &mut store,
            Topic::Timeline { room: "24380" },
            json.as_bytes(),
        )
        .unwrap();
        assert_eq!(store.get(0).unwrap().timeline.len(), 24);
    }

    #[test]
    fn status_message_applies_sparse_fields_only() {
        let (registry, mut store) = fixture();

        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","occupancy":70,"noise":55,"temperature":22,"light":400,"state":"busy"}"#,
        )
        .unwrap();

        // second message updates occupancy only
        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","occupancy":20}"#,
        )
        .unwrap();

        let comfort = &store.get(0).unwrap().comfort;
        assert_eq!(comfort.value(ComfortAttribute::Occupancy), 20.0);
        assert_eq!(comfort.value(ComfortAttribute::Noise), 55.0);
        assert_eq!(comfort.value(ComfortAttribute::Temperature), 22.0);
        assert_eq!(comfort.value(ComfortAttribute::Light), 400.0);
        assert_eq!(comfort.mood(), MoodTag::Busy);
    }

    #[test]
    fn displayed_mood_is_from_the_latest_message_with_a_mood_field() {
        let (registry, mut store) = fixture();

        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","state":"calm"}"#,
        )
        .unwrap();
        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","noise":60}"#,
        )
        .unwrap();
        assert_eq!(store.get(0).unwrap().comfort.mood(), MoodTag::Calm);

        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","state":"noisy"}"#,
        )
        .unwrap();
        assert_eq!(store.get(0).unwrap().comfort.mood(), MoodTag::Noisy);
    }

    #[test]
    fn out_of_range_magnitudes_clamp() {
        let (registry, mut store) = fixture();
        reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","occupancy":180,"temperature":-40}"#,
        )
        .unwrap();

        let comfort = &store.get(0).unwrap().comfort;
        assert_eq!(comfort.value(ComfortAttribute::Occupancy), 100.0);
        assert_eq!(comfort.value(ComfortAttribute::Temperature), 17.0);
    }

    #[test]
    fn unknown_room_mutates_nothing_and_does_not_crash() {
        let (registry, mut store) = fixture();
        let outcome = reduce(
            &registry,
            &mut store,
            Topic::Status { room: "99999" },
            br#"{"room":"99999","occupancy":50,"timeline":["booked"]}"#,
        )
        .unwrap();
        assert!(outcome.is_none());

        for i in 0..store.len() {
            let state = store.get(i).unwrap();
            assert!(!state.timeline.has_data());
            assert!(!state.comfort.has_data());
        }
    }

    #[test]
    fn malformed_payload_is_discarded_whole() {
        let (registry, mut store) = fixture();
        let result = reduce(
            &registry,
            &mut store,
            status_topic(),
            br#"{"room":"24380","occupancy":"#,
        );
        assert!(matches!(result, Err(ReduceError::Parse(_))));
        assert!(!store.get(0).unwrap().comfort.has_data());
    }

    #[test]
    fn payload_room_field_wins_over_topic_segment() {
        let (registry, mut store) = fixture();
        reduce(
            &registry,
            &mut store,
            Topic::Status { room: "24380" },
            br#"{"room":"24547","occupancy":33}"#,
        )
        .unwrap();

        let explicit = registry.index_of("24547").unwrap();
        let topical = registry.index_of("24380").unwrap();
        assert!(store.get(explicit).unwrap().comfort.has_data());
        assert!(!store.get(topical).unwrap().comfort.has_data());
    }

    #[test]
    fn topic_segment_is_the_fallback_room() {
        let (registry, mut store) = fixture();
        reduce(
            &registry,
            &mut store,
            Topic::Status { room: "24381" },
            br#"{"noise":42}"#,
        )
        .unwrap();
        let idx = registry.index_of("24381").unwrap();
        assert!(store.get(idx).unwrap().comfort.has_data());
    }

    #[test]
    fn roomless_message_is_an_error() {
        let (registry, mut store) = fixture();
        let result = reduce(&registry, &mut store, Topic::Unknown, br#"{"noise":42}"#);
        assert!(matches!(result, Err(ReduceError::MissingRoom)));
    }

    #[test]
    fn combined_payload_applies_both_kinds_independently() {
        let (registry, mut store) = fixture();
        let update = reduce(
            &registry,
            &mut store,
            Topic::Timeline { room: "24380" },
            br#"{"room":"24380","timeline":["booked"],"occupancy":10}"#,
        )
        .unwrap()
        .unwrap();

        assert!(update.timeline_changed);
        assert!(update.comfort_changed);
        let state = store.get(0).unwrap();
        assert!(state.timeline.has_data());
        assert!(state.comfort.has_data());
    }

    #[test]
    fn empty_status_message_still_marks_comfort_known() {
        let (registry, mut store) = fixture();
        reduce(&registry, &mut store, status_topic(), br#"{"room":"24380"}"#).unwrap();

        let comfort = &store.get(0).unwrap().comfort;
        assert!(comfort.has_data());
        assert_eq!(comfort.value(ComfortAttribute::Occupancy), 0.0);
        assert_eq!(comfort.mood(), MoodTag::Neutral);
    }
}
