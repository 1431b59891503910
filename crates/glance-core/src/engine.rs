//! The owned context object tying the core together.
//!
//! An [`Engine`] holds the registry, the store, the navigator and the
//! animation clocks, and exposes one entry point per event source:
//! inbound transport messages, input events, and scheduler polls. Each
//! call processes its event to completion. The core is strictly
//! single-threaded cooperative logic, so no locking is needed as long as
//! the caller serializes the three sources (which both front ends do).

use embassy_time::Instant;
use log::{debug, warn};

use crate::navigation::{DisplayMode, InputEvent, NavOutcome, Navigator, SelectionState};
use crate::protocol::{CurrentRoomPayload, EncoderPayload, Topic};
use crate::reducer::{self, ReduceError};
use crate::render::{self, RenderFrame};
use crate::rooms::{RoomId, RoomRegistry};
use crate::scheduler::ConditionAnimator;
use crate::store::RoomStateStore;

/// What an engine call asks the front end to do.
#[derive(Debug, Default)]
pub struct EngineUpdate {
    /// New frame to draw, when the visible state changed.
    pub frame: Option<RenderFrame>,
    /// Room id to broadcast on the selection topic. Set only for local
    /// input, never while applying a remote broadcast, so two displays
    /// cannot ping-pong.
    pub announce: Option<RoomId>,
}

impl EngineUpdate {
    fn none() -> Self {
        Self::default()
    }
}

/// Shared core of both front ends.
pub struct Engine {
    registry: RoomRegistry,
    store: RoomStateStore,
    navigator: Navigator,
    animator: ConditionAnimator,
}

impl Engine {
    pub fn new(registry: RoomRegistry) -> Self {
        let store = RoomStateStore::new(registry.len());
        let navigator = Navigator::new(registry.len());
        Self {
            registry,
            store,
            navigator,
            animator: ConditionAnimator::new(),
        }
    }

    pub fn with_default_rooms() -> Self {
        Self::new(RoomRegistry::default_rooms())
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn store(&self) -> &RoomStateStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        self.navigator.selection()
    }

    /// Frame for the current state, for the initial draw.
    pub fn frame(&self) -> RenderFrame {
        render::compose(&self.registry, &self.store, self.navigator.selection())
    }

    /// Process one inbound transport message.
    ///
    /// Data topics go through the reducer; control topics decode to input
    /// events (`encoder`) or selection sync (`current_room`). A parse
    /// failure discards the single message.
    pub fn handle_message(
        &mut self,
        topic: &str,
        payload: &[u8],
        now: Instant,
    ) -> Result<EngineUpdate, ReduceError> {
        match Topic::parse(topic) {
            Topic::Encoder => {
                let record = EncoderPayload::from_slice(payload)?;
                match record.input_event() {
                    Some(event) => {
                        let mut update = self.apply_input(event, now);
                        // remote input is already shared; re-announcing
                        // would echo it back forever
                        update.announce = None;
                        Ok(update)
                    }
                    None => {
                        warn!("unrecognized encoder record on {topic}");
                        Ok(EngineUpdate::none())
                    }
                }
            }
            Topic::CurrentRoom => {
                let record = CurrentRoomPayload::from_slice(payload)?;
                let Some(index) = self.registry.index_of(record.room) else {
                    debug!("selection broadcast for unknown room {}", record.room);
                    return Ok(EngineUpdate::none());
                };
                if !self.navigator.sync_room(index) {
                    return Ok(EngineUpdate::none());
                }
                if self.selection().mode == DisplayMode::Condition {
                    self.animator.arm(now);
                }
                Ok(EngineUpdate {
                    frame: Some(self.frame()),
                    announce: None,
                })
            }
            data_topic => {
                let Some(update) = reducer::reduce(&self.registry, &mut self.store, data_topic, payload)?
                else {
                    return Ok(EngineUpdate::none());
                };
                let selection = self.navigator.selection();
                let visible = update.room_index == selection.room_index
                    && match selection.mode {
                        DisplayMode::Timeline => update.timeline_changed,
                        DisplayMode::Condition => update.comfort_changed,
                    };
                if visible {
                    Ok(EngineUpdate {
                        frame: Some(self.frame()),
                        announce: None,
                    })
                } else {
                    Ok(EngineUpdate::none())
                }
            }
        }
    }

    /// Process one local input event (physical encoder or keyboard).
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> EngineUpdate {
        self.apply_input(event, now)
    }

    fn apply_input(&mut self, event: InputEvent, now: Instant) -> EngineUpdate {
        match self.navigator.handle_event(event, now) {
            NavOutcome::Ignored => EngineUpdate::none(),
            NavOutcome::RoomChanged => {
                if self.selection().mode == DisplayMode::Condition {
                    self.animator.arm(now);
                }
                let announce = self
                    .registry
                    .get(self.selection().room_index)
                    .map(|room| room.id.clone());
                EngineUpdate {
                    frame: Some(self.frame()),
                    announce,
                }
            }
            NavOutcome::ModeChanged => {
                match self.selection().mode {
                    DisplayMode::Condition => self.animator.arm(now),
                    DisplayMode::Timeline => self.animator.disarm(),
                }
                EngineUpdate {
                    frame: Some(self.frame()),
                    announce: None,
                }
            }
        }
    }

    /// Advance the condition-mode animation. Returns a frame when the
    /// ring visibly changed.
    pub fn poll(&mut self, now: Instant) -> Option<RenderFrame> {
        if self.navigator.selection().mode != DisplayMode::Condition {
            return None;
        }
        let room_index = self.navigator.selection().room_index;
        let Some(state) = self.store.get(room_index) else {
            return None;
        };
        let changed = self
            .animator
            .poll(now, self.navigator.selection_mut(), &state.comfort);
        changed.then(|| self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ComfortAttribute;
    use crate::render::{BodyContent, RingSlot};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn engine() -> Engine {
        Engine::with_default_rooms()
    }

    #[test]
    fn data_for_the_selected_room_yields_a_frame() {
        let mut engine = engine();
        let update = engine
            .handle_message(
                "studyspace/24380/timeline",
                br#"{"room":"24380","timeline":["booked","free"]}"#,
                at(0),
            )
            .unwrap();

        let frame = update.frame.expect("selected room changed visibly");
        assert_eq!(frame.ring[0], RingSlot::Booked);
        assert!(update.announce.is_none());
    }

    #[test]
    fn data_for_other_rooms_does_not_redraw() {
        let mut engine = engine();
        let update = engine
            .handle_message(
                "studyspace/24547/timeline",
                br#"{"timeline":["booked"]}"#,
                at(0),
            )
            .unwrap();
        assert!(update.frame.is_none());
    }

    #[test]
    fn comfort_data_is_invisible_in_timeline_mode() {
        let mut engine = engine();
        let update = engine
            .handle_message("studyspace/24380/status", br#"{"occupancy":50}"#, at(0))
            .unwrap();
        assert!(update.frame.is_none(), "timeline mode shows no comfort");

        engine.handle_input(InputEvent::Press, at(0));
        let update = engine
            .handle_message("studyspace/24380/status", br#"{"occupancy":60}"#, at(100))
            .unwrap();
        assert!(update.frame.is_some(), "condition mode shows comfort");
    }

    #[test]
    fn rotation_announces_the_new_room() {
        let mut engine = engine();
        let update = engine.handle_input(InputEvent::RotateRight, at(0));
        assert_eq!(update.announce.as_deref(), Some("24381"));
        assert!(update.frame.is_some());
    }

    #[test]
    fn remote_encoder_events_navigate_without_announcing() {
        let mut engine = engine();
        let update = engine
            .handle_message(
                "studyspace/encoder",
                br#"{"encoder":"rotation","direction":"cw"}"#,
                at(0),
            )
            .unwrap();
        assert_eq!(engine.selection().room_index, 1);
        assert!(update.frame.is_some());
        assert!(update.announce.is_none());
    }

    #[test]
    fn selection_broadcast_syncs_without_echo() {
        let mut engine = engine();
        let update = engine
            .handle_message("studyspace/current_room", br#"{"room":"24546"}"#, at(0))
            .unwrap();
        assert_eq!(
            engine.selection().room_index,
            engine.registry().index_of("24546").unwrap()
        );
        assert!(update.frame.is_some());
        assert!(update.announce.is_none());

        // repeat broadcast is a no-op
        let update = engine
            .handle_message("studyspace/current_room", br#"{"room":"24546"}"#, at(10))
            .unwrap();
        assert!(update.frame.is_none());
    }

    #[test]
    fn selection_broadcast_for_unknown_room_is_ignored() {
        let mut engine = engine();
        let update = engine
            .handle_message("studyspace/current_room", br#"{"room":"77777"}"#, at(0))
            .unwrap();
        assert!(update.frame.is_none());
        assert_eq!(engine.selection().room_index, 0);
    }

    #[test]
    fn press_enters_condition_mode_with_placeholder() {
        let mut engine = engine();
        let update = engine.handle_input(InputEvent::Press, at(0));
        let frame = update.frame.unwrap();
        assert_eq!(frame.body, BodyContent::NoComfortData);
        assert_eq!(engine.selection().mode, DisplayMode::Condition);
    }

    #[test]
    fn poll_reveals_indicators_over_time() {
        let mut engine = engine();
        engine
            .handle_message("studyspace/24380/status", br#"{"occupancy":100}"#, at(0))
            .unwrap();
        engine.handle_input(InputEvent::Press, at(0));

        assert!(engine.poll(at(60)).is_none());

        let frame = engine.poll(at(120)).expect("first reveal step");
        assert_eq!(frame.ring[0], RingSlot::Lit(ComfortAttribute::Occupancy));
        assert_eq!(frame.ring[1], RingSlot::Off);

        let frame = engine.poll(at(240)).expect("second reveal step");
        assert_eq!(frame.ring[1], RingSlot::Lit(ComfortAttribute::Occupancy));
    }

    #[test]
    fn poll_is_idle_outside_condition_mode() {
        let mut engine = engine();
        engine
            .handle_message("studyspace/24380/status", br#"{"occupancy":100}"#, at(0))
            .unwrap();
        assert!(engine.poll(at(10_000)).is_none());
    }

    #[test]
    fn room_switch_cancels_animation_immediately() {
        let mut engine = engine();
        engine
            .handle_message("studyspace/24380/status", br#"{"occupancy":100}"#, at(0))
            .unwrap();
        engine.handle_input(InputEvent::Press, at(0));
        engine.poll(at(120));
        engine.poll(at(240));
        assert_eq!(engine.selection().progress, 2);

        engine.handle_input(InputEvent::RotateRight, at(300));
        assert_eq!(engine.selection().progress, 0);
        assert_eq!(engine.selection().attribute, ComfortAttribute::Occupancy);
    }

    #[test]
    fn malformed_control_payloads_are_reported_not_applied() {
        let mut engine = engine();
        assert!(
            engine
                .handle_message("studyspace/encoder", b"not json", at(0))
                .is_err()
        );
        assert!(
            engine
                .handle_message("studyspace/current_room", b"{", at(0))
                .is_err()
        );
        assert_eq!(engine.selection().room_index, 0);
    }

    #[test]
    fn two_engines_converge_on_the_same_stream() {
        let mut physical = engine();
        let mut mirror = engine();

        let stream: &[(&str, &[u8])] = &[
            (
                "studyspace/24381/status",
                br#"{"room":"24381","occupancy":80,"state":"busy"}"#,
            ),
            (
                "studyspace/24380/timeline",
                br#"{"room":"24380","timeline":["booked","free","booked"]}"#,
            ),
            // duplicate delivery
            (
                "studyspace/24380/timeline",
                br#"{"room":"24380","timeline":["booked","free","booked"]}"#,
            ),
            ("studyspace/current_room", br#"{"room":"24381"}"#),
            (
                "studyspace/encoder",
                br#"{"encoder":"button","pressed":true}"#,
            ),
            // stale-looking update after the navigation, most recent wins
            (
                "studyspace/24381/status",
                br#"{"room":"24381","noise":70}"#,
            ),
        ];

        for (i, (topic, payload)) in stream.iter().enumerate() {
            let now = at(i as u64 * 500);
            physical.handle_message(topic, payload, now).unwrap();
            mirror.handle_message(topic, payload, now).unwrap();
        }

        assert_eq!(physical.selection().room_index, mirror.selection().room_index);
        assert_eq!(physical.selection().mode, mirror.selection().mode);
        assert_eq!(physical.frame(), mirror.frame());

        // and the animation advances identically from the same clock
        let a = physical.poll(at(10_000));
        let b = mirror.poll(at(10_000));
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_topics_with_roomed_payloads_still_reduce() {
        let mut engine = engine();
        let update = engine
            .handle_message(
                "studyspace/misc",
                br#"{"room":"24380","timeline":["booked"]}"#,
                at(0),
            )
            .unwrap();
        assert!(update.frame.is_some());
    }
}
