//! Render dispatcher: selection + room state in, frame description out.
//!
//! [`compose`] is a pure function; it owns no state and performs no I/O.
//! The frame it returns is a semantic description (which ring positions
//! mean what, which icon family to show), leaving actual colors and pixels
//! to the drawing layer, so both front ends render identically from the
//! same frame.

use core::fmt::Write;

use heapless::String;

use crate::config::RING_CAPACITY;
use crate::metrics::{ComfortAttribute, MoodTag};
use crate::navigation::{DisplayMode, SelectionState};
use crate::rooms::RoomRegistry;
use crate::store::{RoomStateStore, SlotState};

/// Semantic state of one ring indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingSlot {
    Off,
    Free,
    Booked,
    /// Lit as part of an attribute's reveal, in that attribute's color.
    Lit(ComfortAttribute),
}

/// Icon family selected from the mood tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodIcon {
    Sparkle,
    Check,
    Wave,
    Dash,
    People,
    Speaker,
    Sun,
    Snow,
    Moon,
    Alert,
}

impl MoodTag {
    /// Iconography for this tag. Total over the closed set; unrecognized
    /// wire tags were already folded to `Neutral` during parsing, so every
    /// tag that can exist here has an icon.
    pub const fn icon(self) -> MoodIcon {
        match self {
            Self::Perfect => MoodIcon::Sparkle,
            Self::Good => MoodIcon::Check,
            Self::Calm => MoodIcon::Wave,
            Self::Neutral => MoodIcon::Dash,
            Self::Busy => MoodIcon::People,
            Self::Noisy => MoodIcon::Speaker,
            Self::Warm => MoodIcon::Sun,
            Self::Cold => MoodIcon::Snow,
            Self::Dim => MoodIcon::Moon,
            Self::Overloaded => MoodIcon::Alert,
        }
    }
}

/// Timeline-mode detail panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSummary {
    pub booked: u8,
    pub total: u8,
    pub percent: u8,
    /// Start `(hour, minute)` of the first free slot, if any.
    pub next_free: Option<(u8, u8)>,
    pub capacity: u8,
    pub facilities: &'static str,
}

/// Condition-mode detail panel content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionSummary {
    pub attribute: ComfortAttribute,
    pub value: f32,
    pub mood: MoodTag,
    pub icon: MoodIcon,
}

/// What the detail panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    /// Timeline mode before any timeline message arrived.
    NoTimelineData,
    Timeline(TimelineSummary),
    /// Condition mode before any comfort message arrived.
    NoComfortData,
    Condition(ConditionSummary),
}

/// Complete description of what both front ends should currently show.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub ring: [RingSlot; RING_CAPACITY],
    pub header: String<48>,
    pub body: BodyContent,
}

/// Compose the frame for the current selection.
pub fn compose(
    registry: &RoomRegistry,
    store: &RoomStateStore,
    selection: &SelectionState,
) -> RenderFrame {
    let mut ring = [RingSlot::Off; RING_CAPACITY];
    let mut header: String<48> = String::new();

    let Some(room) = registry.get(selection.room_index) else {
        let _ = write!(header, "{} | no rooms", selection.mode.label());
        return RenderFrame {
            ring,
            header,
            body: BodyContent::NoTimelineData,
        };
    };
    let _ = write!(header, "{} | {}", selection.mode.label(), room.name);

    let state = store.get(selection.room_index);

    let body = match selection.mode {
        DisplayMode::Timeline => match state {
            Some(state) if state.timeline.has_data() => {
                for (i, slot) in state.timeline.slots().iter().enumerate() {
                    ring[i] = match slot {
                        SlotState::Free => RingSlot::Free,
                        SlotState::Booked => RingSlot::Booked,
                    };
                }
                BodyContent::Timeline(TimelineSummary {
                    booked: state.timeline.booked_count() as u8,
                    total: state.timeline.len() as u8,
                    percent: state.timeline.booked_percent(),
                    next_free: state
                        .timeline
                        .next_free_slot()
                        .map(crate::store::AvailabilityTimeline::slot_start),
                    capacity: room.capacity,
                    facilities: room.facilities,
                })
            }
            // ring stays fully cleared: absence, not zeros
            _ => BodyContent::NoTimelineData,
        },
        DisplayMode::Condition => match state {
            Some(state) if state.comfort.has_data() => {
                let lit = (selection.progress as usize).min(RING_CAPACITY);
                for slot in ring.iter_mut().take(lit) {
                    *slot = RingSlot::Lit(selection.attribute);
                }
                let mood = state.comfort.mood();
                BodyContent::Condition(ConditionSummary {
                    attribute: selection.attribute,
                    value: state.comfort.value(selection.attribute),
                    mood,
                    icon: mood.icon(),
                })
            }
            _ => BodyContent::NoComfortData,
        },
    };

    RenderFrame { ring, header, body }
}
