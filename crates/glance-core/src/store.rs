//! Per-room mutable state: availability timeline and comfort reading.
//!
//! Every record starts "unknown" and is only ever overwritten in place by
//! the reducer. A room that has never received a message stays in its
//! unknown state, never conflated with "all free" or "all zeros".

use heapless::Vec;

use crate::config::{DAY_START_HOUR, MAX_ROOMS, RING_CAPACITY, SLOT_MINUTES};
use crate::metrics::{ComfortAttribute, MoodTag};

/// State of one 30-minute booking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Booked,
}

/// Ordered booking slots for one room's monitored day window.
#[derive(Debug, Default)]
pub struct AvailabilityTimeline {
    slots: Vec<SlotState, RING_CAPACITY>,
    has_data: bool,
}

impl AvailabilityTimeline {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            has_data: false,
        }
    }

    /// Whether any timeline message has ever been applied to this room.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).copied()
    }

    /// Replace the whole timeline from an iterator of slot states.
    ///
    /// Full replace, never a merge: slot count is part of the data. Input
    /// beyond the ring capacity is truncated silently.
    pub fn replace<I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = SlotState>,
    {
        self.slots.clear();
        for state in slots.into_iter().take(RING_CAPACITY) {
            // capacity is guaranteed by the take() above
            let _ = self.slots.push(state);
        }
        self.has_data = true;
    }

    pub fn booked_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| **s == SlotState::Booked)
            .count()
    }

    /// Booked share of the published window, rounded to whole percent.
    pub fn booked_percent(&self) -> u8 {
        if self.slots.is_empty() {
            return 0;
        }
        ((self.booked_count() * 100 + self.slots.len() / 2) / self.slots.len()) as u8
    }

    /// Index of the first free slot, if any slot is free.
    pub fn next_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| *s == SlotState::Free)
    }

    /// Wall-clock `(hour, minute)` at which the given slot starts.
    pub fn slot_start(index: usize) -> (u8, u8) {
        let minutes = index as u32 * SLOT_MINUTES as u32;
        let hour = DAY_START_HOUR as u32 + minutes / 60;
        ((hour % 24) as u8, (minutes % 60) as u8)
    }
}

/// Latest known comfort reading for one room.
///
/// Updates are sparse: a message overwrites exactly the fields it carries.
/// Magnitudes start at zero so the first sparse message leaves unspecified
/// fields at zero, per the feed contract.
#[derive(Debug, Default)]
pub struct ComfortReading {
    occupancy: f32,
    noise: f32,
    temperature: f32,
    light: f32,
    mood: MoodTag,
    has_data: bool,
}

impl ComfortReading {
    pub const fn new() -> Self {
        Self {
            occupancy: 0.0,
            noise: 0.0,
            temperature: 0.0,
            light: 0.0,
            mood: MoodTag::Neutral,
            has_data: false,
        }
    }

    /// Whether any comfort message has ever been applied to this room.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn mood(&self) -> MoodTag {
        self.mood
    }

    /// Current magnitude for one attribute.
    pub fn value(&self, attribute: ComfortAttribute) -> f32 {
        match attribute {
            ComfortAttribute::Occupancy => self.occupancy,
            ComfortAttribute::Noise => self.noise,
            ComfortAttribute::Temperature => self.temperature,
            ComfortAttribute::Light => self.light,
        }
    }

    /// Overwrite one magnitude, clamped to the attribute's valid range.
    pub fn set_value(&mut self, attribute: ComfortAttribute, value: f32) {
        let clamped = attribute.clamp(value);
        match attribute {
            ComfortAttribute::Occupancy => self.occupancy = clamped,
            ComfortAttribute::Noise => self.noise = clamped,
            ComfortAttribute::Temperature => self.temperature = clamped,
            ComfortAttribute::Light => self.light = clamped,
        }
        self.has_data = true;
    }

    pub fn set_mood(&mut self, mood: MoodTag) {
        self.mood = mood;
        self.has_data = true;
    }

    /// Mark the reading as known without touching any field.
    ///
    /// Receiving a comfort message at all counts as data, even one whose
    /// fields were all absent.
    pub fn mark_known(&mut self) {
        self.has_data = true;
    }
}

/// Mutable record for one room: the two data kinds age independently.
#[derive(Debug, Default)]
pub struct RoomState {
    pub timeline: AvailabilityTimeline,
    pub comfort: ComfortReading,
}

/// One [`RoomState`] per registry entry, indexed the same way.
pub struct RoomStateStore {
    states: Vec<RoomState, MAX_ROOMS>,
}

impl RoomStateStore {
    /// Create one empty ("unknown") record per room.
    pub fn new(room_count: usize) -> Self {
        let mut states = Vec::new();
        for _ in 0..room_count.min(MAX_ROOMS) {
            let _ = states.push(RoomState::default());
        }
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoomState> {
        self.states.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RoomState> {
        self.states.get_mut(index)
    }
}
