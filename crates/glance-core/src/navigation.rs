//! Navigation state machine: room selection, display mode, input handling.
//!
//! The navigator owns the process-wide [`SelectionState`] and reacts to
//! discrete input events. It is the only writer of the selection besides
//! the animation scheduler's own tick; inbound data messages never touch
//! it.

use embassy_time::Instant;
use log::debug;

use crate::config::{PRESS_DEBOUNCE, RING_CAPACITY};
use crate::metrics::ComfortAttribute;

/// The two display modes the button toggles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Booking slots for the selected room on the ring.
    Timeline,
    /// Cycling comfort attributes with progressive reveal.
    Condition,
}

impl DisplayMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Timeline => Self::Condition,
            Self::Condition => Self::Timeline,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Timeline => "Timeline",
            Self::Condition => "Comfort",
        }
    }
}

/// Discrete input events, from the physical encoder or the control topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    RotateLeft,
    RotateRight,
    Press,
}

/// Rotation sense of the encoder knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Resolve direction from the two quadrature lines at a detected edge
    /// of the clock line: when the lines disagree the knob moved clockwise.
    pub fn from_quadrature(clk: bool, dt: bool) -> Self {
        if clk != dt {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

impl From<RotationDirection> for InputEvent {
    fn from(direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self::RotateRight,
            RotationDirection::CounterClockwise => Self::RotateLeft,
        }
    }
}

/// Process-wide selection: room, mode and condition-mode substate.
#[derive(Debug, Clone, Copy)]
pub struct SelectionState {
    pub room_index: usize,
    pub mode: DisplayMode,
    /// Attribute currently shown in condition mode.
    pub attribute: ComfortAttribute,
    /// Indicators currently lit, `0..=RING_CAPACITY`.
    pub progress: u8,
}

impl SelectionState {
    pub const fn new() -> Self {
        Self {
            room_index: 0,
            mode: DisplayMode::Timeline,
            attribute: ComfortAttribute::Occupancy,
            progress: 0,
        }
    }

    /// Reset the condition-mode substate to attribute 0 / progress 0.
    pub fn reset_condition(&mut self) {
        self.attribute = ComfortAttribute::Occupancy;
        self.progress = 0;
    }

    pub fn advance_attribute(&mut self) {
        self.attribute = self.attribute.next();
        self.progress = 0;
    }

    pub fn reveal_one(&mut self) {
        if (self.progress as usize) < RING_CAPACITY {
            self.progress += 1;
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// What an input event did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Event was absorbed (debounce window, empty registry).
    Ignored,
    RoomChanged,
    ModeChanged,
}

/// State machine driving the selection from input events.
pub struct Navigator {
    selection: SelectionState,
    room_count: usize,
    last_press: Option<Instant>,
}

impl Navigator {
    pub fn new(room_count: usize) -> Self {
        Self {
            selection: SelectionState::new(),
            room_count,
            last_press: None,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Mutable access for the animation scheduler's tick.
    pub(crate) fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Apply one debounced input event.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> NavOutcome {
        match event {
            InputEvent::RotateRight => self.rotate(1),
            InputEvent::RotateLeft => self.rotate(-1),
            InputEvent::Press => self.press(now),
        }
    }

    fn rotate(&mut self, delta: isize) -> NavOutcome {
        if self.room_count == 0 {
            return NavOutcome::Ignored;
        }
        let count = self.room_count as isize;
        let next = (self.selection.room_index as isize + delta).rem_euclid(count) as usize;
        self.selection.room_index = next;
        // A new room never inherits the previous room's animation progress.
        self.selection.reset_condition();
        debug!("selected room index {next}");
        NavOutcome::RoomChanged
    }

    fn press(&mut self, now: Instant) -> NavOutcome {
        if let Some(last) = self.last_press
            && now < last + PRESS_DEBOUNCE
        {
            debug!("press ignored inside debounce window");
            return NavOutcome::Ignored;
        }
        self.last_press = Some(now);
        self.selection.mode = self.selection.mode.toggled();
        self.selection.reset_condition();
        debug!("mode toggled to {}", self.selection.mode.label());
        NavOutcome::ModeChanged
    }

    /// Adopt a remote selection broadcast. Returns whether it changed
    /// anything; the substate resets exactly as for a local rotation.
    pub fn sync_room(&mut self, room_index: usize) -> bool {
        if room_index >= self.room_count || room_index == self.selection.room_index {
            return false;
        }
        self.selection.room_index = room_index;
        self.selection.reset_condition();
        true
    }
}
