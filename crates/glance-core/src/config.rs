//! Compile-time configuration shared by both front ends.

use embassy_time::Duration;

/// Number of discrete indicator positions on the ring, equal to the number
/// of 30-minute slots in the monitored day window.
pub const RING_CAPACITY: usize = 24;

/// Hour of day (local) at which slot 0 of the timeline starts.
pub const DAY_START_HOUR: u8 = 9;

/// Minutes covered by one timeline slot.
pub const SLOT_MINUTES: u8 = 30;

/// Upper bound on registered rooms.
pub const MAX_ROOMS: usize = 8;

/// Common topic prefix for all feed and control topics.
pub const TOPIC_PREFIX: &str = "studyspace";

/// The one slot token that means "booked"; every other token reads as free.
pub const BOOKED_TOKEN: &str = "booked";

/// Interval between attribute rotations in condition mode.
pub const ATTRIBUTE_INTERVAL: Duration = Duration::from_secs(5);

/// Interval between single-indicator reveal steps in condition mode.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(120);

/// Minimum interval between two recognized button presses.
pub const PRESS_DEBOUNCE: Duration = Duration::from_millis(180);
