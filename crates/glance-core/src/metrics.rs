//! Comfort attributes and mood classification for room readings.
//!
//! Each attribute carries its own valid input range; the range drives the
//! linear mapping from a raw reading onto the indicator ring in condition
//! mode. Out-of-range inbound values are clamped, never rejected: comfort
//! values are advisory, not safety-critical.

use embedded_graphics::pixelcolor::Rgb565;

use crate::config::RING_CAPACITY;
use crate::ui::colors::{
    COLOR_LIGHT_ATTR, COLOR_NOISE_ATTR, COLOR_OCCUPANCY_ATTR, COLOR_TEMPERATURE_ATTR,
};

/// The four comfort magnitudes cycled through in condition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComfortAttribute {
    Occupancy,
    Noise,
    Temperature,
    Light,
}

impl ComfortAttribute {
    /// Cycle order of the attribute clock.
    pub const ALL: [Self; 4] = [Self::Occupancy, Self::Noise, Self::Temperature, Self::Light];

    pub const fn index(self) -> usize {
        match self {
            Self::Occupancy => 0,
            Self::Noise => 1,
            Self::Temperature => 2,
            Self::Light => 3,
        }
    }

    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Next attribute in cycle order, wrapping after the last.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Occupancy => "Occupancy",
            Self::Noise => "Noise",
            Self::Temperature => "Temperature",
            Self::Light => "Light",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Occupancy => "%",
            Self::Noise => "dB",
            Self::Temperature => "\u{b0}C",
            Self::Light => "lx",
        }
    }

    /// Valid input range `(min, max)` for this attribute.
    ///
    /// Matches the ranges the upstream feed publishes: occupancy 0–100 %,
    /// noise 30–80 dB, temperature 17–29 °C, light 100–600 lx.
    pub const fn range(self) -> (f32, f32) {
        match self {
            Self::Occupancy => (0.0, 100.0),
            Self::Noise => (30.0, 80.0),
            Self::Temperature => (17.0, 29.0),
            Self::Light => (100.0, 600.0),
        }
    }

    /// Clamp a raw reading into this attribute's valid range.
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        if value.is_nan() {
            return min;
        }
        value.clamp(min, max)
    }

    /// Number of ring indicators a reading maps to, `0..=RING_CAPACITY`.
    ///
    /// Linear over the attribute range, so the range maximum fills the ring.
    pub fn ring_target(self, value: f32) -> u8 {
        let (min, max) = self.range();
        let normalized = (self.clamp(value) - min) / (max - min);
        // round-to-nearest keeps a mid-range reading at half the ring
        (normalized * RING_CAPACITY as f32 + 0.5) as u8
    }

    /// Indicator color used while this attribute's count is revealed.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Occupancy => COLOR_OCCUPANCY_ATTR,
            Self::Noise => COLOR_NOISE_ATTR,
            Self::Temperature => COLOR_TEMPERATURE_ATTR,
            Self::Light => COLOR_LIGHT_ATTR,
        }
    }
}

/// Closed-set categorical label summarizing a room's comfort state.
///
/// `Neutral` is the explicit default for an absent or unrecognized tag, so
/// forward-compatible payloads degrade gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodTag {
    Perfect,
    Good,
    Calm,
    #[default]
    Neutral,
    Busy,
    Noisy,
    Warm,
    Cold,
    Dim,
    Overloaded,
}

impl MoodTag {
    /// Parse a wire tag. Anything outside the closed set reads as `Neutral`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "perfect" => Self::Perfect,
            "good" => Self::Good,
            "calm" => Self::Calm,
            "neutral" => Self::Neutral,
            "busy" => Self::Busy,
            "noisy" => Self::Noisy,
            "warm" => Self::Warm,
            "cold" => Self::Cold,
            "dim" => Self::Dim,
            "overloaded" => Self::Overloaded,
            _ => Self::Neutral,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Good => "good",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Busy => "busy",
            Self::Noisy => "noisy",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Dim => "dim",
            Self::Overloaded => "overloaded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_cycle_wraps_after_light() {
        assert_eq!(ComfortAttribute::Occupancy.next(), ComfortAttribute::Noise);
        assert_eq!(ComfortAttribute::Light.next(), ComfortAttribute::Occupancy);
    }

    #[test]
    fn full_scale_occupancy_fills_the_ring() {
        assert_eq!(ComfortAttribute::Occupancy.ring_target(100.0), 24);
        assert_eq!(ComfortAttribute::Occupancy.ring_target(0.0), 0);
        assert_eq!(ComfortAttribute::Occupancy.ring_target(50.0), 12);
    }

    #[test]
    fn out_of_range_values_clamp_instead_of_overflowing() {
        assert_eq!(ComfortAttribute::Occupancy.ring_target(250.0), 24);
        assert_eq!(ComfortAttribute::Noise.ring_target(10.0), 0);
        assert_eq!(ComfortAttribute::Temperature.clamp(35.0), 29.0);
        assert_eq!(ComfortAttribute::Light.clamp(-5.0), 100.0);
    }

    #[test]
    fn noise_floor_maps_to_empty_ring() {
        // noise range starts at 30, so a 30 dB room shows nothing lit
        assert_eq!(ComfortAttribute::Noise.ring_target(30.0), 0);
        assert_eq!(ComfortAttribute::Noise.ring_target(80.0), 24);
    }

    #[test]
    fn unknown_mood_tags_read_as_neutral() {
        assert_eq!(MoodTag::from_tag("mysterious"), MoodTag::Neutral);
        assert_eq!(MoodTag::from_tag(""), MoodTag::Neutral);
        assert_eq!(MoodTag::from_tag("overloaded"), MoodTag::Overloaded);
    }
}
