//! Two-clock animation scheduler for condition mode.
//!
//! The attribute clock rotates through the four comfort attributes every
//! [`ATTRIBUTE_INTERVAL`]; the reveal clock lights one more indicator every
//! [`REVEAL_INTERVAL`] until the attribute's target count is reached. Both
//! clocks are plain deadlines polled by the caller; the scheduler never
//! sleeps and never reads a wall clock of its own.

use embassy_time::Instant;
use log::trace;

use crate::config::{ATTRIBUTE_INTERVAL, REVEAL_INTERVAL};
use crate::navigation::SelectionState;
use crate::store::ComfortReading;

/// Deadline state for the condition-mode animation.
///
/// The target indicator count is not latched here: it is recomputed from
/// the live [`ComfortReading`] on every poll, so a comfort message that
/// lands mid-cycle takes effect without waiting for the next attribute
/// tick. Progress is clamped whenever the target shrinks below it.
pub struct ConditionAnimator {
    next_attribute: Option<Instant>,
    next_reveal: Option<Instant>,
}

impl ConditionAnimator {
    pub const fn new() -> Self {
        Self {
            next_attribute: None,
            next_reveal: None,
        }
    }

    /// Start (or restart) the cycle. Called on every entry into condition
    /// mode and on every room change while in it; animation state never
    /// carries across a room or mode change.
    pub fn arm(&mut self, now: Instant) {
        self.next_attribute = Some(now + ATTRIBUTE_INTERVAL);
        self.next_reveal = Some(now + REVEAL_INTERVAL);
    }

    /// Stop the cycle (leaving condition mode).
    pub fn disarm(&mut self) {
        self.next_attribute = None;
        self.next_reveal = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_attribute.is_some()
    }

    /// Advance the animation to `now`. Returns `true` when the visible
    /// state changed and a redraw is warranted.
    ///
    /// With no comfort data the scheduler is inert: deadlines keep sliding
    /// forward so the cycle starts fresh once data arrives.
    pub fn poll(
        &mut self,
        now: Instant,
        selection: &mut SelectionState,
        reading: &ComfortReading,
    ) -> bool {
        let (Some(attribute_due), Some(reveal_due)) = (self.next_attribute, self.next_reveal)
        else {
            return false;
        };

        if !reading.has_data() {
            self.arm(now);
            return false;
        }

        if now >= attribute_due {
            selection.advance_attribute();
            self.arm(now);
            trace!("attribute clock -> {}", selection.attribute.label());
            return true;
        }

        if now >= reveal_due {
            self.next_reveal = Some(now + REVEAL_INTERVAL);
            let target = selection
                .attribute
                .ring_target(reading.value(selection.attribute));
            if selection.progress > target {
                selection.progress = target;
                return true;
            }
            if selection.progress < target {
                selection.reveal_one();
                return true;
            }
        }

        false
    }
}

impl Default for ConditionAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ComfortAttribute;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn reading_with_occupancy(occupancy: f32) -> ComfortReading {
        let mut reading = ComfortReading::new();
        reading.set_value(ComfortAttribute::Occupancy, occupancy);
        reading
    }

    #[test]
    fn unarmed_animator_does_nothing() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(100.0);
        assert!(!animator.poll(at(10_000), &mut selection, &reading));
        assert_eq!(selection.progress, 0);
    }

    #[test]
    fn reveal_clock_lights_one_indicator_per_tick() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(100.0); // target: full ring

        animator.arm(at(0));
        assert!(!animator.poll(at(60), &mut selection, &reading));

        assert!(animator.poll(at(120), &mut selection, &reading));
        assert_eq!(selection.progress, 1);

        assert!(animator.poll(at(240), &mut selection, &reading));
        assert_eq!(selection.progress, 2);
    }

    #[test]
    fn reveal_clock_idles_at_target() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(0.0); // target: nothing lit

        animator.arm(at(0));
        for ms in (120..2_000).step_by(120) {
            assert!(!animator.poll(at(ms), &mut selection, &reading));
        }
        assert_eq!(selection.progress, 0);
    }

    #[test]
    fn attribute_clock_advances_and_clears_progress() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(100.0);

        animator.arm(at(0));
        let mut now = 0;
        while selection.progress < 5 {
            now += 120;
            animator.poll(at(now), &mut selection, &reading);
        }

        assert!(animator.poll(at(5_000), &mut selection, &reading));
        assert_eq!(selection.attribute, ComfortAttribute::Noise);
        assert_eq!(selection.progress, 0);
    }

    #[test]
    fn attribute_clock_cycles_modulo_four() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(50.0);

        animator.arm(at(0));
        for tick in 1..=4 {
            assert!(animator.poll(at(tick * 5_000 + tick), &mut selection, &reading));
        }
        assert_eq!(selection.attribute, ComfortAttribute::Occupancy);
    }

    #[test]
    fn missing_comfort_data_keeps_scheduler_inert() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = ComfortReading::new();

        animator.arm(at(0));
        assert!(!animator.poll(at(10_000), &mut selection, &reading));
        assert_eq!(selection.progress, 0);
        assert_eq!(selection.attribute, ComfortAttribute::Occupancy);

        // data arriving later starts a fresh cycle from the slid deadlines
        let reading = reading_with_occupancy(100.0);
        assert!(!animator.poll(at(10_060), &mut selection, &reading));
        assert!(animator.poll(at(10_120), &mut selection, &reading));
        assert_eq!(selection.progress, 1);
    }

    #[test]
    fn shrinking_target_clamps_progress() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();

        animator.arm(at(0));
        let high = reading_with_occupancy(100.0);
        for tick in 1..=10u64 {
            animator.poll(at(tick * 120), &mut selection, &high);
        }
        assert_eq!(selection.progress, 10);

        let low = reading_with_occupancy(25.0); // target: 6
        assert!(animator.poll(at(11 * 120), &mut selection, &low));
        assert_eq!(selection.progress, 6);
    }

    #[test]
    fn disarm_stops_the_clocks() {
        let mut animator = ConditionAnimator::new();
        let mut selection = SelectionState::new();
        let reading = reading_with_occupancy(100.0);

        animator.arm(at(0));
        animator.disarm();
        assert!(!animator.is_armed());
        assert!(!animator.poll(at(1_000), &mut selection, &reading));
    }
}
