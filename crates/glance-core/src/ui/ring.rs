//! The 24-position indicator ring.
//!
//! Indicator 0 sits at 12 o'clock; positions advance clockwise, matching
//! the slot order of the availability timeline.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::config::RING_CAPACITY;
use crate::render::RingSlot;
use crate::ui::colors::{COLOR_BOOKED, COLOR_FREE, COLOR_RING_SOCKET};

/// Diameter of one indicator in pixels.
const INDICATOR_DIAMETER: u32 = 13;

/// Unit-circle positions for the 24 indicators, scaled by 1000.
///
/// Entry k is (cos, sin) of `k * 15deg - 90deg`; with screen y growing
/// downward this puts entry 0 at the top and advances clockwise.
const RING_POSITIONS: [(i32, i32); RING_CAPACITY] = [
    (0, -1000),
    (259, -966),
    (500, -866),
    (707, -707),
    (866, -500),
    (966, -259),
    (1000, 0),
    (966, 259),
    (866, 500),
    (707, 707),
    (500, 866),
    (259, 966),
    (0, 1000),
    (-259, 966),
    (-500, 866),
    (-707, 707),
    (-866, 500),
    (-966, 259),
    (-1000, 0),
    (-966, -259),
    (-866, -500),
    (-707, -707),
    (-500, -866),
    (-259, -966),
];

/// Pixel center of indicator `index` on a ring of the given radius.
pub fn indicator_center(ring_center: Point, radius: u32, index: usize) -> Point {
    let (dx, dy) = RING_POSITIONS[index % RING_CAPACITY];
    Point::new(
        ring_center.x + (dx * radius as i32) / 1000,
        ring_center.y + (dy * radius as i32) / 1000,
    )
}

/// Draw all 24 indicators. Unlit positions render as faint sockets so the
/// ring stays legible even when everything is off.
pub fn draw_ring<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    center: Point,
    radius: u32,
    slots: &[RingSlot; RING_CAPACITY],
) -> Result<(), D::Error> {
    for (index, slot) in slots.iter().enumerate() {
        let position = indicator_center(center, radius, index);
        let circle = Circle::with_center(position, INDICATOR_DIAMETER);
        let style = match slot {
            RingSlot::Off => PrimitiveStyle::with_stroke(COLOR_RING_SOCKET, 1),
            RingSlot::Free => PrimitiveStyle::with_fill(COLOR_FREE),
            RingSlot::Booked => PrimitiveStyle::with_fill(COLOR_BOOKED),
            RingSlot::Lit(attribute) => PrimitiveStyle::with_fill(attribute.color()),
        };
        circle.into_styled(style).draw(display)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_zero_is_at_twelve_o_clock() {
        let center = Point::new(160, 130);
        assert_eq!(indicator_center(center, 100, 0), Point::new(160, 30));
    }

    #[test]
    fn indicators_advance_clockwise() {
        let center = Point::new(0, 0);
        // six o'clock is a quarter turn later than three o'clock
        assert_eq!(indicator_center(center, 100, 6), Point::new(100, 0));
        assert_eq!(indicator_center(center, 100, 12), Point::new(0, 100));
        assert_eq!(indicator_center(center, 100, 18), Point::new(-100, 0));
    }

    #[test]
    fn all_positions_stay_on_the_circle() {
        let center = Point::new(0, 0);
        for index in 0..RING_CAPACITY {
            let p = indicator_center(center, 100, index);
            let r2 = p.x * p.x + p.y * p.y;
            assert!((9_800..=10_200).contains(&r2), "index {index}: {r2}");
        }
    }
}
