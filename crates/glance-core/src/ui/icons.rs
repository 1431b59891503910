//! Mood iconography, drawn from primitives so no asset storage is needed.
//!
//! Icons are sized for a nominal 28 px box around the given center point.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle, Triangle};

use crate::render::MoodIcon;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_ICON, COLOR_ICON_ALERT};

/// Draw the icon for a mood tag centered at `center`.
pub fn draw_icon<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    icon: MoodIcon,
    center: Point,
) -> Result<(), D::Error> {
    let stroke = PrimitiveStyle::with_stroke(COLOR_ICON, 2);
    let fill = PrimitiveStyle::with_fill(COLOR_ICON);
    let at = |dx: i32, dy: i32| Point::new(center.x + dx, center.y + dy);

    match icon {
        MoodIcon::Sparkle => {
            Line::new(at(0, -12), at(0, 12)).into_styled(stroke).draw(display)?;
            Line::new(at(-12, 0), at(12, 0)).into_styled(stroke).draw(display)?;
            Line::new(at(-7, -7), at(7, 7)).into_styled(stroke).draw(display)?;
            Line::new(at(-7, 7), at(7, -7)).into_styled(stroke).draw(display)?;
            Circle::with_center(center, 6).into_styled(fill).draw(display)?;
        }
        MoodIcon::Check => {
            Line::new(at(-10, 1), at(-3, 8)).into_styled(stroke).draw(display)?;
            Line::new(at(-3, 8), at(10, -8)).into_styled(stroke).draw(display)?;
        }
        MoodIcon::Wave => {
            Line::new(at(-10, -6), at(10, -6)).into_styled(stroke).draw(display)?;
            Line::new(at(-8, 0), at(12, 0)).into_styled(stroke).draw(display)?;
            Line::new(at(-10, 6), at(10, 6)).into_styled(stroke).draw(display)?;
        }
        MoodIcon::Dash => {
            Rectangle::new(at(-10, -2), Size::new(20, 4))
                .into_styled(fill)
                .draw(display)?;
        }
        MoodIcon::People => {
            Circle::with_center(at(-9, 2), 9).into_styled(fill).draw(display)?;
            Circle::with_center(at(0, -3), 9).into_styled(fill).draw(display)?;
            Circle::with_center(at(9, 2), 9).into_styled(fill).draw(display)?;
        }
        MoodIcon::Speaker => {
            Triangle::new(at(-11, 0), at(-3, -6), at(-3, 6))
                .into_styled(fill)
                .draw(display)?;
            Arc::with_center(at(-2, 0), 14, Angle::from_degrees(-55.0), Angle::from_degrees(110.0))
                .into_styled(stroke)
                .draw(display)?;
            Arc::with_center(at(-2, 0), 22, Angle::from_degrees(-55.0), Angle::from_degrees(110.0))
                .into_styled(stroke)
                .draw(display)?;
        }
        MoodIcon::Sun => {
            Circle::with_center(center, 11).into_styled(fill).draw(display)?;
            for (dx, dy) in [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1)]
            {
                Line::new(at(dx * 8, dy * 8), at(dx * 12, dy * 12))
                    .into_styled(stroke)
                    .draw(display)?;
            }
        }
        MoodIcon::Snow => {
            Line::new(at(0, -11), at(0, 11)).into_styled(stroke).draw(display)?;
            Line::new(at(-10, -6), at(10, 6)).into_styled(stroke).draw(display)?;
            Line::new(at(-10, 6), at(10, -6)).into_styled(stroke).draw(display)?;
        }
        MoodIcon::Moon => {
            Circle::with_center(center, 22).into_styled(fill).draw(display)?;
            Circle::with_center(at(7, -4), 20)
                .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
                .draw(display)?;
        }
        MoodIcon::Alert => {
            Triangle::new(at(0, -12), at(-12, 10), at(12, 10))
                .into_styled(PrimitiveStyle::with_stroke(COLOR_ICON_ALERT, 2))
                .draw(display)?;
            Rectangle::new(at(-1, -6), Size::new(3, 8))
                .into_styled(PrimitiveStyle::with_fill(COLOR_ICON_ALERT))
                .draw(display)?;
            Rectangle::new(at(-1, 5), Size::new(3, 3))
                .into_styled(PrimitiveStyle::with_fill(COLOR_ICON_ALERT))
                .draw(display)?;
        }
    }
    Ok(())
}
