//! Header bar and detail panel text.
//!
//! The detail panel occupies the area inside the indicator ring, like the
//! small screen the ring surrounds on the physical build.

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::render::{BodyContent, ConditionSummary, MoodIcon, TimelineSummary};
use crate::ui::colors::{COLOR_HEADER_BACKGROUND, COLOR_TEXT, COLOR_TEXT_DIM};
use crate::ui::icons::draw_icon;
use crate::ui::{DISPLAY_WIDTH_PX, HEADER_HEIGHT_PX, RING_CENTER};

type Line = heapless::String<64>;

fn centered<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    y: i32,
    style: MonoTextStyle<'_, Rgb565>,
) -> Result<(), D::Error> {
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, Point::new(RING_CENTER.x, y), style, text_style)
        .draw(display)?;
    Ok(())
}

/// Draw the header bar: mode and room name.
pub fn draw_header<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    header: &str,
) -> Result<(), D::Error> {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, HEADER_HEIGHT_PX as u32),
    )
    .into_styled(PrimitiveStyle::with_fill(COLOR_HEADER_BACKGROUND))
    .draw(display)?;

    Text::with_baseline(
        header,
        Point::new(8, (HEADER_HEIGHT_PX / 2) as i32),
        MonoTextStyle::new(&FONT_10X20, COLOR_TEXT),
        Baseline::Middle,
    )
    .draw(display)?;
    Ok(())
}

/// Draw the detail panel for the current body content.
pub fn draw_body<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    body: &BodyContent,
) -> Result<(), D::Error> {
    match body {
        BodyContent::NoTimelineData => draw_absence(display, "No booking data yet"),
        BodyContent::Timeline(summary) => draw_timeline(display, summary),
        BodyContent::NoComfortData => draw_placeholder(display),
        BodyContent::Condition(summary) => draw_condition(display, summary),
    }
}

fn draw_absence<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    message: &str,
) -> Result<(), D::Error> {
    let large = MonoTextStyle::new(&FONT_10X20, COLOR_TEXT_DIM);
    let small = MonoTextStyle::new(&FONT_6X10, COLOR_TEXT_DIM);
    centered(display, message, RING_CENTER.y - 10, large)?;
    centered(display, "waiting for the feed", RING_CENTER.y + 14, small)?;
    Ok(())
}

fn draw_placeholder<D: DrawTarget<Color = Rgb565>>(display: &mut D) -> Result<(), D::Error> {
    draw_icon(display, MoodIcon::Dash, Point::new(RING_CENTER.x, 100))?;
    let small = MonoTextStyle::new(&FONT_6X10, COLOR_TEXT_DIM);
    centered(display, "no readings yet", RING_CENTER.y + 10, small)?;
    Ok(())
}

fn draw_timeline<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    summary: &TimelineSummary,
) -> Result<(), D::Error> {
    let large = MonoTextStyle::new(&FONT_10X20, COLOR_TEXT);
    let small = MonoTextStyle::new(&FONT_6X10, COLOR_TEXT);
    let dim = MonoTextStyle::new(&FONT_6X10, COLOR_TEXT_DIM);

    let mut line = Line::new();
    let _ = write!(line, "{}/{} booked", summary.booked, summary.total);
    centered(display, &line, 96, large)?;

    line.clear();
    let _ = write!(line, "{}% of the day", summary.percent);
    centered(display, &line, 120, small)?;

    line.clear();
    match summary.next_free {
        Some((hour, minute)) => {
            let _ = write!(line, "next free {hour:02}:{minute:02}");
        }
        None => {
            let _ = write!(line, "fully booked");
        }
    }
    centered(display, &line, 142, small)?;

    line.clear();
    let _ = write!(line, "{} seats", summary.capacity);
    centered(display, &line, 164, small)?;

    if !summary.facilities.is_empty() {
        centered(display, summary.facilities, 180, dim)?;
    }
    Ok(())
}

fn draw_condition<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    summary: &ConditionSummary,
) -> Result<(), D::Error> {
    let large = MonoTextStyle::new(&FONT_10X20, COLOR_TEXT);
    let small = MonoTextStyle::new(&FONT_6X10, COLOR_TEXT_DIM);

    draw_icon(display, summary.icon, Point::new(RING_CENTER.x, 98))?;
    centered(display, summary.mood.label(), 140, large)?;

    let mut line = Line::new();
    let _ = write!(
        line,
        "{} {:.1} {}",
        summary.attribute.label(),
        summary.value,
        summary.attribute.unit()
    );
    centered(display, &line, 168, small)?;
    Ok(())
}
