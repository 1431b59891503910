//! Shared drawing of render frames.
//!
//! Both front ends hand a [`RenderFrame`](crate::render::RenderFrame) to
//! [`draw_frame`] against their own `DrawTarget`; everything about layout
//! and color lives here so the physical display and the mirror cannot
//! drift apart.

pub mod colors;
mod icons;
mod panel;
mod ring;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::render::RenderFrame;

pub use icons::draw_icon;
pub use ring::{draw_ring, indicator_center};

/// Logical display size shared by the TFT and the simulator window.
pub const DISPLAY_WIDTH_PX: u16 = 320;
pub const DISPLAY_HEIGHT_PX: u16 = 240;

/// Height of the header bar.
pub const HEADER_HEIGHT_PX: u16 = 24;

/// Center of the indicator ring; the detail panel sits inside it.
pub const RING_CENTER: Point = Point::new(160, 132);

/// Ring radius, measured to the indicator centers.
pub const RING_RADIUS: u32 = 92;

/// Draw a complete frame: background, header, ring, detail panel.
pub fn draw_frame<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    frame: &RenderFrame,
) -> Result<(), D::Error> {
    display.clear(colors::COLOR_BACKGROUND)?;
    panel::draw_header(display, &frame.header)?;
    ring::draw_ring(display, RING_CENTER, RING_RADIUS, &frame.ring)?;
    panel::draw_body(display, &frame.body)?;
    Ok(())
}
