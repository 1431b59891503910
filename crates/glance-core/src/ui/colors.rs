//! Color definitions for both displays.
//!
//! RGB565 format (5 bits red, 6 bits green, 5 bits blue). To convert from
//! 8-bit RGB: R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Screen background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Header bar background - slightly lighter than the screen
pub const COLOR_HEADER_BACKGROUND: Rgb565 = Rgb565::new(30 >> 3, 38 >> 2, 40 >> 3);

/// Primary text - near white
pub const COLOR_TEXT: Rgb565 = Rgb565::new(235 >> 3, 238 >> 2, 240 >> 3);

/// Secondary text - medium gray
pub const COLOR_TEXT_DIM: Rgb565 = Rgb565::new(140 >> 3, 150 >> 2, 155 >> 3);

// ============================================================================
// Ring Indicators
// ============================================================================

/// Unlit indicator socket outline
pub const COLOR_RING_SOCKET: Rgb565 = Rgb565::new(48 >> 3, 58 >> 2, 62 >> 3);

/// Free booking slot - green
pub const COLOR_FREE: Rgb565 = Rgb565::new(86 >> 3, 190 >> 2, 120 >> 3);

/// Booked slot - warm red
pub const COLOR_BOOKED: Rgb565 = Rgb565::new(214 >> 3, 84 >> 2, 76 >> 3);

// ============================================================================
// Attribute Colors (condition-mode reveal)
// ============================================================================

/// Occupancy reveal - steel blue
pub const COLOR_OCCUPANCY_ATTR: Rgb565 = Rgb565::new(86 >> 3, 150 >> 2, 220 >> 3);

/// Noise reveal - orange
pub const COLOR_NOISE_ATTR: Rgb565 = Rgb565::new(230 >> 3, 150 >> 2, 60 >> 3);

/// Temperature reveal - coral red
pub const COLOR_TEMPERATURE_ATTR: Rgb565 = Rgb565::new(226 >> 3, 100 >> 2, 90 >> 3);

/// Light reveal - amber yellow
pub const COLOR_LIGHT_ATTR: Rgb565 = Rgb565::new(236 >> 3, 200 >> 2, 80 >> 3);

// ============================================================================
// Icons
// ============================================================================

/// Default icon stroke/fill
pub const COLOR_ICON: Rgb565 = Rgb565::new(210 >> 3, 216 >> 2, 220 >> 3);

/// Alert icon (overloaded rooms)
pub const COLOR_ICON_ALERT: Rgb565 = Rgb565::new(240 >> 3, 120 >> 2, 60 >> 3);
