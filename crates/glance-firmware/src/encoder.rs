//! Rotary encoder input: two quadrature lines plus a push button.
//!
//! Edges are detected here; direction decoding and press debouncing live
//! in the core so the mirror's remote input follows identical rules.

use embassy_futures::select::{Either, select};
use esp_hal::gpio::Input;
use log::debug;

use glance_core::navigation::{InputEvent, RotationDirection};

use crate::channels::INPUT;

/// Owns the three encoder GPIO lines.
pub struct RotaryEncoder<'d> {
    clk: Input<'d>,
    dt: Input<'d>,
    button: Input<'d>,
}

impl<'d> RotaryEncoder<'d> {
    pub fn new(clk: Input<'d>, dt: Input<'d>, button: Input<'d>) -> Self {
        Self { clk, dt, button }
    }

    /// Wait for the next edge and translate it to an input event.
    ///
    /// Rotation: on a falling CLK edge the DT level decides the sense.
    /// Button: the line is pulled up, a falling edge is a press; the core
    /// debounces, so every edge is forwarded.
    pub async fn next_event(&mut self) -> InputEvent {
        match select(
            self.clk.wait_for_falling_edge(),
            self.button.wait_for_falling_edge(),
        )
        .await
        {
            Either::First(()) => {
                let direction =
                    RotationDirection::from_quadrature(self.clk.is_high(), self.dt.is_high());
                debug!("encoder rotation: {direction:?}");
                direction.into()
            }
            Either::Second(()) => {
                debug!("encoder button edge");
                InputEvent::Press
            }
        }
    }
}

/// Forwards encoder events into the core's input channel.
#[embassy_executor::task]
pub async fn encoder_task(mut encoder: RotaryEncoder<'static>) {
    loop {
        let event = encoder.next_event().await;
        INPUT.send(event).await;
    }
}
