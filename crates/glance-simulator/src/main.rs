//! Desktop digital mirror for the Study-Space Glance display.
//!
//! Renders the shared core in an SDL2 window via
//! `embedded-graphics-simulator` and stays in lockstep with the physical
//! display through the same MQTT feed. With no broker configured
//! (`GLANCE_BROKER_HOST` unset) it runs on a synthetic feed instead.
//!
//! # Key bindings
//!
//! | Key          | Action                      |
//! |--------------|-----------------------------|
//! | Left / Right | Rotate room selection       |
//! | Space/Return | Toggle display mode         |
//! | Q / Escape   | Quit                        |
//!
//! Remote input (the `encoder` control topic) and selection broadcasts
//! (`current_room`) are applied exactly like local input, so the mirror
//! follows the physical knob.

mod feed;
mod mqtt;

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info, warn};

use glance_core::engine::{Engine, EngineUpdate};
use glance_core::navigation::InputEvent;
use glance_core::protocol::{CurrentRoomPayload, current_room_topic};
use glance_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, draw_frame};

use feed::SyntheticFeed;
use mqtt::{BrokerConfig, MqttLink};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between synthetic feed batches in offline mode.
const FEED_INTERVAL: Duration = Duration::from_secs(1);

/// Map an SDL keycode to a core input event.
fn keycode_to_input(keycode: Keycode) -> Option<InputEvent> {
    match keycode {
        Keycode::Right => Some(InputEvent::RotateRight),
        Keycode::Left => Some(InputEvent::RotateLeft),
        Keycode::Space | Keycode::Return => Some(InputEvent::Press),
        _ => None,
    }
}

fn main() {
    env_logger::init();
    info!("Starting glance mirror");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Left/Right=room  Space=mode  Q=Quit");

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Glance Mirror", &output_settings);

    // Transport: broker when configured, synthetic feed otherwise
    let link = BrokerConfig::from_env().map(MqttLink::connect);
    let mut synthetic = if link.is_none() {
        info!("no broker configured, running on the synthetic feed");
        Some(SyntheticFeed::new())
    } else {
        None
    };

    let mut engine = Engine::with_default_rooms();

    // The SDL window is lazily initialized on the first `update()` call,
    // so draw once before polling events.
    let frame = engine.frame();
    let _ = draw_frame(&mut display, &frame);
    window.update(&display);

    let mut last_feed = Instant::now();
    let mut pending_frame = None;

    'running: loop {
        let frame_start = Instant::now();
        let now = embassy_time::Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(input) = keycode_to_input(keycode) {
                        let update = engine.handle_input(input, now);
                        announce(&link, &update);
                        if update.frame.is_some() {
                            pending_frame = update.frame;
                        }
                    }
                }
                _ => {}
            }
        }

        // --- Transport messages -------------------------------------------
        if let Some(link) = &link {
            while let Some((topic, payload)) = link.try_recv() {
                match engine.handle_message(&topic, &payload, now) {
                    Ok(update) => {
                        if update.frame.is_some() {
                            pending_frame = update.frame;
                        }
                    }
                    Err(e) => warn!("discarding message on {topic}: {e}"),
                }
            }
        }

        // --- Synthetic feed (offline mode) --------------------------------
        if let Some(feed) = synthetic.as_mut()
            && last_feed.elapsed() >= FEED_INTERVAL
        {
            for message in feed.next_batch(last_feed.elapsed().as_secs_f64()) {
                match engine.handle_message(&message.topic, &message.payload, now) {
                    Ok(update) => {
                        if update.frame.is_some() {
                            pending_frame = update.frame;
                        }
                    }
                    Err(e) => debug!("synthetic feed produced a bad record: {e}"),
                }
            }
            last_feed = Instant::now();
        }

        // --- Animation tick -----------------------------------------------
        if let Some(frame) = engine.poll(now) {
            pending_frame = Some(frame);
        }

        // --- Render -------------------------------------------------------
        if let Some(frame) = pending_frame.take() {
            if let Err(e) = draw_frame(&mut display, &frame) {
                log::error!("draw error: {e:?}");
            }
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("mirror exiting");
}

/// Broadcast a local room change so the physical display follows.
fn announce(link: &Option<MqttLink>, update: &EngineUpdate) {
    let (Some(link), Some(room)) = (link, &update.announce) else {
        return;
    };
    let payload = CurrentRoomPayload {
        room: room.as_str(),
    }
    .to_vec();
    link.publish(current_room_topic().as_str(), payload);
}
