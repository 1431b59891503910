#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_futures::select::{Either3, select3};
use embassy_net::StackResources;
use embassy_time::{Duration, Instant, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};
use rtt_target::rprintln;
use static_cell::StaticCell;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, models::ILI9342CRgb565};

use glance_core::engine::{Engine, EngineUpdate};
use glance_core::navigation::{InputEvent, RotationDirection};
use glance_core::protocol::{
    CurrentRoomPayload, EncoderPayload, current_room_topic, encoder_topic,
};
use glance_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, draw_frame};

use glance_firmware::channels::{INBOUND, INPUT, OUTBOUND, RawMessage};
use glance_firmware::encoder::{RotaryEncoder, encoder_task};
use glance_firmware::net::{mqtt_task, net_task, wifi_connection_task};

/// Granularity of the animation poll; a third of the reveal interval.
const POLL_TICK: Duration = Duration::from_millis(40);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    rprintln!("Embassy initialized!");

    let radio_init = esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller");
    let (wifi_controller, interfaces) =
        esp_radio::wifi::new(&radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi controller");

    // embassy-net stack over the station interface, DHCP-configured
    let mut rng = Rng::new(peripherals.RNG);
    let seed = ((rng.random() as u64) << 32) | rng.random() as u64;
    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(net_task(runner)).ok();
    spawner.spawn(wifi_connection_task(wifi_controller)).ok();
    spawner.spawn(mqtt_task(stack)).ok();

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, Config::default())
        .unwrap()
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Create a dummy CS pin (we don't use hardware CS for this display)
    let cs = Output::new(peripherals.GPIO35, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO34, Level::Low, OutputConfig::default());

    // 5. Create a buffer for SPI batching (larger = faster, uses more RAM)
    let mut spi_buffer = [0u8; 64];

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);

    // 7. Build and initialize the display driver
    let mut display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    rprintln!("Display initialized!");

    // Rotary encoder lines, pulled up, switching to ground
    let encoder = RotaryEncoder::new(
        Input::new(peripherals.GPIO1, InputConfig::default().with_pull(Pull::Up)),
        Input::new(peripherals.GPIO2, InputConfig::default().with_pull(Pull::Up)),
        Input::new(peripherals.GPIO3, InputConfig::default().with_pull(Pull::Up)),
    );
    spawner.spawn(encoder_task(encoder)).ok();

    // The core engine: one instance, fed from the channels below, never
    // concurrently. Each event is processed to completion.
    let mut engine = Engine::with_default_rooms();
    let frame = engine.frame();
    if let Err(e) = draw_frame(&mut display, &frame) {
        error!("initial draw failed: {e:?}");
    }
    info!("Glance display running");

    loop {
        match select3(INBOUND.receive(), INPUT.receive(), Timer::after(POLL_TICK)).await {
            Either3::First(message) => {
                match engine.handle_message(message.topic.as_str(), &message.payload, Instant::now())
                {
                    Ok(update) => apply_update(&mut display, update),
                    Err(e) => warn!("discarding message on {}: {e}", message.topic),
                }
            }
            Either3::Second(event) => {
                share_input(event);
                let update = engine.handle_input(event, Instant::now());
                apply_update(&mut display, update);
            }
            Either3::Third(()) => {
                if let Some(frame) = engine.poll(Instant::now())
                    && let Err(e) = draw_frame(&mut display, &frame)
                {
                    error!("draw failed: {e:?}");
                }
            }
        }
    }
}

/// Draw the new frame and queue the selection broadcast, if any.
fn apply_update<D>(display: &mut D, update: EngineUpdate)
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    if let Some(frame) = update.frame
        && let Err(e) = draw_frame(display, &frame)
    {
        error!("draw failed: {e:?}");
    }
    if let Some(room) = update.announce {
        let payload = CurrentRoomPayload {
            room: room.as_str(),
        }
        .to_vec();
        let message = RawMessage::new(current_room_topic().as_str(), &payload);
        if OUTBOUND.try_send(message).is_err() {
            warn!("outbound queue full, dropping selection broadcast");
        }
    }
}

/// Mirror a local input event onto the encoder control topic.
fn share_input(event: InputEvent) {
    let record = match event {
        InputEvent::RotateRight => EncoderPayload::rotation(RotationDirection::Clockwise),
        InputEvent::RotateLeft => EncoderPayload::rotation(RotationDirection::CounterClockwise),
        InputEvent::Press => EncoderPayload::press(),
    };
    let payload = record.to_vec();
    let message = RawMessage::new(encoder_topic().as_str(), &payload);
    if OUTBOUND.try_send(message).is_err() {
        warn!("outbound queue full, dropping input event");
    }
}
