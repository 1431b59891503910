//! ESP32-S3 firmware-specific modules for Study-Space Glance
//!
//! This crate contains hardware-specific code that cannot compile on
//! desktop targets: GPIO handling for the rotary encoder, ESP32 peripheral
//! initialization, WiFi credential management and the MQTT session. All
//! display and state logic lives in `glance-core`.

#![no_std]

extern crate alloc;

pub mod channels;
pub mod encoder;
pub mod net;
pub mod wifi_secrets;
