//! Compile-time network credentials.
//!
//! Values come from the `.env` file (or the process environment) through
//! `build.rs`, so no credentials live in the source tree.

pub const WIFI_SSID: &str = env!("WIFI_SSID");
pub const WIFI_PASSWORD: &str = env!("WIFI_PASSWORD");

pub const BROKER_HOST: &str = env!("GLANCE_BROKER_HOST");
pub const BROKER_PORT: &str = env!("GLANCE_BROKER_PORT");

pub const MQTT_USERNAME: &str = env!("GLANCE_MQTT_USERNAME");
pub const MQTT_PASSWORD: &str = env!("GLANCE_MQTT_PASSWORD");

/// Broker port as a number, falling back to the MQTT default.
pub fn broker_port() -> u16 {
    BROKER_PORT.parse().unwrap_or(1883)
}
