//! Injects network credentials from a workspace `.env` file as
//! compile-time environment variables (see `wifi_secrets`).

const KEYS: &[(&str, &str)] = &[
    ("WIFI_SSID", ""),
    ("WIFI_PASSWORD", ""),
    ("GLANCE_BROKER_HOST", "localhost"),
    ("GLANCE_BROKER_PORT", "1883"),
    ("GLANCE_MQTT_USERNAME", ""),
    ("GLANCE_MQTT_PASSWORD", ""),
];

fn main() {
    println!("cargo:rerun-if-changed=.env");

    // .env is optional; fall back to process env, then defaults
    let _ = dotenvy::dotenv();

    for (key, default) in KEYS {
        let value = std::env::var(key).unwrap_or_else(|_| (*default).to_string());
        println!("cargo:rustc-env={key}={value}");
        println!("cargo:rerun-if-env-changed={key}");
    }
}
