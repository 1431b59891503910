//! MQTT transport for the mirror.
//!
//! The connection loop runs on its own thread and drains into a channel;
//! the frame loop stays single-threaded and the core sees one message at
//! a time, exactly like on the firmware.

use std::sync::mpsc;
use std::time::Duration;

use log::{error, info, warn};
use rumqttc::{Client, Event, MqttOptions, Packet, QoS};

use glance_core::protocol::subscription_filter;

/// Broker settings, from `GLANCE_BROKER_*` environment variables.
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl BrokerConfig {
    /// `None` when no broker host is configured; the mirror then runs on
    /// the synthetic feed.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("GLANCE_BROKER_HOST").ok()?;
        let port = std::env::var("GLANCE_BROKER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(1883);
        Some(Self {
            host,
            port,
            username: std::env::var("GLANCE_MQTT_USERNAME").ok(),
            password: std::env::var("GLANCE_MQTT_PASSWORD").ok(),
        })
    }
}

/// Handle to a live broker session.
pub struct MqttLink {
    client: Client,
    rx: mpsc::Receiver<(String, Vec<u8>)>,
}

impl MqttLink {
    /// Connect and subscribe; reconnection is handled by the connection
    /// loop, the core just resumes reducing once messages resume.
    pub fn connect(config: BrokerConfig) -> Self {
        let mut options = MqttOptions::new("glance-mirror", config.host.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(user), Some(pass)) = (config.username, config.password) {
            options.set_credentials(user, pass);
        }

        let (client, mut connection) = Client::new(options, 64);
        let (tx, rx) = mpsc::channel();

        let subscriber = client.clone();
        std::thread::spawn(move || {
            info!("mqtt: connecting to {}:{}", config.host, config.port);
            for event in connection.iter() {
                match event {
                    // subscription re-issued on every ConnAck so a broker
                    // reconnect restores it
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("mqtt: connected");
                        let filter = subscription_filter();
                        if let Err(e) = subscriber.subscribe(filter.as_str(), QoS::AtMostOnce) {
                            error!("mqtt: subscribe failed: {e}");
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        if tx
                            .send((publish.topic.clone(), publish.payload.to_vec()))
                            .is_err()
                        {
                            // frame loop is gone, stop the session
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("mqtt: connection error ({e}), retrying");
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        Self { client, rx }
    }

    /// Messages received since the last drain.
    pub fn try_recv(&self) -> Option<(String, Vec<u8>)> {
        self.rx.try_recv().ok()
    }

    pub fn publish(&self, topic: &str, payload: Vec<u8>) {
        if let Err(e) = self.client.publish(topic, QoS::AtMostOnce, false, payload) {
            warn!("mqtt: publish on {topic} failed: {e}");
        }
    }
}
