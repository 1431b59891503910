//! Wi-Fi bring-up and the MQTT session.
//!
//! Three embassy tasks: the Wi-Fi station keep-alive, the embassy-net
//! runner, and the MQTT session pump. The session pump forwards inbound
//! publishes into [`INBOUND`](crate::channels::INBOUND) and drains
//! [`OUTBOUND`](crate::channels::OUTBOUND) between receives; any transport
//! error tears the session down and the outer loop reconnects. The core
//! itself never sees connection state; it just resumes reducing once
//! messages resume arriving.

use core::net::Ipv4Addr;

use embassy_futures::select::{Either, select};
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent, WifiState,
};
use log::{debug, info, warn};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;

use glance_core::protocol::feed_subscription_filters;

use crate::channels::{INBOUND, OUTBOUND, RawMessage};
use crate::wifi_secrets::{
    BROKER_HOST, MQTT_PASSWORD, MQTT_USERNAME, WIFI_PASSWORD, WIFI_SSID, broker_port,
};

const SOCKET_BUFFER: usize = 2048;
const MQTT_BUFFER: usize = 2048;

/// Idle time after which a ping keeps the session alive.
const PING_AFTER: Duration = Duration::from_secs(25);

/// Poll granularity for the outbound drain while receiving.
const DRAIN_TICK: Duration = Duration::from_millis(500);

/// Keeps the Wi-Fi station associated, rejoining after a drop.
#[embassy_executor::task]
pub async fn wifi_connection_task(mut controller: WifiController<'static>) {
    info!("wifi: station task started");
    loop {
        if esp_radio::wifi::wifi_state() == WifiState::StaConnected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("wifi: disconnected, rejoining");
            Timer::after(Duration::from_secs(5)).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let config = Configuration::Client(ClientConfiguration {
                ssid: WIFI_SSID.into(),
                password: WIFI_PASSWORD.into(),
                ..Default::default()
            });
            if let Err(e) = controller.set_configuration(&config) {
                warn!("wifi: configuration rejected: {e:?}");
                Timer::after(Duration::from_secs(5)).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                warn!("wifi: start failed: {e:?}");
                Timer::after(Duration::from_secs(5)).await;
                continue;
            }
        }

        match controller.connect_async().await {
            Ok(()) => info!("wifi: connected to {WIFI_SSID}"),
            Err(e) => {
                warn!("wifi: connect failed: {e:?}");
                Timer::after(Duration::from_secs(5)).await;
            }
        }
    }
}

/// Drives the embassy-net stack.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

/// Resolve the broker host: dotted-quad first, DNS otherwise.
async fn resolve_broker(stack: Stack<'static>) -> Option<IpAddress> {
    if let Ok(addr) = BROKER_HOST.parse::<Ipv4Addr>() {
        return Some(IpAddress::Ipv4(addr));
    }
    match stack.dns_query(BROKER_HOST, DnsQueryType::A).await {
        Ok(addresses) => addresses.first().copied(),
        Err(e) => {
            warn!("mqtt: DNS lookup for {BROKER_HOST} failed: {e:?}");
            None
        }
    }
}

/// MQTT session pump: connect, subscribe, forward both directions.
#[embassy_executor::task]
pub async fn mqtt_task(stack: Stack<'static>) {
    let mut rx_buffer = [0u8; SOCKET_BUFFER];
    let mut tx_buffer = [0u8; SOCKET_BUFFER];
    let mut write_buffer = [0u8; MQTT_BUFFER];
    let mut recv_buffer = [0u8; MQTT_BUFFER];

    loop {
        stack.wait_config_up().await;

        let Some(address) = resolve_broker(stack).await else {
            Timer::after(Duration::from_secs(5)).await;
            continue;
        };

        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(60)));
        info!("mqtt: connecting to {address}:{}", broker_port());
        if let Err(e) = socket.connect((address, broker_port())).await {
            warn!("mqtt: TCP connect failed: {e:?}");
            Timer::after(Duration::from_secs(5)).await;
            continue;
        }

        let mut config: ClientConfig<'_, 5, CountingRng> =
            ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
        config.add_client_id("glance-display");
        if !MQTT_USERNAME.is_empty() {
            config.add_username(MQTT_USERNAME);
            config.add_password(MQTT_PASSWORD);
        }
        config.add_max_subscribe_qos(QualityOfService::QoS0);
        config.max_packet_size = MQTT_BUFFER as u32;

        let mut client = MqttClient::<_, 5, _>::new(
            socket,
            &mut write_buffer,
            MQTT_BUFFER,
            &mut recv_buffer,
            MQTT_BUFFER,
            config,
        );

        if let Err(e) = client.connect_to_broker().await {
            warn!("mqtt: broker handshake failed: {e:?}");
            Timer::after(Duration::from_secs(5)).await;
            continue;
        }
        let mut subscribed = true;
        for filter in feed_subscription_filters() {
            if let Err(e) = client.subscribe_to_topic(filter.as_str()).await {
                warn!("mqtt: subscribe to {filter} failed: {e:?}");
                subscribed = false;
                break;
            }
        }
        if !subscribed {
            Timer::after(Duration::from_secs(5)).await;
            continue;
        }
        info!("mqtt: session up");

        let mut idle = Duration::from_secs(0);
        'session: loop {
            // publish whatever the core queued since the last pass
            while let Ok(outbound) = OUTBOUND.try_receive() {
                if let Err(e) = client
                    .send_message(
                        outbound.topic.as_str(),
                        &outbound.payload,
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                {
                    warn!("mqtt: publish failed: {e:?}");
                    break 'session;
                }
                idle = Duration::from_secs(0);
            }

            match select(client.receive_message(), Timer::after(DRAIN_TICK)).await {
                Either::First(Ok((topic, payload))) => {
                    debug!("mqtt: {} ({} bytes)", topic, payload.len());
                    INBOUND.send(RawMessage::new(topic, payload)).await;
                    idle = Duration::from_secs(0);
                }
                Either::First(Err(e)) => {
                    warn!("mqtt: receive failed: {e:?}");
                    break 'session;
                }
                Either::Second(()) => {
                    idle += DRAIN_TICK;
                    if idle >= PING_AFTER {
                        if let Err(e) = client.send_ping().await {
                            warn!("mqtt: ping failed: {e:?}");
                            break 'session;
                        }
                        idle = Duration::from_secs(0);
                    }
                }
            }
        }

        warn!("mqtt: session lost, reconnecting");
        Timer::after(Duration::from_secs(2)).await;
    }
}
