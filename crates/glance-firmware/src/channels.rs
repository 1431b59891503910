//! Static channels wiring the embassy tasks to the core's event loop.
//!
//! Each channel carries one of the core's three event sources; the main
//! loop is the single consumer, so the core processes one event at a time
//! and needs no locking.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::{String, Vec};

use glance_core::navigation::InputEvent;

/// Longest topic the transport forwards.
pub const MAX_TOPIC_LEN: usize = 96;

/// Largest payload the transport forwards. A full 24-slot timeline record
/// is ~350 bytes; this leaves generous headroom.
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// One raw transport message, as received from or destined for the broker.
#[derive(Debug, Default)]
pub struct RawMessage {
    pub topic: String<MAX_TOPIC_LEN>,
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl RawMessage {
    /// Build a message, truncating oversized input. An oversized inbound
    /// payload would fail JSON parsing and be discarded downstream, which
    /// is the behavior we want for garbage anyway.
    pub fn new(topic: &str, payload: &[u8]) -> Self {
        let mut message = Self::default();
        let _ = message.topic.push_str(&topic[..topic.len().min(MAX_TOPIC_LEN)]);
        let _ = message
            .payload
            .extend_from_slice(&payload[..payload.len().min(MAX_PAYLOAD_LEN)]);
        message
    }
}

/// Broker -> core: inbound feed and control messages.
pub static INBOUND: Channel<CriticalSectionRawMutex, RawMessage, 16> = Channel::new();

/// Core -> broker: encoder events and selection broadcasts.
pub static OUTBOUND: Channel<CriticalSectionRawMutex, RawMessage, 8> = Channel::new();

/// Encoder -> core: local input events.
pub static INPUT: Channel<CriticalSectionRawMutex, InputEvent, 8> = Channel::new();
