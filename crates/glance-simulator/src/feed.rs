//! Synthetic feed for broker-less runs.
//!
//! Generates the same JSON records the real publisher sends, so offline
//! runs exercise the full topic/payload/reducer pipeline rather than
//! poking the store directly. Values drift sinusoidally per room so the
//! condition-mode animation has something to show.

use glance_core::config::{RING_CAPACITY, TOPIC_PREFIX};

/// One synthetic transport message.
pub struct FeedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Generates timeline and status records for the default rooms.
pub struct SyntheticFeed {
    elapsed_secs: f64,
    rooms: &'static [&'static str],
}

impl SyntheticFeed {
    pub fn new() -> Self {
        Self {
            elapsed_secs: 0.0,
            rooms: &["24380", "24381", "24382", "24546", "24547"],
        }
    }

    /// Advance the internal clock and emit one update per room.
    pub fn next_batch(&mut self, dt_secs: f64) -> Vec<FeedMessage> {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        let mut messages = Vec::new();
        for (i, room) in self.rooms.iter().enumerate() {
            let phase = i as f64 * 1.3;

            // Occupancy 10-90 %, noise trailing it, temperature and light
            // on slower cycles
            let occupancy = 50.0 + 40.0 * (t / 45.0 + phase).sin();
            let noise = 40.0 + 0.35 * occupancy + 5.0 * (t / 13.0 + phase).cos();
            let temperature = 22.0 + 3.0 * (t / 120.0 + phase).sin();
            let light = 350.0 + 150.0 * (t / 90.0 + phase).cos();
            let mood = classify(occupancy, noise, temperature, light);

            messages.push(FeedMessage {
                topic: format!("{TOPIC_PREFIX}/{room}/status"),
                payload: format!(
                    r#"{{"room":"{room}","occupancy":{occupancy:.1},"noise":{noise:.1},"temperature":{temperature:.1},"light":{light:.1},"state":"{mood}"}}"#
                )
                .into_bytes(),
            });

            messages.push(FeedMessage {
                topic: format!("{TOPIC_PREFIX}/{room}/timeline"),
                payload: timeline_payload(room, t, phase),
            });
        }
        messages
    }
}

/// A slowly shifting block of booked slots.
fn timeline_payload(room: &str, t: f64, phase: f64) -> Vec<u8> {
    let start = ((t / 30.0 + phase * 4.0) as usize) % RING_CAPACITY;
    let booked_len = 4 + ((t / 60.0) as usize % 6);

    let mut json = format!(r#"{{"room":"{room}","timeline":["#);
    for slot in 0..RING_CAPACITY {
        if slot > 0 {
            json.push(',');
        }
        let offset = (slot + RING_CAPACITY - start) % RING_CAPACITY;
        if offset < booked_len {
            json.push_str(r#""booked""#);
        } else {
            json.push_str(r#""free""#);
        }
    }
    json.push_str("]}");
    json.into_bytes()
}

/// Rough port of the upstream publisher's room classification, so moods
/// track the synthetic values plausibly.
fn classify(occupancy: f64, noise: f64, temperature: f64, light: f64) -> &'static str {
    if occupancy >= 90.0 && noise >= 60.0 {
        "overloaded"
    } else if temperature > 27.5 {
        "warm"
    } else if temperature < 18.5 {
        "cold"
    } else if light < 240.0 {
        "dim"
    } else if noise >= 60.0 {
        "noisy"
    } else if (70.0..=90.0).contains(&occupancy) {
        "busy"
    } else if occupancy < 30.0 && noise < 40.0 {
        "perfect"
    } else if occupancy < 50.0 && noise < 45.0 {
        "good"
    } else if occupancy < 60.0 && noise < 44.0 {
        "calm"
    } else {
        "neutral"
    }
}
