//! Static registry of monitored rooms.
//!
//! The registry is fixed at startup and never mutated afterwards. Rooms are
//! kept sorted by identifier so lookup is a binary search.

use core::str::FromStr;

use heapless::{String, Vec};
use log::warn;

use crate::config::MAX_ROOMS;

/// Room identifiers as published by the booking feed (e.g. `"24380"`).
pub type RoomId = String<12>;

/// Immutable descriptive metadata for one monitored room.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: &'static str,
    /// Seats in the room.
    pub capacity: u8,
    /// Free-form facility text shown on the detail panel.
    pub facilities: &'static str,
}

impl Room {
    pub fn new(id: &str, name: &'static str, capacity: u8, facilities: &'static str) -> Self {
        Self {
            // Feed identifiers are short numeric strings; longer ones are
            // truncated rather than rejected since they could never match
            // an inbound message anyway.
            id: RoomId::from_str(&id[..id.len().min(12)]).unwrap_or_default(),
            name,
            capacity,
            facilities,
        }
    }
}

/// Fixed list of monitored rooms, sorted by identifier.
pub struct RoomRegistry {
    rooms: Vec<Room, MAX_ROOMS>,
}

impl RoomRegistry {
    /// Build a registry from an unordered room list. Rooms beyond
    /// [`MAX_ROOMS`] are dropped with a warning.
    pub fn new(rooms: &[Room]) -> Self {
        let mut sorted: Vec<Room, MAX_ROOMS> = Vec::new();
        for room in rooms {
            if sorted.push(room.clone()).is_err() {
                warn!("room registry full, dropping {}", room.id);
            }
        }
        sorted.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        Self { rooms: sorted }
    }

    /// The five study pods published by the upstream booking feed.
    pub fn default_rooms() -> Self {
        Self::new(&[
            Room::new("24380", "Pod A", 4, "Whiteboard, HDMI screen"),
            Room::new("24381", "Pod B", 6, "Whiteboard, conference mic"),
            Room::new("24382", "Pod C", 4, "Standing desk"),
            Room::new("24546", "Group Room 1", 8, "Projector, whiteboard"),
            Room::new("24547", "Group Room 2", 8, "Dual screens"),
        ])
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    /// Index of the room with the given identifier, if registered.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.rooms
            .binary_search_by(|room| room.id.as_str().cmp(id))
            .ok()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_rooms() {
        let registry = RoomRegistry::default_rooms();
        assert_eq!(registry.len(), 5);

        let idx = registry.index_of("24381").expect("24381 is registered");
        assert_eq!(registry.get(idx).unwrap().name, "Pod B");
    }

    #[test]
    fn lookup_rejects_unknown_rooms() {
        let registry = RoomRegistry::default_rooms();
        assert!(registry.index_of("99999").is_none());
        assert!(!registry.contains(""));
    }

    #[test]
    fn registry_is_sorted_regardless_of_input_order() {
        let registry = RoomRegistry::new(&[
            Room::new("3", "C", 2, ""),
            Room::new("1", "A", 2, ""),
            Room::new("2", "B", 2, ""),
        ]);
        let ids: alloc::vec::Vec<&str> = registry.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(registry.index_of("1"), Some(0));
        assert_eq!(registry.index_of("3"), Some(2));
    }
}
