use super::{Room, RoomRef, RoomSummary};
use log::info;
use parking_lot::{Mutex, RwLock};
use std::{collections::HashMap, sync::Arc};

/// Registry of all the rooms on the server
#[derive(Default)]
pub struct Rooms {
    /// The map of room names to the actual rooms
    rooms: RwLock<HashMap<String, RoomRef>>,
}

impl Rooms {
    /// Longest room name that will be accepted
    pub const MAX_NAME_LENGTH: usize = 64;

    /// Checks whether the provided name can be used for a room
    pub fn is_valid_name(name: &str) -> bool {
        !name.trim().is_empty() && name.len() <= Self::MAX_NAME_LENGTH
    }

    /// Creates a new room with a fresh board. Creating a room that
    /// already exists leaves the existing room untouched.
    ///
    /// Returns whether a new room was created
    pub fn create(&self, name: &str) -> bool {
        let rooms = &mut *self.rooms.write();
        if rooms.contains_key(name) {
            return false;
        }

        let room = Arc::new(Mutex::new(Room::new(name.to_string())));
        rooms.insert(name.to_string(), room);

        info!("Created room (Name: {name})");
        true
    }

    pub fn get(&self, name: &str) -> Option<RoomRef> {
        self.rooms.read().get(name).cloned()
    }

    /// Obtains the total count of rooms
    pub fn total(&self) -> usize {
        self.rooms.read().len()
    }

    /// Creates a snapshot of the name and size of every room sorted
    /// by room name
    pub fn list(&self) -> Vec<RoomSummary> {
        // Collect the links first so room locks aren't taken while holding the map
        let rooms: Vec<RoomRef> = self.rooms.read().values().cloned().collect();

        let mut summaries: Vec<RoomSummary> =
            rooms.iter().map(|room| room.lock().summary()).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}
