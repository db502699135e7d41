//! Message types exchanged over the persistent game connection. Every
//! message is a JSON object of the form `{"type": ..., "content": ...}`

use serde::{Deserialize, Serialize};

pub mod game;
pub mod rooms;

pub use game::{AssignMark, GameUpdate, MakeMoveRequest};
pub use rooms::{JoinRoomRequest, MakeRoomRequest, RoomList};

/// Messages sent from the client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum Request {
    /// Take a seat in an existing room
    JoinRoom(JoinRoomRequest),
    /// Play a move in a joined room
    MakeMove(MakeMoveRequest),
    /// Create a new room
    MakeRoom(MakeRoomRequest),
    /// Request the current list of rooms
    ListRooms,
}

/// Messages sent from the server to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum Response {
    /// Mark assigned after successfully joining a room
    AssignMark(AssignMark),
    /// Current state of the game in a room
    UpdateGame(GameUpdate),
    /// Reply to [`Request::ListRooms`]
    Rooms(RoomList),
}
