use self::board::{Board, Mark};
use crate::{
    session::{
        models::{AssignMark, GameUpdate, Response},
        SessionNotifyHandle,
    },
    utils::types::SessionID,
};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub mod board;
pub mod store;

/// Shared reference to a room, the mutex serializes all
/// join, move, leave and broadcast operations for the room
pub type RoomRef = Arc<Mutex<Room>>;

/// A single game session between two players
pub struct Room {
    /// Unique name of the room
    pub name: String,
    /// Board for the game being played
    board: Board,
    /// Whether both players have joined the room
    started: bool,
    /// Players seated in the room
    players: Vec<RoomPlayer>,
}

/// Player seated within a room
pub struct RoomPlayer {
    /// ID of the session the player is connected through
    pub session_id: SessionID,
    /// Mark the player was assigned when joining
    pub mark: Mark,
    /// Handle for pushing messages to the player
    pub notify_handle: SessionNotifyHandle,
}

/// Errors that can occur when joining a room
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// The room has no free seats
    #[error("Room is full")]
    RoomFull,
    /// The session is already seated in this room
    #[error("Session already joined this room")]
    AlreadyJoined,
}

/// Summary of a room used for room listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    /// The name of the room
    pub name: String,
    /// Number of players seated in the room
    pub size: usize,
}

impl Room {
    /// Maximum number of players that can be seated in a room
    pub const MAX_PLAYERS: usize = 2;

    pub fn new(name: String) -> Self {
        Self {
            name,
            board: Board::new(),
            started: false,
            players: Vec::with_capacity(Self::MAX_PLAYERS),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of seated players
    pub fn size(&self) -> usize {
        self.players.len()
    }

    /// Mark of the player seated through the provided session
    pub fn mark_of(&self, session_id: SessionID) -> Option<Mark> {
        self.players
            .iter()
            .find(|player| player.session_id == session_id)
            .map(|player| player.mark)
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            name: self.name.clone(),
            size: self.size(),
        }
    }

    /// Seats a new player in the room. The first player is given X and
    /// the second O, which starts the game. Once started the room never
    /// accepts another player, even if one of the seats has been vacated.
    ///
    /// The joining player is sent their assigned mark followed by the
    /// game state broadcast to everyone in the room.
    pub fn join(
        &mut self,
        session_id: SessionID,
        notify_handle: SessionNotifyHandle,
    ) -> Result<Mark, JoinError> {
        if self.mark_of(session_id).is_some() {
            return Err(JoinError::AlreadyJoined);
        }

        let slot = self.players.len();
        if self.started || slot >= Self::MAX_PLAYERS {
            return Err(JoinError::RoomFull);
        }

        let mark = Mark::ALL[slot];
        if slot + 1 == Self::MAX_PLAYERS {
            self.started = true;
        }

        notify_handle.notify(Response::AssignMark(AssignMark {
            room: self.name.clone(),
            player: mark,
        }));

        self.players.push(RoomPlayer {
            session_id,
            mark,
            notify_handle,
        });

        debug!(
            "Player joined room (Room: {}, SID: {}, Mark: {})",
            self.name, session_id, mark
        );

        self.broadcast();

        Ok(mark)
    }

    /// Plays a move for the provided mark. Moves are only applied while
    /// both players are seated and it is that mark's turn.
    ///
    /// Callers are expected to [`Room::broadcast`] afterwards whether or
    /// not the move was applied
    pub fn make_move(&mut self, mark: Mark, cell: &str) -> bool {
        if self.players.len() != Self::MAX_PLAYERS || self.board.turn() != mark {
            return false;
        }

        self.board.apply_move(cell)
    }

    /// Removes the player seated through the provided session. The board
    /// and started state are left as they are.
    pub fn remove_player(&mut self, session_id: SessionID) {
        let before = self.players.len();
        self.players.retain(|player| player.session_id != session_id);

        if self.players.len() != before {
            debug!(
                "Player left room (Room: {}, SID: {})",
                self.name, session_id
            );
        }
    }

    /// Creates the game state message for the current board
    pub fn game_update(&self) -> GameUpdate {
        GameUpdate {
            board: self.board.labels(),
            turn: self.board.turn(),
            winner: self
                .board
                .winner()
                .map(|winner| winner.as_str().to_string())
                .unwrap_or_default(),
            started: self.is_started(),
        }
    }

    /// Sends the current game state to every seated player
    pub fn broadcast(&self) {
        let update = self.game_update();

        for player in &self.players {
            if !player
                .notify_handle
                .notify(Response::UpdateGame(update.clone()))
            {
                warn!(
                    "Unable to deliver game update, session closed (Room: {}, SID: {})",
                    self.name, player.session_id
                );
            }
        }
    }
}
