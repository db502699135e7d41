use crate::services::game::board::Mark;
use serde::{Deserialize, Serialize};

/// Request to play a move in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// The room to play the move in
    pub room: String,
    /// The mark of the player making the move
    pub player: String,
    /// Label of the cell being played ("1" through "9")
    #[serde(rename = "move")]
    pub cell: String,
}

/// Mark assigned to a player when they join a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignMark {
    /// The room that was joined
    pub room: String,
    /// The mark the player will play as
    pub player: Mark,
}

/// Full state of a game, sent to every player whenever the
/// room changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdate {
    /// Cells in order, unplayed cells hold their own label
    pub board: Vec<String>,
    /// Mark of the player whose turn it is
    pub turn: Mark,
    /// Winning mark, "tie" or empty while the game is in progress
    pub winner: String,
    /// Whether both players have joined
    pub started: bool,
}
