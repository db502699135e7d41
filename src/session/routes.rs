//! Handlers for each of the request types a session can send.
//!
//! Invalid requests (unknown rooms, full rooms, out of turn moves) are
//! logged and otherwise ignored, the client only sees the outcome through
//! the next game update.

use super::{
    models::{JoinRoomRequest, MakeMoveRequest, MakeRoomRequest, Request, Response, RoomList},
    JoinedRoom, Session,
};
use crate::services::game::store::Rooms;
use log::{debug, warn};

/// Routes a request to its handler
pub fn handle(session: &mut Session, request: Request) {
    debug!("Session request (SID: {}): {:?}", session.id, request);

    match request {
        Request::JoinRoom(req) => handle_join_room(session, req),
        Request::MakeMove(req) => handle_make_move(session, req),
        Request::MakeRoom(req) => handle_make_room(session, req),
        Request::ListRooms => handle_list_rooms(session),
    }
}

/// Handles seating the session in a room, the room sends the assigned
/// mark and the initial game update
fn handle_join_room(session: &mut Session, JoinRoomRequest { room: name }: JoinRoomRequest) {
    if let Some(joined) = &session.joined {
        warn!(
            "Session attempted to join another room (SID: {}, Joined: {}, Requested: {})",
            session.id, joined.name, name
        );
        return;
    }

    let room = match session.rooms.get(&name) {
        Some(value) => value,
        None => {
            warn!("Room does not exist (SID: {}, Room: {})", session.id, name);
            return;
        }
    };

    let result = room.lock().join(session.id, session.notify_handle.clone());

    match result {
        Ok(mark) => {
            session.joined = Some(JoinedRoom { name, room, mark });
        }
        Err(err) => {
            warn!(
                "Unable to join room (SID: {}, Room: {}): {}",
                session.id, name, err
            );
        }
    }
}

/// Handles a move request. The move is only played when the session is
/// seated in the room as the player named in the request, the game state
/// is broadcast afterwards either way
fn handle_make_move(session: &mut Session, req: MakeMoveRequest) {
    let room = match session.rooms.get(&req.room) {
        Some(value) => value,
        None => {
            warn!(
                "Room does not exist (SID: {}, Room: {})",
                session.id, req.room
            );
            return;
        }
    };

    let room = &mut *room.lock();

    let mark = room
        .mark_of(session.id)
        .filter(|mark| mark.as_str() == req.player);

    match mark {
        Some(mark) => {
            if room.make_move(mark, &req.cell) {
                debug!(
                    "Played move (Room: {}, Mark: {}, Cell: {})",
                    room.name, mark, req.cell
                );
            } else {
                debug!(
                    "Move rejected (Room: {}, Mark: {}, Cell: {}, Turn: {})",
                    room.name,
                    mark,
                    req.cell,
                    room.board().turn()
                );
            }
        }
        None => {
            debug!(
                "Move from player not seated in room (SID: {}, Room: {}, Player: {})",
                session.id, room.name, req.player
            );
        }
    }

    room.broadcast();
}

fn handle_make_room(session: &mut Session, MakeRoomRequest { room }: MakeRoomRequest) {
    if !Rooms::is_valid_name(&room) {
        warn!("Invalid room name (SID: {}, Room: {:?})", session.id, room);
        return;
    }

    if !session.rooms.create(&room) {
        debug!("Room already exists (SID: {}, Room: {})", session.id, room);
    }
}

fn handle_list_rooms(session: &mut Session) {
    let rooms = session.rooms.list();
    session
        .notify_handle
        .notify(Response::Rooms(RoomList { rooms }));
}
