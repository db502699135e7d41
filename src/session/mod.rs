//! Sessions are client connections to the game server, each session
//! tracks the room it has joined so it can be removed from the room
//! once the connection ends.

use self::{
    codec::{CodecError, MessageCodec},
    models::Response,
    socket::{SocketFuture, SocketRx, SocketTx},
};
use crate::{
    services::game::{board::Mark, store::Rooms, RoomRef},
    utils::types::SessionID,
};
use log::{debug, error};
use std::{
    io::ErrorKind,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};
use tokio::{net::TcpStream, spawn};
use tokio_util::codec::Framed;

pub mod codec;
pub mod models;
pub mod routes;
pub mod socket;

static SESSION_IDS: AtomicU32 = AtomicU32::new(1);

/// Handle for pushing messages to a session
#[derive(Clone)]
pub struct SessionNotifyHandle {
    tx: SocketTx,
}

impl SessionNotifyHandle {
    pub fn new(tx: SocketTx) -> Self {
        Self { tx }
    }

    /// Queues a message to be written to the session, returns false
    /// if the session socket has already closed
    pub fn notify(&self, response: Response) -> bool {
        self.tx.send(response).is_ok()
    }
}

pub struct Session {
    /// Unique ID for this session
    pub id: SessionID,

    /// Handle for sending messages to this session
    pub notify_handle: SessionNotifyHandle,

    /// Registry used to resolve rooms by name
    pub rooms: Arc<Rooms>,

    /// Room the session is seated in
    pub joined: Option<JoinedRoom>,
}

/// Room a session has taken a seat in
pub struct JoinedRoom {
    pub name: String,
    pub room: RoomRef,
    pub mark: Mark,
}

impl Session {
    /// Get an ID for a session
    pub fn acquire_id() -> SessionID {
        SESSION_IDS.fetch_add(1, Ordering::AcqRel)
    }

    pub fn new(id: SessionID, notify_handle: SessionNotifyHandle, rooms: Arc<Rooms>) -> Self {
        Self {
            id,
            notify_handle,
            rooms,
            joined: None,
        }
    }

    /// Spawns the tasks for driving the socket and handling the
    /// requests of a newly accepted connection
    pub fn start(id: SessionID, stream: TcpStream, rooms: Arc<Rooms>) {
        let (socket_future, rx, tx) =
            SocketFuture::new(Framed::new(stream, MessageCodec::default()));

        spawn(async move {
            match socket_future.await {
                Ok(()) => debug!("Session disconnected (SID: {id})"),
                Err(CodecError::Io(err)) if is_disconnect(err.kind()) => {
                    debug!("Session connection lost (SID: {id}): {err}")
                }
                Err(err) => error!("Error while running session socket (SID: {id}): {err}"),
            }
        });

        debug!("Session started (SID: {id})");

        let session = Session::new(id, SessionNotifyHandle::new(tx), rooms);
        spawn(session.run(rx));
    }

    /// Handles requests until the socket stops producing them, then
    /// removes the session from any room it joined
    pub async fn run(mut self, mut rx: SocketRx) {
        while let Some(request) = rx.recv().await {
            routes::handle(&mut self, request);
        }

        self.leave_room();
    }

    /// Removes the session from its joined room, safe to call when
    /// the session never joined a room
    pub fn leave_room(&mut self) {
        if let Some(joined) = self.joined.take() {
            joined.room.lock().remove_player(self.id);
            debug!(
                "Session left room (SID: {}, Room: {}, Mark: {})",
                self.id, joined.name, joined.mark
            );
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Session stopped (SID: {})", self.id);
    }
}

/// Checks whether an IO error kind is the remote end going away
fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::UnexpectedEof
    )
}
