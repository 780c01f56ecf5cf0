//! Turn coordination: what happens when a client asks for something.
//!
//! Every handler follows the same shape: find the caller's room through the
//! [`Registry`], take the room lock, validate, mutate, and push the result
//! to the occupants through the [`Notifier`] before the lock is released.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use triad_board::{Mark, MoveOutcome};
use triad_protocol::{ClientMessage, RoomCode, RoomView, ServerMessage};
use triad_transport::ConnectionId;

use crate::{Notifier, Registry, Room, RoomError, RoomHandle};

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 24;

const DEFAULT_NAME: &str = "Player";

/// Trims a display name and caps its length. Blank names become
/// `"Player"`.
pub fn sanitize_name(raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_NAME_CHARS).collect();
    let name = name.trim_end();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Routes client requests into rooms and fans the results out.
pub struct Coordinator<N: Notifier> {
    registry: Arc<Registry>,
    notifier: Arc<N>,
}

impl<N: Notifier> Coordinator<N> {
    pub fn new(registry: Arc<Registry>, notifier: Arc<N>) -> Self {
        Self { registry, notifier }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Handles one decoded client message. A refused request is answered
    /// to the sender alone with [`ServerMessage::Error`].
    pub async fn dispatch(&self, connection: ConnectionId, message: ClientMessage) {
        let result = match message {
            ClientMessage::CreateRoom { display_name } => {
                self.handle_create(connection, &display_name).await.map(drop)
            }
            ClientMessage::JoinRoom { code, display_name } => self
                .handle_join(connection, &code, &display_name)
                .await
                .map(drop),
            ClientMessage::MakeMove { row, col } => {
                self.handle_move(connection, row, col).await.map(drop)
            }
            ClientMessage::RequestRematch => {
                self.handle_rematch_request(connection).await
            }
            ClientMessage::AcceptRematch => {
                self.handle_rematch_accept(connection).await
            }
        };

        if let Err(e) = result {
            tracing::debug!(conn_id = %connection, error = %e, "request refused");
            self.notifier.notify(
                connection,
                ServerMessage::Error {
                    message: e.to_string(),
                },
            );
        }
    }

    /// Opens a room with the caller in the X seat and answers
    /// `RoomCreated`.
    pub async fn handle_create(
        &self,
        connection: ConnectionId,
        display_name: &str,
    ) -> Result<RoomCode, RoomError> {
        let handle = self
            .registry
            .create_room(connection, sanitize_name(display_name))?;
        let room = handle.lock().await;
        self.notifier.notify(
            connection,
            ServerMessage::RoomCreated(room.view_for(Mark::X)),
        );
        Ok(handle.code().clone())
    }

    /// Seats the caller, answers `RoomJoined`, and tells the waiting
    /// occupant with `OpponentJoined`.
    pub async fn handle_join(
        &self,
        connection: ConnectionId,
        code: &str,
        display_name: &str,
    ) -> Result<RoomCode, RoomError> {
        let room = self
            .registry
            .join_room(code, connection, sanitize_name(display_name))
            .await?;
        let mark = room.mark_of(connection).ok_or(RoomError::NoRoom)?;

        self.notifier
            .notify(connection, ServerMessage::RoomJoined(room.view_for(mark)));
        if let Some(opponent) = room.occupant(mark.opponent()) {
            self.notifier.notify(
                opponent.connection,
                ServerMessage::OpponentJoined(room.view_for(mark.opponent())),
            );
        }
        Ok(room.code().clone())
    }

    /// Plays a move for the caller.
    ///
    /// Engine refusals (game over, out of bounds, occupied) are not errors
    /// here: they only change the status message, which both occupants
    /// receive like any other update.
    pub async fn handle_move(
        &self,
        connection: ConnectionId,
        row: i64,
        col: i64,
    ) -> Result<MoveOutcome, RoomError> {
        let (_, mut room, mark) = self.seat_of(connection).await?;
        if !room.is_started() {
            return Err(RoomError::GameNotStarted);
        }
        if room.game().current_turn() != mark {
            return Err(RoomError::NotYourTurn);
        }

        let outcome = room.play(row, col);
        tracing::debug!(
            code = %room.code(),
            conn_id = %connection,
            %mark,
            row,
            col,
            ?outcome,
            "move played"
        );
        self.broadcast(&room, ServerMessage::GameUpdated);
        Ok(outcome)
    }

    /// Tells the opponent the caller left, then frees the caller's seat.
    /// Safe to call for connections that never joined a room.
    pub async fn handle_disconnect(&self, connection: ConnectionId) {
        let Some(handle) = self.registry.get_by_connection(connection) else {
            self.registry.remove_connection(connection).await;
            return;
        };
        let mut room = handle.lock().await;

        if let Some(mark) = room.mark_of(connection).filter(|_| !handle.is_closed()) {
            let leaver = room.occupant(mark).map(|o| o.name.clone());
            if let (Some(leaver), Some(opponent)) = (leaver, room.occupant(mark.opponent())) {
                self.notifier.notify(
                    opponent.connection,
                    ServerMessage::OpponentDisconnected {
                        opponent_name: leaver,
                    },
                );
            }
        }
        self.registry.vacate(&handle, &mut room, connection);
        tracing::info!(code = %handle.code(), conn_id = %connection, "player left room");
    }

    /// Forwards a rematch request to the opponent. Holds no state; without
    /// an opponent nothing happens.
    pub async fn handle_rematch_request(
        &self,
        connection: ConnectionId,
    ) -> Result<(), RoomError> {
        let (_, room, mark) = self.seat_of(connection).await?;
        let requester = room.occupant(mark).map(|o| o.name.clone());
        if let (Some(requester), Some(opponent)) = (requester, room.occupant(mark.opponent())) {
            self.notifier.notify(
                opponent.connection,
                ServerMessage::RematchRequested {
                    requester_name: requester,
                },
            );
        }
        Ok(())
    }

    /// Starts a fresh game in the caller's room and pushes it to both
    /// occupants, followed by `RematchAccepted`.
    pub async fn handle_rematch_accept(
        &self,
        connection: ConnectionId,
    ) -> Result<(), RoomError> {
        let (_, mut room, _) = self.seat_of(connection).await?;
        room.reset_game();
        tracing::info!(code = %room.code(), "rematch started");

        self.broadcast(&room, ServerMessage::GameUpdated);
        for (_, occupant) in room.occupants() {
            self.notifier
                .notify(occupant.connection, ServerMessage::RematchAccepted);
        }
        Ok(())
    }

    /// Locks the caller's room and finds their seat.
    async fn seat_of(
        &self,
        connection: ConnectionId,
    ) -> Result<(RoomHandle, OwnedMutexGuard<Room>, Mark), RoomError> {
        let handle = self
            .registry
            .get_by_connection(connection)
            .ok_or(RoomError::NoRoom)?;
        let room = handle.lock().await;
        if handle.is_closed() {
            return Err(RoomError::NoRoom);
        }
        let mark = room.mark_of(connection).ok_or(RoomError::NoRoom)?;
        Ok((handle, room, mark))
    }

    /// Sends each occupant their own view, wrapped by `wrap`.
    fn broadcast(&self, room: &Room, wrap: fn(RoomView) -> ServerMessage) {
        for (mark, occupant) in room.occupants() {
            self.notifier.notify(occupant.connection, wrap(room.view_for(mark)));
        }
    }
}
