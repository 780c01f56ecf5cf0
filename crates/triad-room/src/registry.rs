//! Registry: owns every live room and knows who sits where.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::OwnedMutexGuard;
use tokio::time::Instant;
use triad_protocol::RoomCode;
use triad_transport::ConnectionId;

use crate::{Occupant, Room, RoomError, RoomHandle};

#[derive(Default)]
struct Index {
    rooms: HashMap<RoomCode, RoomHandle>,
    /// A connection sits in at most one room.
    connections: HashMap<ConnectionId, RoomCode>,
}

/// Process-wide table of rooms.
///
/// Both maps live behind one `parking_lot::RwLock` that is held only for
/// the map operation itself. Room state is behind each room's own lock;
/// the index lock may be taken while a room lock is held, never the other
/// way around.
#[derive(Default)]
pub struct Registry {
    index: RwLock<Index>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a room with `connection` in the X seat under a fresh code.
    ///
    /// # Errors
    /// [`RoomError::AlreadyInRoom`] if the connection already sits in a
    /// room.
    pub fn create_room(
        &self,
        connection: ConnectionId,
        name: impl Into<String>,
    ) -> Result<RoomHandle, RoomError> {
        let mut index = self.index.write();
        if let Some(code) = index.connections.get(&connection) {
            return Err(RoomError::AlreadyInRoom(code.clone()));
        }

        let mut rng = rand::rng();
        let code = loop {
            let candidate = RoomCode::generate(&mut rng);
            if !index.rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let room = Room::new(code.clone(), Occupant::new(connection, name));
        let handle = RoomHandle::new(room, Instant::now());
        index.rooms.insert(code.clone(), handle.clone());
        index.connections.insert(connection, code.clone());

        tracing::info!(%code, conn_id = %connection, "room created");
        Ok(handle)
    }

    /// Seats `connection` in the room named by `code` (case-insensitive).
    ///
    /// Returns the room still locked, so the caller can announce the join
    /// before anyone else touches the room.
    ///
    /// # Errors
    /// - [`RoomError::AlreadyInRoom`] if the connection already sits in a
    ///   room
    /// - [`RoomError::RoomNotFound`] if no live room has this code
    /// - [`RoomError::RoomFull`] if both seats are taken
    pub async fn join_room(
        &self,
        code: &str,
        connection: ConnectionId,
        name: impl Into<String>,
    ) -> Result<OwnedMutexGuard<Room>, RoomError> {
        if let Some(current) = self.code_of(connection) {
            return Err(RoomError::AlreadyInRoom(current));
        }
        let handle = self
            .get_by_code(code)
            .ok_or_else(|| RoomError::RoomNotFound(code.to_string()))?;

        let mut room = handle.lock().await;
        if handle.is_closed() {
            return Err(RoomError::RoomNotFound(code.to_string()));
        }
        let mark = room
            .free_seat()
            .ok_or_else(|| RoomError::RoomFull(handle.code().clone()))?;

        {
            let mut index = self.index.write();
            // The connection may have created or joined elsewhere while
            // we waited for the room lock.
            if let Some(current) = index.connections.get(&connection) {
                return Err(RoomError::AlreadyInRoom(current.clone()));
            }
            index.connections.insert(connection, handle.code().clone());
        }
        room.seat(mark, Occupant::new(connection, name));

        tracing::info!(code = %handle.code(), conn_id = %connection, %mark, "room joined");
        Ok(room)
    }

    /// Looks a room up by user-typed code.
    pub fn get_by_code(&self, code: &str) -> Option<RoomHandle> {
        let code = RoomCode::parse(code).ok()?;
        self.index.read().rooms.get(&code).cloned()
    }

    /// The room `connection` sits in.
    pub fn get_by_connection(&self, connection: ConnectionId) -> Option<RoomHandle> {
        let index = self.index.read();
        let code = index.connections.get(&connection)?;
        index.rooms.get(code).cloned()
    }

    /// The code of the room `connection` sits in.
    pub fn code_of(&self, connection: ConnectionId) -> Option<RoomCode> {
        self.index.read().connections.get(&connection).cloned()
    }

    /// Takes `connection` out of whatever room it sits in.
    ///
    /// Empties its seat, removes the room once both seats are empty, and
    /// always forgets the connection. Returns who left, if anyone did.
    pub async fn remove_connection(&self, connection: ConnectionId) -> Option<Occupant> {
        let Some(handle) = self.get_by_connection(connection) else {
            self.index.write().connections.remove(&connection);
            return None;
        };
        let mut room = handle.lock().await;
        self.vacate(&handle, &mut room, connection)
    }

    /// Lock-held variant of [`remove_connection`](Self::remove_connection)
    /// for callers that already own the room lock.
    pub fn vacate(
        &self,
        handle: &RoomHandle,
        room: &mut Room,
        connection: ConnectionId,
    ) -> Option<Occupant> {
        let left = room.vacate(connection);
        let mut index = self.index.write();
        index.connections.remove(&connection);

        if room.is_empty() && !handle.is_closed() {
            let code = handle.code();
            if index.rooms.get(code).is_some_and(|h| h.ptr_eq(handle)) {
                index.rooms.remove(code);
            }
            handle.close();
            tracing::info!(%code, "room removed");
        }
        left
    }

    /// Removes every room created more than `max_age` before `now`,
    /// together with all connection entries pointing at them.
    ///
    /// Occupants are not notified; their next request fails with
    /// [`RoomError::NoRoom`]. Returns the removed codes.
    pub fn sweep_expired(&self, now: Instant, max_age: Duration) -> Vec<RoomCode> {
        let mut index = self.index.write();

        let expired: Vec<RoomCode> = index
            .rooms
            .iter()
            .filter(|(_, h)| now.saturating_duration_since(h.created_at()) > max_age)
            .map(|(code, _)| code.clone())
            .collect();

        for code in &expired {
            if let Some(handle) = index.rooms.remove(code) {
                handle.close();
            }
            tracing::info!(%code, "expired room swept");
        }
        if !expired.is_empty() {
            index.connections.retain(|_, code| !expired.contains(code));
        }
        expired
    }

    pub fn room_count(&self) -> usize {
        self.index.read().rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.index.read().connections.len()
    }
}
