//! A single room: two seats and the game played between them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;
use triad_board::{GameState, Mark, MoveOutcome, Narrator};
use triad_protocol::{RoomCode, RoomView};
use triad_transport::ConnectionId;

/// Someone sitting in a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub connection: ConnectionId,
    pub name: String,
}

impl Occupant {
    pub fn new(connection: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            connection,
            name: name.into(),
        }
    }
}

/// Room state guarded by the room lock.
///
/// Seats are indexed by [`Mark::index`]. The creator takes X; the game is
/// started while both seats are taken.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    seats: [Option<Occupant>; 2],
    game: GameState,
}

impl Room {
    pub(crate) fn new(code: RoomCode, creator: Occupant) -> Self {
        Self {
            code,
            seats: [Some(creator), None],
            game: GameState::new(),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn occupant(&self, mark: Mark) -> Option<&Occupant> {
        self.seats[mark.index()].as_ref()
    }

    /// Occupied seats, X first.
    pub fn occupants(&self) -> impl Iterator<Item = (Mark, &Occupant)> {
        Mark::ALL
            .into_iter()
            .filter_map(|mark| self.occupant(mark).map(|o| (mark, o)))
    }

    /// The seat `connection` sits in, if any.
    pub fn mark_of(&self, connection: ConnectionId) -> Option<Mark> {
        self.occupants()
            .find(|(_, o)| o.connection == connection)
            .map(|(mark, _)| mark)
    }

    pub fn is_started(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.seats.iter().all(Option::is_none)
    }

    /// The seat a joiner would get: O, or X when only X is free.
    pub(crate) fn free_seat(&self) -> Option<Mark> {
        [Mark::O, Mark::X]
            .into_iter()
            .find(|mark| self.seats[mark.index()].is_none())
    }

    pub(crate) fn seat(&mut self, mark: Mark, occupant: Occupant) {
        debug_assert!(self.seats[mark.index()].is_none());
        self.seats[mark.index()] = Some(occupant);
    }

    /// Empties the seat held by `connection` and returns who sat there.
    pub(crate) fn vacate(&mut self, connection: ConnectionId) -> Option<Occupant> {
        let mark = self.mark_of(connection)?;
        self.seats[mark.index()].take()
    }

    /// Runs one move for whoever holds the turn. Texts name the occupants.
    pub(crate) fn play(&mut self, row: i64, col: i64) -> MoveOutcome {
        let narrator = SeatNames(&self.seats);
        self.game.apply_move(row, col, &narrator)
    }

    /// Replaces the game with a fresh one announcing the new start.
    pub(crate) fn reset_game(&mut self) {
        self.game = GameState::started(&SeatNames(&self.seats));
    }

    /// What the occupant of `mark` gets to see.
    pub fn view_for(&self, mark: Mark) -> RoomView {
        RoomView {
            code: self.code.clone(),
            mark,
            opponent_name: self.occupant(mark.opponent()).map(|o| o.name.clone()),
            is_game_started: self.is_started(),
            is_your_turn: self.game.current_turn() == mark && !self.game.is_over(),
            game_state: self.game.clone(),
        }
    }
}

/// Names players after their seat occupant, e.g. `"Ana (X)"`.
struct SeatNames<'a>(&'a [Option<Occupant>; 2]);

impl Narrator for SeatNames<'_> {
    fn label(&self, mark: Mark) -> String {
        match &self.0[mark.index()] {
            Some(occupant) => format!("{} ({mark})", occupant.name),
            None => format!("Player {mark}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomHandle
// ---------------------------------------------------------------------------

struct Shared {
    code: RoomCode,
    created_at: Instant,
    closed: AtomicBool,
    room: Arc<Mutex<Room>>,
}

/// Cheap, clonable reference to a live room.
///
/// The registry keeps one per room; operations clone it out of the index,
/// drop the index lock, and then take the room lock. A handle whose room
/// was removed from the registry in the meantime reports
/// [`is_closed`](Self::is_closed), and lock holders must treat it as gone.
#[derive(Clone)]
pub struct RoomHandle {
    shared: Arc<Shared>,
}

impl RoomHandle {
    pub(crate) fn new(room: Room, created_at: Instant) -> Self {
        Self {
            shared: Arc::new(Shared {
                code: room.code.clone(),
                created_at,
                closed: AtomicBool::new(false),
                room: Arc::new(Mutex::new(room)),
            }),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.shared.code
    }

    pub fn created_at(&self) -> Instant {
        self.shared.created_at
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    pub(crate) fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
    }

    /// Waits for the room lock. The guard owns a reference to the room, so
    /// it can outlive this handle.
    pub async fn lock(&self) -> OwnedMutexGuard<Room> {
        Arc::clone(&self.shared.room).lock_owned().await
    }

    /// Both handles point at the same room.
    pub fn ptr_eq(&self, other: &RoomHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl std::fmt::Debug for RoomHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomHandle")
            .field("code", &self.shared.code)
            .field("closed", &self.is_closed())
            .finish()
    }
}
