//! Rooms, the registry that owns them, and the coordinator that plays
//! turns inside them.
//!
//! # Key types
//!
//! - [`Registry`]: owns every live [`Room`], indexed by code and by
//!   connection
//! - [`Coordinator`]: turns client requests into room mutations and
//!   pushes the results to both occupants
//! - [`Notifier`]: the push capability the coordinator writes through;
//!   [`ConnectionOutbox`] is the channel-backed implementation
//! - [`RoomConfig`]: retention and sweeping settings
//!
//! # Locking
//!
//! Each room sits behind its own `tokio::sync::Mutex`, so rooms never wait
//! on each other. The registry index is a `parking_lot::RwLock` that is
//! only held for map lookups and edits: never across an `.await`, and
//! never while waiting for a room lock. Pushes are emitted while the room
//! lock is held, which gives both occupants the same order of updates.

mod config;
mod coordinator;
mod error;
mod notifier;
mod registry;
mod room;
mod sweeper;

pub use config::RoomConfig;
pub use coordinator::{Coordinator, MAX_NAME_CHARS, sanitize_name};
pub use error::RoomError;
pub use notifier::{ConnectionOutbox, DEFAULT_OUTBOX_CAPACITY, Notifier};
pub use registry::Registry;
pub use room::{Occupant, Room, RoomHandle};
pub use sweeper::spawn_sweeper;
