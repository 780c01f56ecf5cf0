//! # Triad
//!
//! Server for a two-player three-in-a-row game whose board doubles every
//! time it fills up without a winner.
//!
//! Two ways to play:
//!
//! - **Rooms** over WebSocket: [`TriadServer`] accepts connections, and
//!   players create or join rooms by a six-character code.
//! - **Single device** through [`SoloGame`]: a stateless adapter where the
//!   caller keeps the serialized game between requests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use triad::prelude::*;
//!
//! # async fn start() -> Result<(), TriadError> {
//! let server = TriadServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;
mod solo;

pub use config::ServerArgs;
pub use error::TriadError;
pub use server::{HANDSHAKE_TIMEOUT, TriadServer, TriadServerBuilder};
pub use solo::{SoloGame, SoloReply};

/// Everything needed to run a server or embed the game.
pub mod prelude {
    pub use crate::{ServerArgs, SoloGame, SoloReply, TriadError, TriadServer, TriadServerBuilder};
    pub use triad_board::{Board, Cell, GameState, Mark, MoveOutcome, Narrator};
    pub use triad_protocol::{ClientMessage, Envelope, RoomCode, RoomView, ServerMessage};
    pub use triad_room::RoomConfig;
}
