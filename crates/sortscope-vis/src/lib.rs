//! Sortscope Playback
//!
//! Timed replay of sorting traces with playback controls.
//!
//! # Architecture
//!
//! - **Session**: Array size, speed and the random input source
//! - **Playback**: Synchronous state machine over a generated step list
//! - **Scheduler**: Cancellable periodic ticks (Tokio or manual)
//! - **Player**: Binds a controller to a scheduler, one tick task per run
//! - **Server**: REST intents and a WebSocket snapshot stream
//!
//! # Usage
//!
//! ```ignore
//! let controller = PlaybackController::new(SessionConfig::new(20, 100));
//! let player = Player::new(controller, TokioScheduler);
//!
//! let server = VisServer::new(player);
//! server.serve(([0, 0, 0, 0], 3000).into()).await?;
//! ```

mod config;
mod error;
mod events;
mod playback;
mod player;
mod scheduler;
mod server;
mod session;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use events::{StepHistory, StepSnapshot};
pub use playback::{
    ConfigChange, PlaybackController, PlaybackState, PlaybackStatus, StartOutcome, Ticket,
};
pub use player::Player;
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TickFlow, TokioScheduler};
pub use server::VisServer;
pub use session::{ConfigUpdate, InputSource, SessionConfig};
