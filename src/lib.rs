//! Ask/respond client: sends one line of user input to a JSON endpoint and
//! renders the reply on an injected display surface.

pub mod client;
pub mod config;
pub mod error;
pub mod surface;
pub mod transport;

pub use client::models::{Attempt, DisplayState, Role, SkipReason, TranscriptEntry};
pub use client::InteractionClient;
pub use config::{ClientConfig, Preset};
pub use error::{ConfigError, InteractionError, TransportError};
pub use surface::{DisplaySurface, MemorySurface, TerminalSurface};
pub use transport::{HttpTransport, Transport};
