//! Driver crate - hosts the engine behind a line-delimited JSON protocol
//!
//! The engine itself never sleeps. This crate owns the real-time side: it
//! reads requests from any async reader, schedules automatic descents on the
//! tokio clock and writes observations and events to any async writer.
//!
//! # Module Structure
//!
//! - [`config`]: `SessionConfig::from_env()`
//! - [`protocol`]: Inbound requests, outbound messages and `ProtocolError`
//! - [`session`]: The `select!` loop tying input and the fall deadline together

pub mod config;
pub mod protocol;
pub mod session;

pub use config::SessionConfig;
pub use protocol::{parse_request, ClientRequest, OutboundMessage, ProtocolError};
pub use session::{run_game_session, run_session};
