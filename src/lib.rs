//! Tether - heartbeat and JSON exchange client for a local companion server.
//!
//! Two independent pieces: a [`Heartbeat`] service that signals liveness to
//! the server on a fixed cadence, and an [`ExchangeClient`] that performs
//! single JSON request/response exchanges. Neither depends on the other
//! beyond the client implementing the [`Pinger`] seam the heartbeat drives.

pub mod client;
pub mod config;
pub mod error;
pub mod heartbeat;

pub use client::ExchangeClient;
pub use config::Config;
pub use error::{Result, TetherError};
pub use heartbeat::{Heartbeat, Pinger, HEARTBEAT_PERIOD};
