//! # Position Broadcast Server
//!
//! Authoritative server for a shared 2D world. Clients connect over a
//! WebSocket, are given an identity and a snapshot of everyone present, and
//! from then on exchange movement and chat events with every other client.
//!
//! ## Core Responsibilities
//!
//! ### Player Registry
//! A single in-memory table of connected players is the source of truth for
//! everything broadcast. Ids come from a monotonic counter and are never
//! reused while the process runs.
//!
//! ### Connection Lifecycle
//! Connect, inbound frames, transport errors, and disconnect are handled by
//! the session controller, which keeps each registry change and the
//! envelopes announcing it atomic with respect to other connections.
//!
//! ### Broadcasting
//! Every connection has its own unbounded outbound queue drained by a writer
//! task. Delivery is best-effort per connection: a closed or stalled client
//! never prevents delivery to the others.
//!
//! ## Module Organization
//!
//! - `registry`: the player table and id allocation
//! - `dispatcher`: outbound queues and fan-out
//! - `session`: lifecycle event handling
//! - `network`: TCP listener and WebSocket tasks
//! - `config`: listener settings from the environment
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::bind("127.0.0.1:8080").await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod network;
pub mod registry;
pub mod session;
pub mod utils;

pub use error::{RegistryError, ServerError};
