//! # Mixtape Architecture
//!
//! Mixtape is a **transport-agnostic playlist-bot library**. The core knows
//! nothing about any particular chat network; a client binary (here, a
//! console harness) plugs a [`transport::Transport`] implementation into
//! the router and feeds it events.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (main.rs, console.rs)                               │
//! │  - Owns the event source and the Transport implementation   │
//! │  - The ONLY place that knows about terminals or networks    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Router (router.rs, callback.rs, keyboard.rs, session.rs)   │
//! │  - Extracts intent from events, renders replies             │
//! │  - Parks multi-step flows in per-conversation sessions      │
//! │  - Turns domain failures into user-visible messages         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - Single mediator for every read-modify-persist sequence   │
//! │  - Owns the in-memory Document and the durability policy    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registries (playlists.rs, shares.rs)                       │
//! │  - Pure domain logic over the Document, no I/O              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - Abstract Store trait                                     │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: the Document is the Source of Truth
//!
//! The whole playlist document is loaded once at startup and every read
//! is served from memory. Every mutation rewrites the full document to
//! the backing store before the user sees a confirmation. Persistence is
//! best-effort: by default a failed write is logged and the confirmation
//! goes out anyway (see [`api::Durability`]).
//!
//! There is no locking around the document. The router is built for a
//! single logical thread of control; two interleaved interactions for the
//! same user can race, and the last save wins. All mutations already flow
//! through the API facade, which is where a per-user lock would go if
//! that hazard ever needs closing.
//!
//! ## Testing Strategy
//!
//! 1. **Registries** (`playlists.rs`, `shares.rs`): thorough unit tests of
//!    the domain rules. This is where the lion's share of testing lives.
//! 2. **API** (`api.rs`): durability policy and persistence mediation,
//!    against `InMemoryStore`.
//! 3. **Router** (`router.rs`): full conversation flows against
//!    `InMemoryStore` plus a recording `MockTransport`.
//! 4. **Client** (`tests/console_session.rs`): one end-to-end run of the
//!    binary over stdin.
//!
//! ## Module Overview
//!
//! - [`router`]: event dispatch, the entry point for incoming traffic
//! - [`api`]: the API facade mediating state and persistence
//! - [`playlists`]: per-user playlist registry rules
//! - [`shares`]: share tokens and deep-link payloads
//! - [`session`]: per-conversation pending interaction state
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: the persisted data types
//! - [`transport`]: the chat-network boundary trait
//! - [`keyboard`], [`callback`]: reply markup and button wire format
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod callback;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod model;
pub mod playlists;
pub mod router;
pub mod session;
pub mod shares;
pub mod store;
pub mod transport;
