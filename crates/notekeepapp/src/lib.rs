//! # Notekeep Architecture
//!
//! Notekeep is a **UI-agnostic note board library**. The binary crate wires
//! two clients on top of it (a terminal client and a REST server), but
//! everything in here takes regular Rust values and returns regular Rust
//! types: no stdout, no exit codes, no terminal assumptions.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (notekeep crate: cli/, server/)               │
//! │  - Parses arguments / HTTP requests                         │
//! │  - Formats terminal output / JSON responses                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (service.rs)                                 │
//! │  - Note lifecycle: views, ordering, flag flips              │
//! │  - Generic over the storage backend                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract NoteStore trait                                 │
//! │  - LocalStore (JSON blob), RemoteStore (HTTP),              │
//! │    MemoryStore (testing)                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service never sees which backend it runs on; backends are selected
//! by configuration at startup ([`config::AppConfig`]). All service and
//! store operations are async: callers await the store round trip and
//! re-fetch their view afterwards, there is no optimistic state.
//!
//! ## Testing Strategy
//!
//! - Service logic is tested against [`store::memory::MemoryStore`].
//! - The file blob store is tested against temp directories.
//! - The wire layer is tested in the binary crate by driving the router
//!   directly, backed by the memory store.

pub mod config;
pub mod content;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
