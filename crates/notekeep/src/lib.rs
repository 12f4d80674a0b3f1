//! Terminal client and REST server for the notekeep note board.
//!
//! The library target exists so the wire layer can be driven directly in
//! integration tests; the binary in `main.rs` is the real entry point.

pub mod cli;
pub mod server;
