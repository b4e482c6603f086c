//! # Grounder Gateway
//!
//! The HTTP face of the service: one query endpoint plus health, info, and
//! a retrieval-only search route.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
