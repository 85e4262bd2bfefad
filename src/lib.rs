//! Pigheaded engine library.
//!
//! Exposes the game rules, engine, decision providers, session
//! orchestration, and table renderer for use by integration tests and the
//! binary entry point.

pub mod advisor;
pub mod engine;
pub mod game;
pub mod session;
pub mod ui;
