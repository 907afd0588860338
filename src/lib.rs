// ABOUTME: Library root for stackdeploy - exposes the dispatcher and its boundaries for testing.
// ABOUTME: The main binary is in main.rs.

pub mod commands;
pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod health;
pub mod output;
pub mod vcs;
