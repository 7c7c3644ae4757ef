//! Spherepath CLI library.
//!
//! This crate provides the pieces of the command-line front end that are
//! worth testing without spawning the binary: graph configuration, result
//! formatting and the interactive session.

pub mod config;
pub mod output;
pub mod session;
