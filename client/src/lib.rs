//! VitaPrev Client Library
//!
//! Typed access to the VitaPrev backend plus the services that feed the
//! shared summary derivations. Exposed as a library for the CLI and tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
