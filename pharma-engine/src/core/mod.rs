//! Core module: configuration and wired-up engine state
//!
//! - [`Config`] - environment configuration
//! - [`EngineState`] - session, API client and entry services

pub mod config;
pub mod state;

pub use config::Config;
pub use state::EngineState;
