//! Core Module — engine configuration and wiring
//!
//! - [`Config`] — environment-driven configuration
//! - [`Engine`] — all services and repositories, wired together

pub mod config;
pub mod state;

pub use config::Config;
pub use state::Engine;
