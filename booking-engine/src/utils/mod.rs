//! Utility Module

pub mod logger;

pub use logger::{init_logger, init_logger_with_file};
