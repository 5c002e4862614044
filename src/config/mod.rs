//! Configuration module for Subtrack
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SubtrackPaths;
pub use settings::Settings;
