//! Configuration module for ledgerbook
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BookPaths;
pub use settings::Settings;
