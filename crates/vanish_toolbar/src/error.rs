//! Toolbar error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or attaching the toolbar behavior
///
/// Scroll handling itself never fails; these only come out of setup calls.
#[derive(Error, Debug)]
pub enum VanishError {
    /// `initialize` was called before a scroll area was supplied
    #[error("no scroll area set: call set_scroll_area before initialize")]
    MissingScrollArea,

    /// `initialize` was called a second time
    #[error("scroll vanish is already initialized")]
    AlreadyInitialized,

    /// An operation that needs the resolved target ran before `initialize`
    #[error("scroll vanish is not initialized")]
    NotInitialized,

    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a config file
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse a config file
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to serialize a config
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for toolbar operations
pub type Result<T> = std::result::Result<T, VanishError>;
