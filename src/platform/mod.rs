//! Platform abstraction traits for no_std compatibility.
//!
//! The realm writes console output through a [`ConsoleProvider`] so the same
//! object model runs with std (stdout/stderr), with a host-supplied sink, or
//! silently in no_std builds.

#[cfg(feature = "std")]
mod std_impl;

#[cfg(feature = "std")]
pub use std_impl::StdConsoleProvider;

/// Log level for console output.
///
/// Maps to the different console methods: console.log(), console.warn(), etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    /// console.log() - general output
    Log,
    /// console.info() - informational messages
    Info,
    /// console.debug() - debug messages
    Debug,
    /// console.warn() - warnings
    Warn,
    /// console.error() - errors
    Error,
}

/// Trait for handling console output.
///
/// In std environments, this writes to stdout/stderr.
/// In no_std environments, this is a no-op unless the host installs its own.
pub trait ConsoleProvider {
    /// Write a message at the specified log level.
    fn write(&self, level: ConsoleLevel, message: &str);
}

/// A no-op console provider that discards all output.
/// Used as the default in no_std environments.
pub struct NoOpConsoleProvider;

impl ConsoleProvider for NoOpConsoleProvider {
    fn write(&self, _level: ConsoleLevel, _message: &str) {
        // Discard output
    }
}
