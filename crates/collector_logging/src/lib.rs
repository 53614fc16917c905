#![deny(missing_docs)]
//! Shared logging utilities for the collector workspace.
//!
//! This crate provides the `collector_*` logging macros used across the codebase,
//! a per-thread channel context that prefixes every line emitted while a channel
//! is being processed, and a minimal test initializer for the global logger.

use std::cell::RefCell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Name of the channel currently being processed on this thread.
    static CURRENT_CHANNEL: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Guard returned by [`enter_channel`]. Restores the previous context on drop.
#[must_use = "the channel context is cleared as soon as the guard is dropped"]
pub struct ChannelScope {
    previous: Option<String>,
}

impl Drop for ChannelScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_CHANNEL.with(|c| *c.borrow_mut() = previous);
    }
}

/// Marks `name` as the channel being processed on the current thread.
///
/// Log lines emitted through the `collector_*` macros carry a `[name]` prefix
/// until the returned guard is dropped.
pub fn enter_channel(name: impl Into<String>) -> ChannelScope {
    let previous = CURRENT_CHANNEL.with(|c| c.borrow_mut().replace(name.into()));
    ChannelScope { previous }
}

/// Returns the channel currently set on this thread, if any.
pub fn current_channel() -> Option<String> {
    CURRENT_CHANNEL.with(|c| c.borrow().clone())
}

/// Prefix inserted in front of every message by the logging macros.
#[doc(hidden)]
pub fn context_prefix() -> String {
    CURRENT_CHANNEL.with(|c| match c.borrow().as_deref() {
        Some(name) => format!("[{name}] "),
        None => String::new(),
    })
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! collector_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! collector_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! collector_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! collector_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! collector_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
