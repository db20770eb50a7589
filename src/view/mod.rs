//! Presentation model for the main window.
//!
//! The webview only draws [`ViewUpdate`]s and forwards clicks; the state and
//! the decisions live here, behind the [`Backend`] capability.

pub mod backend;
pub mod break_string;
pub mod root;
pub mod version_selector;
pub mod version_source;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, EventHandler, InvokeFuture, Subscription};
pub use break_string::{break_string, line_fragments, Fragment};
pub use root::{LogLine, RootView, ViewSnapshot, ViewUpdate};
pub use version_selector::VersionSelector;
pub use version_source::VersionSource;
