//! tui-controls: controlled terminal controls with async commits
//!
//! The host owns every value. Controls render what they are given and hand
//! change requests back as commits, which may settle immediately or later.
//! While a commit is in flight the control refuses further input.
//!
//! # Example
//! ```ignore
//! use tui_controls::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(categories)]
//! enum CatalogAction {
//!     PageSet(i64),
//!     PageDidFail(String),
//!     Quit,
//! }
//!
//! #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
//! enum CatalogContext {
//!     Sidebar,
//!     Canvas,
//! }
//! ```

// Re-export everything from core
pub use tui_controls_core::*;

// Re-export derive macros
pub use tui_controls_macros::{Action, BindingContext};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_controls_core::{Action, ActionCategory, BindingContext, Component};

    // Commits
    pub use tui_controls_core::{Commit, CommitError, CommitTracker, Settlement, Settling};

    // Event system
    pub use tui_controls_core::{
        area_contains, process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent,
    };

    // Keybindings
    pub use tui_controls_core::{format_key_for_display, parse_key_string, Keybindings};

    // Store
    pub use tui_controls_core::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Derive macros
    pub use tui_controls_macros::{Action, BindingContext};

    // Ratatui re-exports
    pub use tui_controls_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
