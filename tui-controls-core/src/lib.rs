//! Core traits and types for tui-controls
//!
//! Controls in this family are controlled: the host owns the value, passes it
//! in through props and receives every change request back as a commit. The
//! host applies commits through a Redux-style store.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Host-side state container with reducer pattern
//! - **Component**: UI elements that render from props and turn input into actions
//! - **Commit**: A value change handed to the host, settled now or later
//! - **Keybindings**: Context-aware key mapping for host applications
//!
//! # Async commits
//!
//! A commit callback may return work that settles later. The control stays
//! busy until it does, and the host loop waits on the control alongside its
//! other sources:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(raw) = event_rx.recv() => { /* handle_event, dispatch actions */ }
//!         Some(action) = action_rx.recv() => { store.dispatch(action); }
//!         settlement = pagination.settled() => {
//!             if let Err(error) = settlement.outcome {
//!                 store.dispatch(Action::CommitDidFail(error.to_string()));
//!             }
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod commit;
pub mod component;
pub mod event;
pub mod keybindings;
pub mod poller;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory};
pub use component::Component;

// Commit exports
pub use commit::{
    Commit, CommitError, CommitTracker, PendingCommit, Settlement, Settling, Ticket,
};

// Event exports
pub use event::{area_contains, EventKind};
pub use poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};

// Keybindings exports
pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, click, ctrl_key, key, key_event, key_events, RenderHarness,
    TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory};
    pub use crate::commit::{Commit, CommitError, CommitTracker, Settlement, Settling};
    pub use crate::component::Component;
    pub use crate::event::{area_contains, EventKind};
    pub use crate::keybindings::{
        format_key_for_display, parse_key_string, BindingContext, Keybindings,
    };
    pub use crate::poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
