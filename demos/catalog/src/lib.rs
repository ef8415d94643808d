//! Story catalog for tui-controls
//!
//! Registers Button and Pagination stories and hosts them in a two-panel
//! terminal UI. The binary in `main.rs` wires the catalog to a terminal; the
//! library half is what the tests drive.

pub mod action;
pub mod app;
pub mod config;
pub mod reducer;
pub mod state;
pub mod stories;

pub use action::Action;
pub use app::Catalog;
pub use config::{default_keybindings, load_keybindings, Args, CatalogContext, ConfigError};
pub use reducer::reducer;
pub use state::{CatalogState, Focus};
pub use stories::{PageBounds, PageSlot, StoryId, TOTAL_PAGES};
