//! Catalog state
//!
//! Everything the stories render comes from here. Controls receive slices of
//! it as props; only the reducer mutates it.

use std::time::Duration;

use tui_controls_components::{ButtonFlags, ButtonSize, ButtonStyle};

use crate::stories::{StoryId, DEFAULT_ASYNC_DELAY};

/// Default text of the Button / Primary story
pub const PRIMARY_LABEL: &str = "This is button";

/// Which panel receives keyboard input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Sidebar,
    Canvas,
}

/// Arguments of the Button / Primary story
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonArgs {
    pub label: &'static str,
    pub style: ButtonStyle,
    pub size: ButtonSize,
    pub flags: ButtonFlags,
}

impl Default for ButtonArgs {
    fn default() -> Self {
        Self {
            label: PRIMARY_LABEL,
            style: ButtonStyle::default(),
            size: ButtonSize::default(),
            flags: ButtonFlags::empty(),
        }
    }
}

/// Caller-side pages of the pagination stories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pages {
    pub basic: i64,
    pub async_page: i64,
    /// Zero-based
    pub one_off: i64,
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            basic: 1,
            async_page: 1,
            one_off: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogState {
    pub story: StoryId,
    pub focus: Focus,
    pub button: ButtonArgs,
    /// Focused button in a multi-button story
    pub canvas_button: usize,
    /// Button presses seen so far
    pub presses: u32,
    pub pages: Pages,
    /// Last status line message
    pub status: Option<String>,
    /// Settle delay of the async story
    pub async_delay: Duration,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(StoryId::default(), DEFAULT_ASYNC_DELAY)
    }
}

impl CatalogState {
    pub fn new(story: StoryId, async_delay: Duration) -> Self {
        Self {
            story,
            focus: Focus::default(),
            button: ButtonArgs::default(),
            canvas_button: 0,
            presses: 0,
            pages: Pages::default(),
            status: None,
            async_delay,
        }
    }
}
