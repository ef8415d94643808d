//! Catalog actions
//!
//! Categories come from the leading word of each variant:
//! - `story`: StorySelect, StoryNext, StoryPrev
//! - `focus`: FocusCanvas, FocusSidebar, FocusNextButton
//! - `button`: ButtonStyleCycle, ButtonSizeCycle, ButtonFlagToggle, ButtonPress
//! - `page`: PageSet, PageDidSettle, PageDidFail
//! - uncategorized: Quit

use tui_controls_components::ButtonFlags;

use crate::stories::{PageSlot, StoryId};

#[derive(tui_controls::Action, Clone, Debug, PartialEq)]
#[action(categories)]
pub enum Action {
    /// Open a story
    StorySelect(StoryId),
    StoryNext,
    StoryPrev,

    FocusCanvas,
    FocusSidebar,
    /// Move focus between the buttons of a multi-button story
    FocusNextButton,

    ButtonStyleCycle,
    ButtonSizeCycle,
    ButtonFlagToggle(ButtonFlags),
    /// A story button was pressed
    ButtonPress(&'static str),

    /// A pagination story's commit: store `page` in the story's own units
    PageSet { slot: PageSlot, page: i64 },
    /// A page commit finished; carries the page the control asked for
    PageDidSettle(i64),
    /// A page commit failed
    PageDidFail(String),

    Quit,
}
