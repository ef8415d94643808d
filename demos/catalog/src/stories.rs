//! Story registry
//!
//! Each story is one fixture of a control: a title, a group for the side
//! panel, a description, and (for pagination stories) the caller-side state
//! mapping and commit behavior.

use std::time::Duration;

use clap::ValueEnum;
use tui_controls::Commit;

use crate::action::Action;
use crate::state::CatalogState;

/// Pages in the one-off story's zero-based back end
pub const TOTAL_PAGES: i64 = 9;

/// Default settle delay of the async pagination story
pub const DEFAULT_ASYNC_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum StoryId {
    #[default]
    ButtonPrimary,
    ButtonIcon,
    PaginationBasic,
    PaginationAsync,
    PaginationOneOff,
}

/// Which caller-side page a pagination story stores into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    Basic,
    Async,
    OneOff,
}

/// Pagination props derived from catalog state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl StoryId {
    pub const ALL: [StoryId; 5] = [
        StoryId::ButtonPrimary,
        StoryId::ButtonIcon,
        StoryId::PaginationBasic,
        StoryId::PaginationAsync,
        StoryId::PaginationOneOff,
    ];

    /// Identifier used on the command line
    pub fn id(self) -> &'static str {
        match self {
            StoryId::ButtonPrimary => "button-primary",
            StoryId::ButtonIcon => "button-icon",
            StoryId::PaginationBasic => "pagination-basic",
            StoryId::PaginationAsync => "pagination-async",
            StoryId::PaginationOneOff => "pagination-one-off",
        }
    }

    pub fn group(self) -> &'static str {
        match self {
            StoryId::ButtonPrimary | StoryId::ButtonIcon => "Button",
            _ => "Pagination",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StoryId::ButtonPrimary => "Primary",
            StoryId::ButtonIcon => "With icon",
            StoryId::PaginationBasic => "Basic",
            StoryId::PaginationAsync => "Async",
            StoryId::PaginationOneOff => "One-off",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StoryId::ButtonPrimary => {
                "Every Button prop in one place. Cycle the style and size and toggle \
                 the flags from the keyboard; Enter or Space presses the button."
            }
            StoryId::ButtonIcon => {
                "Buttons can carry an icon. It sits before the label unless the \
                 button is reversed. Tab moves between the two buttons."
            }
            StoryId::PaginationBasic => {
                "Paginations are controlled: the catalog keeps the current page and \
                 hands it in as `value`, and every change comes back through \
                 `set_value`. Any page between `min` and `max`, inclusive, is reachable."
            }
            StoryId::PaginationAsync => {
                "When a page change needs to fetch data, `set_value` returns a pending \
                 commit. The page updates at once, and the pagination stays busy until \
                 the commit settles."
            }
            StoryId::PaginationOneOff => {
                "The back end counts pages from zero, the pagination from one. State \
                 stays zero-based; only the props are shifted by one."
            }
        }
    }

    /// Page slot of a pagination story
    pub fn page_slot(self) -> Option<PageSlot> {
        match self {
            StoryId::PaginationBasic => Some(PageSlot::Basic),
            StoryId::PaginationAsync => Some(PageSlot::Async),
            StoryId::PaginationOneOff => Some(PageSlot::OneOff),
            StoryId::ButtonPrimary | StoryId::ButtonIcon => None,
        }
    }

    pub fn is_pagination(self) -> bool {
        self.page_slot().is_some()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&story| story == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl PageSlot {
    /// Props for this slot's pagination
    pub fn bounds(self, state: &CatalogState) -> PageBounds {
        match self {
            PageSlot::Basic => PageBounds {
                value: state.pages.basic,
                min: 1,
                max: 10,
            },
            PageSlot::Async => PageBounds {
                value: state.pages.async_page,
                min: 1,
                max: 10,
            },
            // Zero-based state, one-based UI
            PageSlot::OneOff => PageBounds {
                value: state.pages.one_off + 1,
                min: 1,
                max: TOTAL_PAGES + 1,
            },
        }
    }

    /// The commit a pagination in this slot hands back for UI page `page`
    pub fn commit(self, page: i64, async_delay: Duration) -> Commit<Action> {
        match self {
            PageSlot::Basic => Commit::action(Action::PageSet { slot: self, page }),
            PageSlot::Async => Commit::action(Action::PageSet { slot: self, page })
                .then_wait(tokio::time::sleep(async_delay)),
            PageSlot::OneOff => Commit::action(Action::PageSet {
                slot: self,
                page: page - 1,
            }),
        }
    }
}
