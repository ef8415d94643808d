//! Controls for tui-controls
//!
//! Components implement the `Component<A>` trait and receive everything they
//! display through Props. Value changes go back to the host through callbacks.
//!
//! # Components
//!
//! - [`Pagination`] - Page selector whose commits may settle asynchronously
//! - [`Button`] - Push button with style, size and state variants
//! - [`Spacer`] - Fixed-size gap
//!
//! # Example
//!
//! ```ignore
//! use tui_controls::Commit;
//! use tui_controls_components::{Pagination, PaginationProps};
//!
//! let set_page = |page| Commit::action(Action::PageSet(page));
//! pagination.render(frame, area, PaginationProps {
//!     value: state.page,
//!     min: 1,
//!     max: 10,
//!     is_focused: state.focus == Focus::Pager,
//!     set_value: &set_page,
//! });
//! ```

mod button;
mod pagination;
mod spacer;

pub use button::{Button, ButtonFlags, ButtonProps, ButtonSize, ButtonStyle};
pub use pagination::{
    Affordance, ContractViolation, InteractionState, PageLayout, PageWindow, Pagination,
    PaginationProps, Slot,
};
pub use spacer::Spacer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Button, ButtonFlags, ButtonProps, ButtonSize, ButtonStyle, InteractionState, PageWindow,
        Pagination, PaginationProps, Spacer,
    };
}
