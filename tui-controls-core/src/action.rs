//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions are what components hand back to the host when the user does
/// something. They should be:
/// - Clone: actions may be logged or queued more than once
/// - Debug: for logging
/// - Send + 'static: commit futures may emit them from spawned tasks
///
/// Use `#[derive(Action)]` from `tui-controls-macros` to implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions grouped into named categories
///
/// Generated by `#[derive(Action)]` together with `#[action(categories)]`.
/// The category is taken from the leading word of the variant name
/// (`PageSet` -> `"page"`) unless overridden with `#[action(category = "...")]`.
pub trait ActionCategory: Action {
    /// Get the action's category, if it has one
    fn category(&self) -> Option<&'static str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum PagerAction {
        PageSet(i64),
        Quit,
    }

    impl Action for PagerAction {
        fn name(&self) -> &'static str {
            match self {
                PagerAction::PageSet(_) => "PageSet",
                PagerAction::Quit => "Quit",
            }
        }
    }

    impl ActionCategory for PagerAction {
        fn category(&self) -> Option<&'static str> {
            match self {
                PagerAction::PageSet(_) => Some("page"),
                PagerAction::Quit => None,
            }
        }
    }

    #[test]
    fn test_name_and_category() {
        let action = PagerAction::PageSet(3);
        assert_eq!(action.name(), "PageSet");
        assert_eq!(action.category(), Some("page"));
        assert!(matches!(action, PagerAction::PageSet(3)));
        assert_eq!(PagerAction::Quit.category(), None);
    }
}
