//! Reducer: (state, action) -> changed

use tui_controls_components::{ButtonSize, ButtonStyle};

use crate::action::Action;
use crate::state::{CatalogState, Focus};
use crate::stories::PageSlot;

/// Number of buttons in the With icon story
const ICON_STORY_BUTTONS: usize = 2;

pub fn reducer(state: &mut CatalogState, action: Action) -> bool {
    // Canvas state belongs to the story it was made in
    if action.is_story() {
        state.canvas_button = 0;
        state.status = None;
    }

    match action {
        // ===== Stories =====
        Action::StorySelect(story) => {
            state.story = story;
            state.focus = Focus::Canvas;
            true
        }
        Action::StoryNext => {
            state.story = state.story.next();
            true
        }
        Action::StoryPrev => {
            state.story = state.story.prev();
            true
        }

        // ===== Focus =====
        Action::FocusCanvas => set_focus(state, Focus::Canvas),
        Action::FocusSidebar => set_focus(state, Focus::Sidebar),
        Action::FocusNextButton => {
            state.canvas_button = (state.canvas_button + 1) % ICON_STORY_BUTTONS;
            true
        }

        // ===== Button args =====
        Action::ButtonStyleCycle => {
            let styles = ButtonStyle::ALL;
            let index = styles.iter().position(|s| *s == state.button.style).unwrap_or(0);
            state.button.style = styles[(index + 1) % styles.len()];
            true
        }
        Action::ButtonSizeCycle => {
            let sizes = ButtonSize::ALL;
            let index = sizes.iter().position(|s| *s == state.button.size).unwrap_or(0);
            state.button.size = sizes[(index + 1) % sizes.len()];
            true
        }
        Action::ButtonFlagToggle(flag) => {
            state.button.flags.toggle(flag);
            true
        }
        Action::ButtonPress(name) => {
            state.presses = state.presses.wrapping_add(1);
            state.status = Some(format!("Pressed \"{}\" ({} total)", name, state.presses));
            true
        }

        // ===== Pages =====
        Action::PageSet { slot, page } => {
            let stored = match slot {
                PageSlot::Basic => &mut state.pages.basic,
                PageSlot::Async => &mut state.pages.async_page,
                PageSlot::OneOff => &mut state.pages.one_off,
            };
            if *stored == page {
                return false;
            }
            *stored = page;
            true
        }
        Action::PageDidSettle(page) => {
            state.status = Some(format!("Page {} loaded", page));
            true
        }
        Action::PageDidFail(error) => {
            state.status = Some(format!("Page change failed: {}", error));
            true
        }

        // Handled in the main loop
        Action::Quit => false,
    }
}

fn set_focus(state: &mut CatalogState, focus: Focus) -> bool {
    if state.focus == focus {
        return false;
    }
    state.focus = focus;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stories::StoryId;
    use tui_controls_components::ButtonFlags;

    #[test]
    fn test_story_select_focuses_canvas() {
        let mut state = CatalogState::default();
        state.status = Some("old".into());

        assert!(reducer(&mut state, Action::StorySelect(StoryId::PaginationAsync)));
        assert_eq!(state.story, StoryId::PaginationAsync);
        assert_eq!(state.focus, Focus::Canvas);
        assert!(state.status.is_none());
    }

    #[test]
    fn test_story_next_keeps_sidebar_focus() {
        let mut state = CatalogState::default();
        reducer(&mut state, Action::StoryNext);
        assert_eq!(state.story, StoryId::ButtonIcon);
        assert_eq!(state.focus, Focus::Sidebar);
    }

    #[test]
    fn test_story_actions_reset_the_canvas() {
        let mut state = CatalogState::new(StoryId::ButtonIcon, Default::default());
        reducer(&mut state, Action::FocusNextButton);
        reducer(&mut state, Action::ButtonPress("Call us"));
        assert_eq!(state.canvas_button, 1);

        reducer(&mut state, Action::StoryPrev);
        assert_eq!(state.story, StoryId::ButtonPrimary);
        assert_eq!(state.canvas_button, 0);
        assert!(state.status.is_none());
        assert_eq!(state.presses, 1, "press count spans stories");
    }

    #[test]
    fn test_focus_unchanged_is_not_a_change() {
        let mut state = CatalogState::default();
        assert!(!reducer(&mut state, Action::FocusSidebar));
        assert!(reducer(&mut state, Action::FocusCanvas));
    }

    #[test]
    fn test_button_args_cycle() {
        let mut state = CatalogState::default();
        reducer(&mut state, Action::ButtonStyleCycle);
        assert_eq!(state.button.style, ButtonStyle::Flat);
        reducer(&mut state, Action::ButtonStyleCycle);
        assert_eq!(state.button.style, ButtonStyle::Outset);

        reducer(&mut state, Action::ButtonSizeCycle);
        assert_eq!(state.button.size, ButtonSize::Large);
        reducer(&mut state, Action::ButtonSizeCycle);
        assert_eq!(state.button.size, ButtonSize::Small);
    }

    #[test]
    fn test_button_flag_toggle() {
        let mut state = CatalogState::default();
        reducer(&mut state, Action::ButtonFlagToggle(ButtonFlags::BUSY));
        reducer(&mut state, Action::ButtonFlagToggle(ButtonFlags::REVERSE));
        assert_eq!(state.button.flags, ButtonFlags::BUSY | ButtonFlags::REVERSE);

        reducer(&mut state, Action::ButtonFlagToggle(ButtonFlags::BUSY));
        assert_eq!(state.button.flags, ButtonFlags::REVERSE);
    }

    #[test]
    fn test_button_press_counts() {
        let mut state = CatalogState::default();
        reducer(&mut state, Action::ButtonPress("Call us"));
        reducer(&mut state, Action::ButtonPress("Call us"));
        assert_eq!(state.presses, 2);
        assert_eq!(state.status.as_deref(), Some("Pressed \"Call us\" (2 total)"));
    }

    #[test]
    fn test_page_set_targets_slot() {
        let mut state = CatalogState::default();
        assert!(reducer(
            &mut state,
            Action::PageSet {
                slot: PageSlot::OneOff,
                page: 4
            }
        ));
        assert_eq!(state.pages.one_off, 4);
        assert_eq!(state.pages.basic, 1);
        assert_eq!(state.pages.async_page, 1);

        assert!(!reducer(
            &mut state,
            Action::PageSet {
                slot: PageSlot::OneOff,
                page: 4
            }
        ));
    }

    #[test]
    fn test_page_failure_reaches_status() {
        let mut state = CatalogState::default();
        reducer(&mut state, Action::PageDidFail("timeout".into()));
        assert_eq!(state.status.as_deref(), Some("Page change failed: timeout"));
    }

    #[test]
    fn test_quit_does_not_render() {
        let mut state = CatalogState::default();
        assert!(!reducer(&mut state, Action::Quit));
    }
}
