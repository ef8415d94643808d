//! Event types delivered to components

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// The event payload handed to `Component::handle_event`
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event (clicks, drags, moves)
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick
    Tick,
}

impl EventKind {
    /// Position of a left-button press, if this event is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }

    /// Whether this is a key press (not a release or repeat)
    pub fn is_key_press(&self) -> bool {
        matches!(
            self,
            EventKind::Key(key) if key.kind == crossterm::event::KeyEventKind::Press
        )
    }
}

/// Check if a point lies within an area
pub fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_left_click() {
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 4, 2);
        assert_eq!(click.left_click(), Some((4, 2)));

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 4, 2);
        assert_eq!(right.left_click(), None);

        let moved = mouse(MouseEventKind::Moved, 4, 2);
        assert_eq!(moved.left_click(), None);
    }

    #[test]
    fn test_area_contains() {
        let area = Rect::new(2, 1, 3, 1);
        assert!(area_contains(area, 2, 1));
        assert!(area_contains(area, 4, 1));
        assert!(!area_contains(area, 5, 1));
        assert!(!area_contains(area, 2, 2));
        assert!(!area_contains(Rect::new(0, 0, 0, 0), 0, 0));
    }
}
