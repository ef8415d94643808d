//! Fixed-size gap for layouts

use ratatui::layout::{Constraint, Rect};
use ratatui::Frame;
use tui_controls_core::Component;

/// Empty space of a fixed number of cells
///
/// Renders nothing. Use [`Spacer::constraint`] when building a ratatui
/// `Layout`, or [`Spacer::size`] when placing widgets by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacer {
    size: u16,
}

impl Spacer {
    pub fn new(size: u16) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Layout constraint reserving exactly this many cells
    pub fn constraint(&self) -> Constraint {
        Constraint::Length(self.size)
    }
}

impl<A> Component<A> for Spacer {
    type Props<'a> = ();

    fn render(&mut self, _frame: &mut Frame, _area: Rect, _props: Self::Props<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::{Direction, Layout};

    #[test]
    fn test_constraint_reserves_size() {
        let spacer = Spacer::new(8);
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(4), spacer.constraint(), Constraint::Length(4)])
            .split(Rect::new(0, 0, 30, 1));

        assert_eq!(areas[1].width, 8);
        assert_eq!(areas[2].x, 12);
    }
}
