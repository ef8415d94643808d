//! Test utilities for tui-controls hosts and components
//!
//! - [`key`]: build a `KeyEvent` from a key string (`key("ctrl+p")`)
//! - [`key_event`] / [`click`]: build the `EventKind` a component receives
//! - [`TestHarness`]: state plus an action channel for host-level tests
//! - [`RenderHarness`]: render into a `TestBackend` and read the buffer back
//! - `assert_emitted!`, `assert_not_emitted!`, `count_emitted!`: checks on
//!   the actions a call returned
//!
//! # Example
//!
//! ```ignore
//! use tui_controls::testing::{key_event, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 1);
//! let actions: Vec<_> = pagination.handle_event(&key_event("right"), props).into_iter().collect();
//! let screen = render.render_to_string_plain(|frame| pagination.render(frame, frame.area(), props));
//! assert!(screen.contains("‹"));
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::{Action, ActionCategory};

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key press event from a key string, ready for `handle_event`
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Key press events for a space-separated sequence (`"tab tab enter"`)
pub fn key_events(keys: &str) -> Vec<EventKind> {
    keys.split_whitespace().map(key_event).collect()
}

/// Left-button press at a screen position
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Host-level test harness: state plus an action channel.
///
/// Actions a component returns can be fed through [`TestHarness::emit_all`]
/// and drained afterwards, the same way a host loop would receive them.
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Clone of the action sender, for commit callbacks that report back later.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit one action.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit everything a `handle_event` call returned.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain emitted actions and apply each one to the state.
    ///
    /// Returns whether any reducer call reported a change.
    pub fn dispatch_emitted(&mut self, reducer: crate::Reducer<S, A>) -> bool {
        let mut changed = false;
        for action in self.drain_emitted() {
            changed |= reducer(&mut self.state, action);
        }
        changed
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Drain emitted actions of one category; others stay queued.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));

        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }
}

/// Renders widgets into an in-memory terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
    area: Rect,
}

impl RenderHarness {
    /// Create a harness with a `width` x `height` screen.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {e}"));
        Self {
            terminal,
            area: Rect::new(0, 0, width, height),
        }
    }

    /// Screen area
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Draw once and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("Failed to draw: {e}"));
        self.terminal.backend().buffer()
    }

    /// Draw once and return the screen text, one line per row, trailing
    /// spaces removed.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Buffer contents as text, one line per row, trailing spaces removed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Number of actions matching a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
