//! Controlled page selector with async commits
//!
//! The host owns the page. `Pagination` renders the row of affordances for
//! the value it is given and hands every page change to the host through
//! `set_value`. When the returned [`Commit`] is still pending the control goes
//! busy: every affordance is disabled until the commit settles.
//!
//! ```text
//! Idle --activate P (P != value, min <= P <= max)--> Pending(P)
//! Pending(P) --commit for P settles--> Idle
//! ```

mod layout;

pub use layout::{Affordance, ContractViolation, PageLayout, PageWindow, Slot};

use std::collections::HashSet;

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    Frame,
};
use tracing::{debug, warn};
use tui_controls_core::{area_contains, Commit, CommitTracker, Component, EventKind, Settlement};

use crate::button::{Button, ButtonFlags, ButtonProps, ButtonSize, ButtonStyle};

const LOADING: &str = "loading";

/// Props for Pagination component
pub struct PaginationProps<'a, A> {
    /// Current page, owned by the host
    pub value: i64,
    /// Lowest page, inclusive
    pub min: i64,
    /// Highest page, inclusive
    pub max: i64,
    /// Whether keyboard input is routed here
    pub is_focused: bool,
    /// Called with the requested page, at most once per user action
    pub set_value: &'a dyn Fn(i64) -> Commit<A>,
}

/// Whether a commit is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A commit for `page` has not settled yet
    Pending { page: i64, generation: u64 },
}

impl InteractionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, InteractionState::Pending { .. })
    }

    /// Page of the in-flight commit
    pub fn pending_page(&self) -> Option<i64> {
        match self {
            InteractionState::Pending { page, .. } => Some(*page),
            InteractionState::Idle => None,
        }
    }
}

/// A row of page affordances: `« ‹ 1 2 3 … 10 › »`
///
/// Keys (when focused): `h`/`Left` previous, `l`/`Right` next, `g`/`Home`
/// first, `G`/`End` last, `Tab`/`Shift+Tab` move the focus cursor,
/// `Enter`/`Space` activate it. A left click activates whatever it lands on.
///
/// Every commit, synchronous ones included, queues one settlement. The host
/// must drain them with [`Pagination::settled`] (for a `tokio::select!`
/// loop), [`Pagination::poll_settled`] or [`Pagination::drain_settled`];
/// the queue is unbounded and a host that never drains it grows it by one
/// entry per page change. Dropping the component while a commit is pending
/// is fine: the host's future keeps running and its late settlement goes
/// nowhere.
#[derive(Debug, Default)]
pub struct Pagination {
    state: InteractionState,
    tracker: CommitTracker<i64>,
    window: PageWindow,
    /// Focused affordance; follows its page when the row reshuffles
    cursor: Option<Affordance>,
    /// Enabled slot areas from the last render, with their target page
    hits: Vec<(Rect, i64)>,
    /// Contract violations already logged
    reported: HashSet<ContractViolation>,
    /// Draws every slot
    button: Button,
}

impl Pagination {
    /// Create a new Pagination with the default page window
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different truncation window
    pub fn with_window(mut self, window: PageWindow) -> Self {
        self.window = window;
        self
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a commit is in flight
    pub fn is_busy(&self) -> bool {
        self.state.is_pending()
    }

    /// Apply the next queued settlement, if any, without waiting
    pub fn poll_settled(&mut self) -> Option<Settlement<i64>> {
        let settlement = self.tracker.try_next()?;
        self.apply(&settlement);
        Some(settlement)
    }

    /// Apply every queued settlement, oldest first
    ///
    /// For hosts without an async loop: call after each event.
    pub fn drain_settled(&mut self) -> Vec<Settlement<i64>> {
        std::iter::from_fn(|| self.poll_settled()).collect()
    }

    /// Wait for the next settlement and apply it
    ///
    /// Every commit produces exactly one settlement, including commits that
    /// settled synchronously. Failures are returned as they were produced.
    /// Cancel safe: dropping the future before it resolves loses nothing.
    pub async fn settled(&mut self) -> Settlement<i64> {
        let settlement = self.tracker.next().await;
        self.apply(&settlement);
        settlement
    }

    fn apply(&mut self, settlement: &Settlement<i64>) {
        match self.state {
            InteractionState::Pending { generation, .. } if generation == settlement.generation => {
                debug!(page = settlement.key, generation, "Page commit settled");
                self.state = InteractionState::Idle;
            }
            _ => {}
        }
        if let Err(error) = &settlement.outcome {
            warn!(page = settlement.key, %error, "Page commit failed");
        }
    }

    fn layout<A>(&self, props: &PaginationProps<'_, A>) -> PageLayout {
        PageLayout::new(
            props.value,
            props.min,
            props.max,
            self.window,
            !self.state.is_pending(),
        )
    }

    /// Hand `page` to the host, unless a guard rejects it
    fn commit<A>(&mut self, page: i64, props: &PaginationProps<'_, A>) -> Vec<A> {
        if let Some(pending) = self.state.pending_page() {
            debug!(page, pending, "Pagination busy, ignoring activation");
            return Vec::new();
        }
        if props.min > props.max || page < props.min || page > props.max {
            return Vec::new();
        }
        if page == props.value.clamp(props.min, props.max) {
            return Vec::new();
        }

        let (actions, settling) = (props.set_value)(page).into_parts();
        let ticket = self.tracker.track(page, settling);
        if ticket.is_pending() {
            self.state = InteractionState::Pending {
                page,
                generation: ticket.generation(),
            };
        }
        actions
    }

    fn move_cursor(&mut self, layout: &PageLayout, forward: bool) {
        let enabled: Vec<usize> = layout
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.enabled)
            .map(|(index, _)| index)
            .collect();
        if enabled.is_empty() {
            return;
        }

        let at = self
            .cursor
            .and_then(|affordance| layout.position(affordance));
        let next = match (at, forward) {
            (None, true) => enabled[0],
            (None, false) => enabled[enabled.len() - 1],
            (Some(at), true) => enabled
                .iter()
                .copied()
                .find(|&index| index > at)
                .unwrap_or(enabled[0]),
            (Some(at), false) => enabled
                .iter()
                .rev()
                .copied()
                .find(|&index| index < at)
                .unwrap_or(enabled[enabled.len() - 1]),
        };
        self.cursor = Some(layout.slots[next].affordance);
    }

    fn cursor_target(&self, layout: &PageLayout) -> Option<i64> {
        self.cursor.and_then(|affordance| layout.enabled_target(affordance))
    }

    fn hit(&self, column: u16, row: u16) -> Option<i64> {
        self.hits
            .iter()
            .find(|(area, _)| area_contains(*area, column, row))
            .map(|(_, page)| *page)
    }

    fn report(&mut self, violation: Option<ContractViolation>) {
        if let Some(violation) = violation {
            if self.reported.insert(violation) {
                warn!(%violation, "Pagination props break the min <= value <= max contract");
            }
        }
    }
}

impl<A: 'static> Component<A> for Pagination {
    type Props<'a> = PaginationProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if let EventKind::Tick = event {
            self.button.tick();
            return Vec::new();
        }

        let layout = self.layout(&props);
        let target = match event {
            EventKind::Key(key) if props.is_focused && event.is_key_press() => match key.code {
                KeyCode::Char('h') | KeyCode::Left => {
                    layout.enabled_target(Affordance::Previous)
                }
                KeyCode::Char('l') | KeyCode::Right => layout.enabled_target(Affordance::Next),
                KeyCode::Char('g') | KeyCode::Home => layout.enabled_target(Affordance::First),
                KeyCode::Char('G') | KeyCode::End => layout.enabled_target(Affordance::Last),
                KeyCode::Tab => {
                    self.move_cursor(&layout, true);
                    None
                }
                KeyCode::BackTab => {
                    self.move_cursor(&layout, false);
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.cursor_target(&layout),
                _ => None,
            },
            _ => event
                .left_click()
                .and_then(|(column, row)| self.hit(column, row)),
        };

        match target {
            Some(page) => self.commit(page, &props),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let layout = self.layout(&props);
        self.report(layout.violation);
        self.hits.clear();
        if area.height == 0 {
            return;
        }

        let pending = self.state.pending_page();
        let noop = || ();
        let right = area.right();
        let mut x = area.x;

        for slot in &layout.slots {
            let label = slot.affordance.label();
            let mut flags = ButtonFlags::empty();
            if slot.current {
                flags |= ButtonFlags::SELECTED;
            } else if !slot.enabled {
                flags |= ButtonFlags::DISABLED;
            }
            if pending.is_some_and(|page| slot.affordance == Affordance::Page(page)) {
                flags |= ButtonFlags::BUSY;
            }
            let style = match slot.affordance {
                Affordance::Ellipsis => ButtonStyle::Flat,
                _ => ButtonStyle::Outset,
            };

            let button_props = ButtonProps {
                label: &label,
                icon: None,
                icon_label: None,
                style,
                size: ButtonSize::Small,
                flags,
                min_width: 0,
                is_focused: props.is_focused && self.cursor == Some(slot.affordance),
                on_press: &noop,
            };
            let width = Button::measure(&button_props);
            if x.saturating_add(width) > right {
                break;
            }

            let rect = Rect::new(x, area.y, width, 1);
            self.button.render(frame, rect, button_props);
            if let (true, Some(target)) = (slot.enabled, slot.target) {
                self.hits.push((rect, target));
            }
            x = x.saturating_add(width + 1);
        }

        let loading_width = LOADING.len() as u16;
        if pending.is_some() && x.saturating_add(loading_width) <= right {
            let status = Span::styled(LOADING, Style::default().add_modifier(Modifier::ITALIC));
            frame.render_widget(status, Rect::new(x, area.y, loading_width, 1));
        }
    }
}
