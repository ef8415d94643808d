//! Catalog shell: story list, story canvas and status bar
//!
//! `Catalog` owns the store and the mounted controls. The host loop feeds it
//! events, dispatches the actions it returns and waits on
//! [`Catalog::settled`] for page commits.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::info;
use tui_controls::{
    area_contains, format_key_for_display, Component, EventKind, Keybindings, LoggingMiddleware,
    Settlement, StoreWithMiddleware,
};
use tui_controls_components::{
    Button, ButtonFlags, ButtonProps, ButtonStyle, Pagination, PaginationProps, Spacer,
};

use crate::action::Action;
use crate::config::CatalogContext;
use crate::reducer::reducer;
use crate::state::{ButtonArgs, CatalogState, Focus, PRIMARY_LABEL};
use crate::stories::StoryId;

const SIDEBAR_WIDTH: u16 = 24;

/// Gap between the two buttons of the With icon story
const ICON_SPACING: u16 = 8;

/// A fixed button of the With icon story
struct IconButton {
    label: &'static str,
    icon: &'static str,
    icon_label: Option<&'static str>,
    flags: ButtonFlags,
    press: fn() -> Action,
}

static ICON_BUTTONS: [IconButton; 2] = [
    IconButton {
        label: "",
        icon: "⚙",
        icon_label: Some("Settings"),
        flags: ButtonFlags::empty(),
        press: || Action::ButtonPress("Settings"),
    },
    IconButton {
        label: "Call us",
        icon: "☎",
        icon_label: None,
        flags: ButtonFlags::HIGHLIGHT.union(ButtonFlags::REVERSE),
        press: || Action::ButtonPress("Call us"),
    },
];

static PRESS_PRIMARY: fn() -> Action = || Action::ButtonPress(PRIMARY_LABEL);

pub struct Catalog {
    store: StoreWithMiddleware<CatalogState, Action, LoggingMiddleware>,
    keybindings: Keybindings<CatalogContext>,
    /// Mounted while a pagination story is open
    pagination: Option<Pagination>,
    buttons: [Button; 2],
    spacer: Spacer,
    /// Story rows of the last render, for mouse selection
    story_rows: Vec<(Rect, StoryId)>,
    canvas_area: Rect,
}

impl Catalog {
    pub fn new(state: CatalogState, keybindings: Keybindings<CatalogContext>) -> Self {
        let pagination = state.story.is_pagination().then(Pagination::new);
        Self {
            store: StoreWithMiddleware::new(state, reducer, LoggingMiddleware::new()),
            keybindings,
            pagination,
            buttons: Default::default(),
            spacer: Spacer::new(ICON_SPACING),
            story_rows: Vec::new(),
            canvas_area: Rect::default(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        self.store.state()
    }

    /// The mounted pagination, if the open story has one
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn context(&self) -> CatalogContext {
        match self.store.state().focus {
            Focus::Sidebar => CatalogContext::Sidebar,
            Focus::Canvas => CatalogContext::Canvas,
        }
    }

    /// Whether something on screen animates between ticks
    pub fn is_animating(&self) -> bool {
        let state = self.store.state();
        match state.story {
            StoryId::ButtonPrimary => state.button.flags.contains(ButtonFlags::BUSY),
            _ => self.pagination.as_ref().is_some_and(Pagination::is_busy),
        }
    }

    /// Dispatch through the store, remounting story controls on a story change
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.store.state().story;
        let changed = self.store.dispatch(action);
        let story = self.store.state().story;

        if story != before {
            if self.pagination.as_ref().is_some_and(Pagination::is_busy) {
                info!(story = before.id(), "Unmounting pagination with a commit in flight");
            }
            self.pagination = story.is_pagination().then(Pagination::new);
            self.buttons = Default::default();
        }
        changed
    }

    pub fn handle_event(&mut self, event: &EventKind) -> Vec<Action> {
        match event {
            EventKind::Key(key) if event.is_key_press() => self.handle_key(*key),
            EventKind::Key(_) => Vec::new(),
            _ => {
                if let Some((column, row)) = event.left_click() {
                    if let Some(story) = self.story_at(column, row) {
                        return vec![Action::StorySelect(story)];
                    }
                    let mut actions = self.forward(event);
                    if self.store.state().focus == Focus::Sidebar
                        && area_contains(self.canvas_area, column, row)
                    {
                        actions.insert(0, Action::FocusCanvas);
                    }
                    return actions;
                }
                self.forward(event)
            }
        }
    }

    /// Wait for the mounted pagination's next settlement
    ///
    /// Never resolves while no pagination is mounted.
    pub async fn settled(&mut self) -> Action {
        match self.pagination.as_mut() {
            Some(pagination) => settlement_action(pagination.settled().await),
            None => std::future::pending().await,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let state = self.store.state();
        if let Some(command) = self.keybindings.get_command(key, self.context()) {
            if let Some(action) = command_action(command, state) {
                return vec![action];
            }
        }
        if state.focus == Focus::Canvas {
            self.forward(&EventKind::Key(key))
        } else {
            Vec::new()
        }
    }

    fn story_at(&self, column: u16, row: u16) -> Option<StoryId> {
        self.story_rows
            .iter()
            .find(|(area, _)| area_contains(*area, column, row))
            .map(|(_, story)| *story)
    }

    /// Route an event to the open story's controls
    fn forward(&mut self, event: &EventKind) -> Vec<Action> {
        let state = self.store.state();
        let focused = state.focus == Focus::Canvas;

        match state.story {
            StoryId::ButtonPrimary => self.buttons[0]
                .handle_event(event, primary_props(&state.button, focused))
                .into_iter()
                .collect(),
            StoryId::ButtonIcon => {
                let mut actions = Vec::new();
                for (index, button) in self.buttons.iter_mut().enumerate() {
                    let props = icon_props(index, focused && state.canvas_button == index);
                    actions.extend(button.handle_event(event, props));
                }
                actions
            }
            story => {
                let (Some(slot), Some(pagination)) = (story.page_slot(), self.pagination.as_mut())
                else {
                    return Vec::new();
                };
                let bounds = slot.bounds(state);
                let delay = state.async_delay;
                let set_value = move |page: i64| slot.commit(page, delay);
                let props = PaginationProps {
                    value: bounds.value,
                    min: bounds.min,
                    max: bounds.max,
                    is_focused: focused,
                    set_value: &set_value,
                };
                pagination.handle_event(event, props).into_iter().collect()
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [sidebar, canvas] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .areas(main);

        self.render_sidebar(frame, sidebar);
        self.render_canvas(frame, canvas);
        self.render_status(frame, status);
    }

    fn render_sidebar(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let block = panel_block(" Stories ".to_string(), state.focus == Focus::Sidebar);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.story_rows.clear();
        let mut lines = Vec::new();
        let mut group = "";
        for story in StoryId::ALL {
            if story.group() != group {
                group = story.group();
                lines.push(Line::from(Span::styled(
                    group,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }

            let row = inner.y.saturating_add(lines.len() as u16);
            if row < inner.bottom() {
                self.story_rows
                    .push((Rect::new(inner.x, row, inner.width, 1), story));
            }
            let style = if story == state.story {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {}", story.title()), style)));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_canvas(&mut self, frame: &mut Frame, area: Rect) {
        self.canvas_area = area;
        let state = self.store.state();
        let story = state.story;
        let focused = state.focus == Focus::Canvas;

        let title = format!(" {} / {} ", story.group(), story.title());
        let block = panel_block(title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [description, _, control, _, details] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(story.description())
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Gray)),
            description,
        );

        let lines = match story {
            StoryId::ButtonPrimary => {
                self.buttons[0].render(frame, control, primary_props(&state.button, focused));
                button_args_lines(&state.button, state.presses)
            }
            StoryId::ButtonIcon => {
                let widths = [0, 1].map(|index| Button::measure(&icon_props(index, false)));
                let [first, gap, second, _] = Layout::horizontal([
                    Constraint::Length(widths[0]),
                    self.spacer.constraint(),
                    Constraint::Length(widths[1]),
                    Constraint::Fill(1),
                ])
                .areas(control);

                let [first_button, second_button] = &mut self.buttons;
                first_button.render(
                    frame,
                    first,
                    icon_props(0, focused && state.canvas_button == 0),
                );
                Component::<Action>::render(&mut self.spacer, frame, gap, ());
                second_button.render(
                    frame,
                    second,
                    icon_props(1, focused && state.canvas_button == 1),
                );
                vec![Line::from(format!("presses: {}", state.presses))]
            }
            story => {
                let (Some(slot), Some(pagination)) = (story.page_slot(), self.pagination.as_mut())
                else {
                    return;
                };
                let bounds = slot.bounds(state);
                let delay = state.async_delay;
                let set_value = move |page: i64| slot.commit(page, delay);
                pagination.render(
                    frame,
                    control,
                    PaginationProps {
                        value: bounds.value,
                        min: bounds.min,
                        max: bounds.max,
                        is_focused: focused,
                        set_value: &set_value,
                    },
                );

                let mut lines = vec![Line::from(format!(
                    "value: {}  min: {}  max: {}",
                    bounds.value, bounds.min, bounds.max
                ))];
                if story == StoryId::PaginationOneOff {
                    lines.push(Line::from(format!(
                        "caller page (zero-based): {}",
                        state.pages.one_off
                    )));
                }
                lines.push(Line::from(Span::styled(
                    "←/→ page  Home/End first/last  Tab/Shift+Tab pick  Enter go",
                    Style::default().fg(Color::DarkGray),
                )));
                lines
            }
        };

        frame.render_widget(Paragraph::new(lines), details);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let context = self.context();
        let commands: &[(&str, &str)] = match (context, state.story) {
            (CatalogContext::Sidebar, _) => &[
                ("story_next", "next"),
                ("story_prev", "prev"),
                ("story_open", "open"),
                ("quit", "quit"),
            ],
            (CatalogContext::Canvas, StoryId::ButtonPrimary) => &[
                ("button_style", "style"),
                ("button_size", "size"),
                ("toggle_fill", "fill"),
                ("toggle_highlight", "highlight"),
                ("toggle_selected", "selected"),
                ("toggle_busy", "busy"),
                ("toggle_reverse", "reverse"),
                ("toggle_disabled", "disabled"),
                ("focus_sidebar", "back"),
            ],
            (CatalogContext::Canvas, StoryId::ButtonIcon) => &[
                ("focus_next_button", "next button"),
                ("focus_sidebar", "back"),
                ("quit", "quit"),
            ],
            (CatalogContext::Canvas, _) => &[("focus_sidebar", "back"), ("quit", "quit")],
        };

        let mut spans = Vec::new();
        for (command, label) in commands {
            let Some(key) = self.keybindings.first_key(command, context) else {
                continue;
            };
            spans.push(Span::styled(
                format_key_for_display(key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}  ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(status) = &state.status {
            spans.push(Span::styled(
                format!("│ {}", status),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Keybinding command to action, for commands that apply to the open story
fn command_action(command: &str, state: &CatalogState) -> Option<Action> {
    let primary = state.story == StoryId::ButtonPrimary;
    let action = match command {
        "quit" => Action::Quit,
        "focus_sidebar" => Action::FocusSidebar,
        "story_next" => Action::StoryNext,
        "story_prev" => Action::StoryPrev,
        "story_open" => Action::StorySelect(state.story),
        "button_style" if primary => Action::ButtonStyleCycle,
        "button_size" if primary => Action::ButtonSizeCycle,
        "toggle_fill" if primary => Action::ButtonFlagToggle(ButtonFlags::FILL),
        "toggle_highlight" if primary => Action::ButtonFlagToggle(ButtonFlags::HIGHLIGHT),
        "toggle_selected" if primary => Action::ButtonFlagToggle(ButtonFlags::SELECTED),
        "toggle_busy" if primary => Action::ButtonFlagToggle(ButtonFlags::BUSY),
        "toggle_reverse" if primary => Action::ButtonFlagToggle(ButtonFlags::REVERSE),
        "toggle_disabled" if primary => Action::ButtonFlagToggle(ButtonFlags::DISABLED),
        "focus_next_button" if state.story == StoryId::ButtonIcon => Action::FocusNextButton,
        _ => return None,
    };
    Some(action)
}

fn settlement_action(settlement: Settlement<i64>) -> Action {
    match settlement.outcome {
        Ok(()) => Action::PageDidSettle(settlement.key),
        Err(error) => Action::PageDidFail(error.to_string()),
    }
}

fn primary_props(args: &ButtonArgs, is_focused: bool) -> ButtonProps<'static, Action> {
    ButtonProps {
        label: args.label,
        icon: None,
        icon_label: None,
        style: args.style,
        size: args.size,
        flags: args.flags,
        min_width: 0,
        is_focused,
        on_press: &PRESS_PRIMARY,
    }
}

fn icon_props(index: usize, is_focused: bool) -> ButtonProps<'static, Action> {
    let button = &ICON_BUTTONS[index];
    ButtonProps {
        label: button.label,
        icon: Some(button.icon),
        icon_label: button.icon_label,
        style: ButtonStyle::Outset,
        size: Default::default(),
        flags: button.flags,
        min_width: 0,
        is_focused,
        on_press: &button.press,
    }
}

fn button_args_lines(args: &ButtonArgs, presses: u32) -> Vec<Line<'static>> {
    let flags: Vec<String> = args
        .flags
        .iter_names()
        .map(|(name, _)| name.to_lowercase())
        .collect();
    let flags = if flags.is_empty() {
        "none".to_string()
    } else {
        flags.join(" ")
    };

    vec![
        Line::from(format!(
            "style: {}  size: {}",
            args.style.name(),
            args.size.name()
        )),
        Line::from(format!("flags: {}", flags)),
        Line::from(format!("presses: {}", presses)),
    ]
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}
