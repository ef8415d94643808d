//! Push button component

use bitflags::bitflags;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_controls_core::{area_contains, Component, EventKind};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

bitflags! {
    /// Boolean presentation switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonFlags: u8 {
        /// Stretch to the full width of the render area
        const FILL = 1 << 0;
        /// Accent colors
        const HIGHLIGHT = 1 << 1;
        /// Rendered as the chosen option of a group
        const SELECTED = 1 << 2;
        /// Shows a spinner and refuses activation
        const BUSY = 1 << 3;
        /// Icon after the label instead of before
        const REVERSE = 1 << 4;
        /// Dimmed and refuses activation
        const DISABLED = 1 << 5;
    }
}

/// Frame style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Bracketed: `[ label ]`
    #[default]
    Outset,
    /// Bare label
    Flat,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 2] = [ButtonStyle::Outset, ButtonStyle::Flat];

    pub fn name(self) -> &'static str {
        match self {
            ButtonStyle::Outset => "outset",
            ButtonStyle::Flat => "flat",
        }
    }
}

/// Horizontal padding inside the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 3] = [ButtonSize::Small, ButtonSize::Medium, ButtonSize::Large];

    /// Cells of padding on each side of the content
    pub fn padding(self) -> u16 {
        match self {
            ButtonSize::Small => 0,
            ButtonSize::Medium => 1,
            ButtonSize::Large => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ButtonSize::Small => "small",
            ButtonSize::Medium => "medium",
            ButtonSize::Large => "large",
        }
    }
}

/// Props for Button component
pub struct ButtonProps<'a, A> {
    /// Text content
    pub label: &'a str,
    /// Optional icon glyph
    pub icon: Option<&'a str>,
    /// Text used when `label` is empty
    pub icon_label: Option<&'a str>,
    pub style: ButtonStyle,
    pub size: ButtonSize,
    pub flags: ButtonFlags,
    /// Minimum rendered width in cells
    pub min_width: u16,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback to create the action for a press
    pub on_press: &'a dyn Fn() -> A,
}

/// A push button
///
/// Presses on Enter/Space when focused, or on a left click inside the area it
/// last rendered to. Disabled and busy buttons never press.
#[derive(Debug, Default)]
pub struct Button {
    /// Area of the last render, for mouse hits
    area: Option<Rect>,
    /// Spinner frame for the busy state
    spinner: usize,
}

impl Button {
    /// Create a new Button
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the busy spinner by one frame
    pub fn tick(&mut self) {
        self.spinner = (self.spinner + 1) % SPINNER.len();
    }

    /// Area the button last rendered to
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Width in cells these props need, ignoring `FILL`
    pub fn measure<A>(props: &ButtonProps<'_, A>) -> u16 {
        let width = content_line(props, 0).width();
        u16::try_from(width)
            .unwrap_or(u16::MAX)
            .max(props.min_width)
    }

    fn can_press<A>(props: &ButtonProps<'_, A>) -> bool {
        !props
            .flags
            .intersects(ButtonFlags::DISABLED | ButtonFlags::BUSY)
    }
}

/// The single line a button draws, frame and padding included
fn content_line<'a, A>(props: &ButtonProps<'a, A>, spinner: usize) -> Line<'a> {
    let text = if props.label.is_empty() {
        props.icon_label.unwrap_or_default()
    } else {
        props.label
    };

    let glyph = if props.flags.contains(ButtonFlags::BUSY) {
        Some(SPINNER[spinner % SPINNER.len()])
    } else {
        props.icon
    };

    let mut body: Vec<Span<'a>> = Vec::with_capacity(3);
    match glyph {
        Some(glyph) if text.is_empty() => body.push(Span::raw(glyph)),
        Some(glyph) if props.flags.contains(ButtonFlags::REVERSE) => {
            body.push(Span::raw(text));
            body.push(Span::raw(" "));
            body.push(Span::raw(glyph));
        }
        Some(glyph) => {
            body.push(Span::raw(glyph));
            body.push(Span::raw(" "));
            body.push(Span::raw(text));
        }
        None => body.push(Span::raw(text)),
    }

    let pad = " ".repeat(props.size.padding() as usize);
    let mut spans = Vec::with_capacity(body.len() + 4);
    if props.style == ButtonStyle::Outset {
        spans.push(Span::raw("["));
    }
    if !pad.is_empty() {
        spans.push(Span::raw(pad.clone()));
    }
    spans.extend(body);
    if !pad.is_empty() {
        spans.push(Span::raw(pad));
    }
    if props.style == ButtonStyle::Outset {
        spans.push(Span::raw("]"));
    }
    Line::from(spans)
}

fn button_style<A>(props: &ButtonProps<'_, A>) -> Style {
    let flags = props.flags;
    let mut style = Style::default();

    if flags.contains(ButtonFlags::HIGHLIGHT) {
        style = style.fg(Color::White).bg(Color::Blue);
    }
    if flags.contains(ButtonFlags::SELECTED) {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    if flags.contains(ButtonFlags::DISABLED) {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    } else if props.is_focused {
        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
    }
    style
}

impl<A: 'static> Component<A> for Button {
    type Props<'a> = ButtonProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if let EventKind::Tick = event {
            self.tick();
            return None;
        }
        if !Self::can_press(&props) {
            return None;
        }

        let pressed = match event {
            EventKind::Key(key) if props.is_focused && event.is_key_press() => {
                matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            _ => match (event.left_click(), self.area) {
                (Some((column, row)), Some(area)) => area_contains(area, column, row),
                _ => false,
            },
        };

        pressed.then(|| (props.on_press)())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let width = if props.flags.contains(ButtonFlags::FILL) {
            area.width
        } else {
            Self::measure(&props).min(area.width)
        };
        let rect = Rect { width, ..area };
        self.area = (width > 0 && rect.height > 0).then_some(rect);

        let line = content_line(&props, self.spinner);
        let paragraph = Paragraph::new(line)
            .style(button_style(&props))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_controls_core::testing::{click, key_event, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Press,
    }

    fn props<'a>(
        label: &'a str,
        flags: ButtonFlags,
        on_press: &'a dyn Fn() -> TestAction,
    ) -> ButtonProps<'a, TestAction> {
        ButtonProps {
            label,
            icon: None,
            icon_label: None,
            style: ButtonStyle::Outset,
            size: ButtonSize::Medium,
            flags,
            min_width: 0,
            is_focused: true,
            on_press,
        }
    }

    fn press() -> TestAction {
        TestAction::Press
    }

    #[test]
    fn test_enter_and_space_press() {
        let mut button = Button::new();
        for k in ["enter", "space"] {
            let actions: Vec<_> = button
                .handle_event(&key_event(k), props("Save", ButtonFlags::empty(), &press))
                .into_iter()
                .collect();
            assert_eq!(actions, vec![TestAction::Press]);
        }
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut button = Button::new();
        let mut p = props("Save", ButtonFlags::empty(), &press);
        p.is_focused = false;

        let actions: Vec<_> = button
            .handle_event(&key_event("enter"), p)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_disabled_and_busy_never_press() {
        let mut button = Button::new();
        for flags in [ButtonFlags::DISABLED, ButtonFlags::BUSY] {
            let actions: Vec<_> = button
                .handle_event(&key_event("enter"), props("Save", flags, &press))
                .into_iter()
                .collect();
            assert!(actions.is_empty(), "{flags:?} pressed");
        }
    }

    #[test]
    fn test_click_inside_rendered_area() {
        let mut render = RenderHarness::new(20, 1);
        let mut button = Button::new();
        render.render(|frame| {
            button.render(frame, frame.area(), props("Save", ButtonFlags::empty(), &press))
        });
        // "[ Save ]" is 8 cells wide
        assert_eq!(button.area(), Some(Rect::new(0, 0, 8, 1)));

        let mut unfocused = props("Save", ButtonFlags::empty(), &press);
        unfocused.is_focused = false;
        let hit: Vec<_> = button.handle_event(&click(7, 0), unfocused).into_iter().collect();
        assert_eq!(hit, vec![TestAction::Press]);

        let miss: Vec<_> = button
            .handle_event(&click(8, 0), props("Save", ButtonFlags::empty(), &press))
            .into_iter()
            .collect();
        assert!(miss.is_empty());
    }

    #[test]
    fn test_measure() {
        let p = props("Save", ButtonFlags::empty(), &press);
        assert_eq!(Button::measure(&p), 8);

        let mut small_flat = props("7", ButtonFlags::empty(), &press);
        small_flat.size = ButtonSize::Small;
        small_flat.style = ButtonStyle::Flat;
        assert_eq!(Button::measure(&small_flat), 1);

        let mut wide = props("7", ButtonFlags::empty(), &press);
        wide.min_width = 12;
        assert_eq!(Button::measure(&wide), 12);
    }

    #[test]
    fn test_icon_placement() {
        let mut render = RenderHarness::new(20, 2);
        let mut first = Button::new();
        let mut second = Button::new();

        let mut icon_first = props("Call", ButtonFlags::empty(), &press);
        icon_first.icon = Some("☎");
        let mut icon_last = props("Call", ButtonFlags::REVERSE, &press);
        icon_last.icon = Some("☎");

        let screen = render.render_to_string_plain(|frame| {
            first.render(frame, Rect::new(0, 0, 20, 1), icon_first);
            second.render(frame, Rect::new(0, 1, 20, 1), icon_last);
        });
        assert_eq!(screen, "[ ☎ Call ]\n[ Call ☎ ]");
    }

    #[test]
    fn test_icon_label_used_without_text() {
        let mut render = RenderHarness::new(20, 1);
        let mut button = Button::new();
        let mut p = props("", ButtonFlags::empty(), &press);
        p.icon_label = Some("Settings");

        let screen = render.render_to_string_plain(|frame| button.render(frame, frame.area(), p));
        assert_eq!(screen, "[ Settings ]");
    }

    #[test]
    fn test_busy_shows_spinner() {
        let mut render = RenderHarness::new(20, 1);
        let mut button = Button::new();

        let screen = render.render_to_string_plain(|frame| {
            button.render(frame, frame.area(), props("3", ButtonFlags::BUSY, &press))
        });
        assert_eq!(screen, "[ ⠋ 3 ]");

        let _ = Component::<TestAction>::handle_event(
            &mut button,
            &EventKind::Tick,
            props("3", ButtonFlags::BUSY, &press),
        )
        .into_iter()
        .count();
        let screen = render.render_to_string_plain(|frame| {
            button.render(frame, frame.area(), props("3", ButtonFlags::BUSY, &press))
        });
        assert_eq!(screen, "[ ⠙ 3 ]");
    }

    #[test]
    fn test_fill_and_selected_style() {
        let mut render = RenderHarness::new(16, 1);
        let mut button = Button::new();

        let buffer = render.render(|frame| {
            button.render(
                frame,
                frame.area(),
                props("Go", ButtonFlags::FILL | ButtonFlags::SELECTED, &press),
            )
        });
        let cell = buffer.cell((0, 0)).expect("cell");
        assert!(cell.modifier.contains(Modifier::REVERSED));
        assert_eq!(button.area().map(|a| a.width), Some(16));
    }
}
