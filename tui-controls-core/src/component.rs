//! Component trait for props-driven UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI control that renders from props and hands actions back to its host
///
/// Components follow these rules:
/// 1. Props carry everything the control displays; the host owns that data
/// 2. `handle_event` returns actions and never mutates host state directly
/// 3. `render` is a function of props plus transient UI state kept in `&mut self`
///
/// Transient UI state (a focus cursor, the areas hit-tested by the mouse,
/// whether a commit is in flight) lives in the component. Data the host cares
/// about, such as the selected page, always travels through props.
///
/// # Focus
///
/// Components receive the raw `EventKind`. Whether keyboard input is meant
/// for a component is passed through its props (`is_focused`), so controls
/// stay decoupled from how the host tracks focus.
///
/// # Example
///
/// A controlled checkbox: the host owns `checked`, the control only asks for
/// changes.
///
/// ```ignore
/// use tui_controls::{Component, EventKind, Frame, Rect};
///
/// struct Checkbox;
///
/// struct CheckboxProps<'a> {
///     checked: bool,
///     is_focused: bool,
///     on_toggle: &'a dyn Fn(bool) -> AppAction,
/// }
///
/// impl Component<AppAction> for Checkbox {
///     type Props<'a> = CheckboxProps<'a>;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         let toggled = matches!(
///             event,
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Char(' ')
///         );
///         toggled.then(|| (props.on_toggle)(!props.checked))
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let mark = if props.checked { "[x]" } else { "[ ]" };
///         frame.render_widget(Paragraph::new(mark), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// What the host hands in on every call
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Anything iterable works as the return value: `None`, `Some(action)`,
    /// an `Option` from `bool::then`, or a `Vec` built from a commit.
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Draw into `area`, recording whatever later hit-testing needs
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
