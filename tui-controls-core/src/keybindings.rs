//! Context-aware keybindings with key-string parsing

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

/// Trait for user-defined keybinding contexts
///
/// Implement this for your own context enum, or use `#[derive(BindingContext)]`
/// from `tui-controls-macros`.
///
/// # Example
/// ```ignore
/// #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
/// pub enum CatalogContext {
///     Sidebar,
///     Canvas,
/// }
/// ```
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// Get the context name as a string (for config file lookup)
    fn name(&self) -> &'static str;

    /// Parse a context from its name
    fn from_name(name: &str) -> Option<Self>;

    /// Get all possible context values
    fn all() -> &'static [Self];
}

/// Command -> key strings, for one context
pub type BindingMap = HashMap<String, Vec<String>>;

/// Keybindings configuration with context support
///
/// Serialized as a map with a `"global"` entry plus one entry per context
/// name. Unknown context names are ignored when loading.
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    /// Global keybindings, checked as fallback for every context
    global: BindingMap,
    /// Context-specific keybindings
    contexts: HashMap<C, BindingMap>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Serialize for Keybindings<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1 + self.contexts.len()))?;
        map.serialize_entry("global", &self.global)?;
        for (context, bindings) in &self.contexts {
            map.serialize_entry(context.name(), bindings)?;
        }
        map.end()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, BindingMap> = HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (context_name, bindings) in raw {
            if context_name == "global" {
                keybindings.global = bindings;
            } else if let Some(context) = C::from_name(&context_name) {
                keybindings.contexts.insert(context, bindings);
            }
        }

        Ok(keybindings)
    }
}

impl<C: BindingContext> Keybindings<C> {
    /// Create a new empty keybindings configuration
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Add a global keybinding
    pub fn add_global(&mut self, command: impl Into<String>, keys: &[&str]) {
        self.global
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    /// Add a context-specific keybinding
    pub fn add(&mut self, context: C, command: impl Into<String>, keys: &[&str]) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    /// Get bindings for a specific context
    pub fn context_bindings(&self, context: C) -> Option<&BindingMap> {
        self.contexts.get(&context)
    }

    /// Get global bindings
    pub fn global_bindings(&self) -> &BindingMap {
        &self.global
    }

    /// Get the command bound to a key event in the given context
    ///
    /// Context bindings win over global ones.
    pub fn get_command(&self, key: KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| find_command(key, bindings))
            .or_else(|| find_command(key, &self.global))
    }

    /// Get the first key string bound to a command, for help text
    pub fn first_key(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(command))
            .or_else(|| self.global.get(command))
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// Merge user config onto defaults; user entries replace default ones
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.global.extend(user.global);
        for (context, bindings) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(bindings);
        }
        defaults
    }
}

fn find_command(key: KeyEvent, bindings: &BindingMap) -> Option<&str> {
    bindings
        .iter()
        .find(|(_, keys)| {
            keys.iter()
                .filter_map(|k| parse_key_string(k))
                .any(|parsed| key_matches(&parsed, &key))
        })
        .map(|(command, _)| command.as_str())
}

/// Compare code and modifiers, ignoring kind and state
///
/// Uppercase characters arrive with SHIFT set on most terminals, so a
/// binding for `"G"` matches both `G` and `shift+G`.
fn key_matches(binding: &KeyEvent, key: &KeyEvent) -> bool {
    match (binding.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) if a.is_uppercase() || b.is_uppercase() => {
            let unshifted = |m: KeyModifiers| m - KeyModifiers::SHIFT;
            a == b && unshifted(key.modifiers) == unshifted(binding.modifiers)
        }
        (a, b) => a == b && binding.modifiers == key.modifiers,
    }
}

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
///
/// Single characters keep their case, so `"G"` and `"g"` are distinct keys.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own, or "ctrl++"
        Some((prefix, "")) => (prefix.trim_end_matches('+'), "+"),
        Some((prefix, key)) => (prefix, key),
        None => ("", key_str),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.split('+').filter(|p| !p.is_empty()) {
        match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let key_part = key_part.trim();
    let lower = key_part.to_lowercase();
    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => {
            let mut chars = key_part.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Format a key string for display (e.g., "ctrl+p" -> "^P", "left" -> "←")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code != KeyCode::BackTab {
        out.push_str("Shift+");
    }

    let label = match key.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_uppercase().collect()
        }
        KeyCode::Char(c) => c.to_string(),
        _ => key_str.to_string(),
    };

    out.push_str(&label);
    out
}
