//! Command line and keybinding configuration

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tui_controls::Keybindings;

use crate::stories::StoryId;

/// Story catalog for tui-controls
#[derive(Parser, Debug, Clone)]
#[command(name = "control-catalog", version, about)]
pub struct Args {
    /// Story to open on start
    #[arg(long, value_enum)]
    pub story: Option<StoryId>,

    /// Settle delay of the async pagination story, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub async_delay_ms: u64,

    /// JSON file with keybindings that override the defaults
    #[arg(long)]
    pub keybindings: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn async_delay(&self) -> Duration {
        Duration::from_millis(self.async_delay_ms)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(default_log_dir)
    }
}

/// Keybinding contexts, one per panel
#[derive(tui_controls::BindingContext, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogContext {
    Sidebar,
    Canvas,
}

pub fn default_keybindings() -> Keybindings<CatalogContext> {
    let mut keybindings = Keybindings::new();

    keybindings.add_global("quit", &["q", "ctrl+c"]);
    keybindings.add_global("focus_sidebar", &["esc"]);

    keybindings.add(CatalogContext::Sidebar, "story_next", &["j", "down"]);
    keybindings.add(CatalogContext::Sidebar, "story_prev", &["k", "up"]);
    keybindings.add(CatalogContext::Sidebar, "story_open", &["enter", "l", "right"]);

    keybindings.add(CatalogContext::Canvas, "button_style", &["s"]);
    keybindings.add(CatalogContext::Canvas, "button_size", &["z"]);
    keybindings.add(CatalogContext::Canvas, "toggle_fill", &["f"]);
    keybindings.add(CatalogContext::Canvas, "toggle_highlight", &["i"]);
    keybindings.add(CatalogContext::Canvas, "toggle_selected", &["e"]);
    keybindings.add(CatalogContext::Canvas, "toggle_busy", &["b"]);
    keybindings.add(CatalogContext::Canvas, "toggle_reverse", &["r"]);
    keybindings.add(CatalogContext::Canvas, "toggle_disabled", &["d"]);
    keybindings.add(CatalogContext::Canvas, "focus_next_button", &["tab"]);

    keybindings
}

/// Defaults, with the user's file merged on top when given
pub fn load_keybindings(path: Option<&Path>) -> Result<Keybindings<CatalogContext>, ConfigError> {
    let defaults = default_keybindings();
    let Some(path) = path else {
        return Ok(defaults);
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let user: Keybindings<CatalogContext> =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "Loaded keybindings");
    Ok(Keybindings::merge(defaults, user))
}

/// Platform data directory for the log file, or the working directory
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("control-catalog"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read keybindings {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid keybindings {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_controls::testing::{char_key, key};
    use tui_controls::BindingContext;

    #[test]
    fn test_context_names() {
        assert_eq!(CatalogContext::Sidebar.name(), "sidebar");
        assert_eq!(CatalogContext::from_name("canvas"), Some(CatalogContext::Canvas));
    }

    #[test]
    fn test_global_bindings_apply_everywhere() {
        let keybindings = default_keybindings();
        for context in CatalogContext::all() {
            assert_eq!(keybindings.get_command(char_key('q'), *context), Some("quit"));
        }
    }

    #[test]
    fn test_context_bindings() {
        let keybindings = default_keybindings();
        assert_eq!(
            keybindings.get_command(key("down"), CatalogContext::Sidebar),
            Some("story_next")
        );
        assert_eq!(keybindings.get_command(key("down"), CatalogContext::Canvas), None);
        assert_eq!(
            keybindings.get_command(char_key('b'), CatalogContext::Canvas),
            Some("toggle_busy")
        );
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("control-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("keys.json");
        std::fs::write(&path, r#"{"global": {"quit": ["x"]}, "canvas": {"toggle_busy": ["B"]}}"#)
            .unwrap();

        let keybindings = load_keybindings(Some(&path)).unwrap();
        assert_eq!(
            keybindings.get_command(char_key('x'), CatalogContext::Sidebar),
            Some("quit")
        );
        assert_eq!(keybindings.get_command(char_key('q'), CatalogContext::Sidebar), None);
        assert_eq!(
            keybindings.get_command(char_key('B'), CatalogContext::Canvas),
            Some("toggle_busy")
        );
        // Untouched defaults survive
        assert_eq!(
            keybindings.get_command(char_key('s'), CatalogContext::Canvas),
            Some("button_style")
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_keybindings(Some(Path::new("/nonexistent/keys.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read keybindings"));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["control-catalog"]);
        assert_eq!(args.async_delay(), Duration::from_millis(1000));
        assert!(args.story.is_none());

        let args = Args::parse_from(["control-catalog", "--story", "pagination-one-off"]);
        assert_eq!(args.story, Some(StoryId::PaginationOneOff));
    }
}
