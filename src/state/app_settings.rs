use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub data_dir: PathBuf,
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self {
            data_dir: data_dir(),
            full_screen: false,
            log_level: log_level(),
        }
    }
}

/// Optional log-pane verbosity from `BBTUI_LOG` (error..trace).
fn log_level() -> Option<LevelFilter> {
    let raw = std::env::var("BBTUI_LOG").ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Where the league JSON files and image assets live.
/// `BBTUI_DATA_DIR` > `$XDG_DATA_HOME/bbtui` > `~/.local/share/bbtui` > cwd.
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BBTUI_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME")
        && !data_home.trim().is_empty()
    {
        return PathBuf::from(data_home).join("bbtui");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".local").join("share").join("bbtui");
    }
    PathBuf::from(".")
}
