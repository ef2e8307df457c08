use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_OPTIONS_FILE: &str = ".pngtuber.toml";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Options {
    pub exec: Exec,
    pub window: Window,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Exec {
    pub debug: bool,
    pub log_chat: bool,
    /// Report new followers over EventSub. Needs the token of the channel
    /// owner.
    pub follows: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Window {
    pub width: f32,
    pub height: f32,
}

impl Options {
    /// Reads options from `path`, or from `~/.pngtuber.toml` if no path is
    /// given. A missing default file yields the default options; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match path {
            Some(path) => PathBuf::from(path),
            None => match Options::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Options::default()),
            },
        };
        Options::read(&path)
    }

    fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("Could not read options file {path:?}: {err}"))?;
        Ok(Options::parse(&contents)?)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn default_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(DEFAULT_OPTIONS_FILE))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            exec: Exec::default(),
            window: Window::default(),
        }
    }
}
impl Default for Exec {
    fn default() -> Self {
        Self {
            debug: false,
            log_chat: true,
            follows: true,
        }
    }
}
impl Default for Window {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 120.0,
        }
    }
}
