use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

use crate::calendar::Locale;
use crate::cmds::Cmd;
use crate::error::Result;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "INSPECTIT_CONFIG_FILE";

const DATA_FILE: &str = "inspectit.v1.json";
const PROFILE_FILE: &str = "profile.v1.json";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env: Option<PathBuf> = if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        Some(PathBuf::from(path))
    } else {
        None
    };

    let home = if let Ok(dir) = env::var("HOME") {
        PathBuf::from(dir)
    } else {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "Unable to find home directory",
        ));
    };

    let home_config = PathBuf::from_iter([&home, &PathBuf::from(".inspectit.toml")].iter());

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from_iter([dir, "inspectit".to_string(), "config.toml".to_string()].iter())
    } else {
        PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("inspectit"),
                Path::new("config.toml"),
            ]
            .iter(),
        )
    };

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub data_file: Option<PathBuf>,
    pub profile_file: Option<PathBuf>,
    pub tick_rate_ms: u64,
    #[serde(skip, default = "default_key_map")]
    pub key_map: KeyMap,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            locale: Locale::default(),
            data_file: None,
            profile_file: None,
            tick_rate_ms: 500,
            key_map: default_key_map(),
        }
    }
}

fn default_key_map() -> KeyMap {
    let mut key_map = KeyMap::new();

    key_map.insert(Key::Char('l'), Cmd::NextDay);
    key_map.insert(Key::Char('h'), Cmd::PrevDay);
    key_map.insert(Key::Char('j'), Cmd::NextWeek);
    key_map.insert(Key::Char('k'), Cmd::PrevWeek);
    key_map.insert(Key::Char('n'), Cmd::NextMonth);
    key_map.insert(Key::Char('p'), Cmd::PrevMonth);
    key_map.insert(Key::Char('t'), Cmd::Today);
    key_map.insert(Key::Char('\n'), Cmd::Select);
    key_map.insert(Key::Char('q'), Cmd::Exit);
    key_map.insert(Key::Esc, Cmd::Exit);

    key_map
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inspectit")
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(DATA_FILE))
    }

    pub fn profile_file(&self) -> PathBuf {
        self.profile_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(PROFILE_FILE))
    }
}

pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    let locations = match path {
        Some(path) => vec![path.to_path_buf()],
        None => find_configfile_locations()?,
    };

    for location in &locations {
        if location.exists() {
            log::debug!("Loading config from {}", location.display());
            let content = fs::read_to_string(location)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    log::debug!("No config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str("locale = \"DE\"\ntick_rate_ms = 100").unwrap();

        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        // Skipped fields fall back to the built-in key map.
        assert_eq!(config.key_map.get(&Key::Char('q')), Some(&Cmd::Exit));
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.locale, Locale::En);
        assert!(config.data_file.is_none());
        assert!(config.data_file().ends_with("inspectit/inspectit.v1.json"));
        assert!(config.profile_file().ends_with("inspectit/profile.v1.json"));
    }
}
