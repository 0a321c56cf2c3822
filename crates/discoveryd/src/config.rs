//! Daemon settings.
//!
//! Priority, lowest first: built-in defaults, `config.toml` in the OS config
//! directory, `DISCOVERYD_*` environment variables.

use std::fs;
use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::paths::AppPaths;

pub const ENV_ADDR: &str = "DISCOVERYD_ADDR";
pub const ENV_DIST_DIR: &str = "DISCOVERYD_DIST_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid bind address {addr:?}: {source}")]
    BadAddr {
        addr: String,
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub bind_addr: String,
    /// Output directory of the web bundle build.
    pub dist_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".into(),
            dist_dir: PathBuf::from("crates/discovery_web/dist"),
        }
    }
}

impl Settings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|source| ConfigError::BadAddr {
                addr: self.bind_addr.clone(),
                source,
            })
    }

    /// Applies overrides from `lookup` (the process environment in production).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_ADDR).filter(|v| !v.trim().is_empty()) {
            self.bind_addr = v.trim().to_string();
        }
        if let Some(v) = lookup(ENV_DIST_DIR).filter(|v| !v.trim().is_empty()) {
            self.dist_dir = PathBuf::from(v.trim());
        }
    }
}

/// Loads settings from the config file under `paths` (if any) and the environment.
pub fn load_settings(paths: Option<&AppPaths>) -> Result<Settings, ConfigError> {
    let mut settings = match paths {
        Some(p) => read_config_file(p)?,
        None => Settings::default(),
    };
    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

fn read_config_file(paths: &AppPaths) -> Result<Settings, ConfigError> {
    let path = paths.config_file();
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Settings::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let settings =
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
    info!(path = %path.display(), "loaded config file");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_parse_to_loopback() {
        let s = Settings::default();
        let addr = s.socket_addr().expect("addr");
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = read_config_file(&AppPaths::at(dir.path())).expect("settings");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths::at(dir.path());
        fs::write(paths.config_file(), "bind_addr = \"0.0.0.0:9000\"\n").expect("write");

        let s = read_config_file(&paths).expect("settings");
        assert_eq!(s.bind_addr, "0.0.0.0:9000");
        assert_eq!(s.dist_dir, Settings::default().dist_dir);
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths::at(dir.path());
        fs::write(paths.config_file(), "port = 9000\n").expect("write");

        let err = read_config_file(&paths).expect_err("unknown key");
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, paths.config_file()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn env_overrides_win_and_blank_values_are_ignored() {
        let mut s = Settings::default();
        s.apply_env(env(&[(ENV_ADDR, "127.0.0.1:8123"), (ENV_DIST_DIR, "  ")]));
        assert_eq!(s.bind_addr, "127.0.0.1:8123");
        assert_eq!(s.dist_dir, Settings::default().dist_dir);

        s.apply_env(env(&[(ENV_DIST_DIR, "/srv/landing")]));
        assert_eq!(s.dist_dir, PathBuf::from("/srv/landing"));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let s = Settings {
            bind_addr: "localhost".into(),
            ..Settings::default()
        };
        assert!(matches!(s.socket_addr(), Err(ConfigError::BadAddr { .. })));
    }
}
