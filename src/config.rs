use crate::history::DEFAULT_MAX_HISTORY;
use crate::wheel::DEFAULT_SPIN_DURATION_MS;
use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/tooli.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub history_limit: usize,
    pub spin_duration_ms: u64,
    pub seed_users: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            history_limit: DEFAULT_MAX_HISTORY,
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            seed_users: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            data_path: lookup("TOOLI_DATA_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            history_limit: parse_or(&lookup, "TOOLI_HISTORY_LIMIT", defaults.history_limit).max(1),
            spin_duration_ms: parse_or(&lookup, "TOOLI_SPIN_DURATION_MS", defaults.spin_duration_ms),
            seed_users: lookup("TOOLI_SEED_USERS")
                .map(|value| parse_flag("TOOLI_SEED_USERS", &value, defaults.seed_users))
                .unwrap_or(defaults.seed_users),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {key}={raw}");
                default
            }
        },
        None => default,
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("ignoring invalid {key}={raw}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("TOOLI_DATA_PATH", "/tmp/t.json"),
            ("TOOLI_HISTORY_LIMIT", "50"),
            ("TOOLI_SPIN_DURATION_MS", "1200"),
            ("TOOLI_SEED_USERS", "off"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/t.json"));
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.spin_duration_ms, 1200);
        assert!(!config.seed_users);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("TOOLI_HISTORY_LIMIT", "0"),
            ("TOOLI_SEED_USERS", "maybe"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.history_limit, 1);
        assert!(config.seed_users);
    }
}
