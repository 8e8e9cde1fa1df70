//! Process settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://db_alumnos.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `BIND_ADDR`
    pub bind_addr: String,
    /// `DB_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `SEED_ON_START`: insert the default students when the store is empty.
    pub seed_on_start: bool,
    /// `BODY_LIMIT_BYTES`
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed_on_start: true,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => parse_number("DB_MAX_CONNECTIONS", &v)?,
            None => defaults.max_connections,
        };
        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => parse_number("BODY_LIMIT_BYTES", &v)?,
            None => defaults.body_limit_bytes,
        };
        let seed_on_start = match lookup("SEED_ON_START") {
            Some(v) => parse_bool("SEED_ON_START", &v)?,
            None => defaults.seed_on_start,
        };
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections,
            seed_on_start,
            body_limit_bytes,
        })
    }

    /// True for `sqlite::memory:` style URLs, where every connection opens its own database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(s.max_connections, 5);
        assert!(s.seed_on_start);
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "1"),
            ("SEED_ON_START", "false"),
            ("BODY_LIMIT_BYTES", "2048"),
        ]))
        .unwrap();
        assert!(s.is_in_memory());
        assert_eq!(s.max_connections, 1);
        assert!(!s.seed_on_start);
        assert_eq!(s.body_limit_bytes, 2048);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Settings::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn rejects_bad_bool() {
        assert!(Settings::from_lookup(lookup_from(&[("SEED_ON_START", "maybe")])).is_err());
    }
}
