use crate::logging::parse_level;
use log::{LevelFilter, warn};
use std::env;

pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// SQLite file for the persistent context; `None` keeps it in memory.
    pub database_path: Option<String>,
    /// Newest messages kept in the transcript.
    pub transcript_limit: usize,
    pub log_level: LevelFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            transcript_limit: DEFAULT_TRANSCRIPT_LIMIT,
            log_level: LevelFilter::Info,
        }
    }
}

impl EngineConfig {
    /// Reads `DATABASE_URL`, `PEREGRINE_TRANSCRIPT_LIMIT` and `PEREGRINE_LOG`.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("DATABASE_URL").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(path);
        }

        if let Some(raw) = lookup("PEREGRINE_TRANSCRIPT_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.transcript_limit = limit,
                _ => warn!(
                    "Ignoring PEREGRINE_TRANSCRIPT_LIMIT={:?}, expected a positive integer",
                    raw
                ),
            }
        }

        if let Some(raw) = lookup("PEREGRINE_LOG") {
            match parse_level(&raw) {
                Some(level) => config.log_level = level,
                None => warn!("Ignoring unknown PEREGRINE_LOG level {:?}", raw),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), EngineConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("DATABASE_URL", "/tmp/coach.sqlite"),
            ("PEREGRINE_TRANSCRIPT_LIMIT", "40"),
            ("PEREGRINE_LOG", "debug"),
        ]);
        assert_eq!(config.database_path.as_deref(), Some("/tmp/coach.sqlite"));
        assert_eq!(config.transcript_limit, 40);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "  "),
            ("PEREGRINE_TRANSCRIPT_LIMIT", "0"),
            ("PEREGRINE_LOG", "chatty"),
        ]);
        assert_eq!(config, EngineConfig::default());
    }
}
