use std::str::FromStr;

use derive_setters::Setters;

use crate::{Error, Result};

const DEFAULT_LINE_CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Per-handle knobs for the facade operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Setters)]
pub struct Config {
    /// Bytes read from disk per chunk while streaming lines
    pub line_chunk_size: usize,

    /// Treat `\r\n` as a single line break
    pub collapse_crlf: bool,

    /// Create missing parent directories before writing or moving
    pub create_parents: bool,

    /// Pretty-print JSON on write
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_chunk_size: DEFAULT_LINE_CHUNK_SIZE,
            collapse_crlf: true,
            create_parents: true,
            pretty_json: false,
        }
    }
}

impl Config {
    /// Reads overrides from `FSX_*` environment variables, loading a `.env`
    /// file first when one is present. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let default = Self::default();

        let line_chunk_size = parse_var("FSX_LINE_CHUNK_SIZE")?.unwrap_or(default.line_chunk_size);
        if line_chunk_size == 0 {
            return Err(Error::InvalidConfig {
                key: "FSX_LINE_CHUNK_SIZE",
                value: line_chunk_size.to_string(),
            });
        }

        Ok(Self {
            line_chunk_size,
            collapse_crlf: parse_var("FSX_COLLAPSE_CRLF")?.unwrap_or(default.collapse_crlf),
            create_parents: parse_var("FSX_CREATE_PARENTS")?.unwrap_or(default.create_parents),
            pretty_json: parse_var("FSX_PRETTY_JSON")?.unwrap_or(default.pretty_json),
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>> {
    let Ok(value) = std::env::var(key) else {
        return Ok(None);
    };

    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(Error::InvalidConfig { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    const KEYS: [&str; 4] = [
        "FSX_LINE_CHUNK_SIZE",
        "FSX_COLLAPSE_CRLF",
        "FSX_CREATE_PARENTS",
        "FSX_PRETTY_JSON",
    ];

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        reset_env();
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        reset_env();
        env::set_var("FSX_LINE_CHUNK_SIZE", "16");
        env::set_var("FSX_PRETTY_JSON", "true");
        let actual = Config::from_env().unwrap();
        reset_env();

        let expected = Config::default().line_chunk_size(16).pretty_json(true);
        assert_eq!(actual, expected);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_value() {
        reset_env();
        env::set_var("FSX_COLLAPSE_CRLF", "sometimes");
        let actual = Config::from_env();
        reset_env();

        assert!(matches!(
            actual,
            Err(Error::InvalidConfig { key: "FSX_COLLAPSE_CRLF", .. })
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_chunk() {
        reset_env();
        env::set_var("FSX_LINE_CHUNK_SIZE", "0");
        let actual = Config::from_env();
        reset_env();

        assert!(actual.is_err());
    }
}
