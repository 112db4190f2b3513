//! Agent options: space-separated `key=value` pairs.
//!
//! An agent is constructed from an option string such as
//! `"name=bot role=black search=mcts simulation=1000 seed=42"`. The
//! implicit defaults `name=unknown role=unknown` are prepended before
//! parsing, tokens split on whitespace, and each token splits at its first
//! `=`. A later duplicate overwrites an earlier value. Unknown keys are
//! kept — they can be read back through `property` — but have no effect on
//! behavior.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors. All of these are raised at agent construction;
/// a failed construction leaves no usable agent behind.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("invalid role: {0:?}")]
    InvalidRole(String),

    #[error("invalid value {value:?} for option {key:?}")]
    InvalidValue { key: String, value: String },
}

/// The parsed option map.
#[derive(Debug, Clone)]
pub struct Options {
    map: BTreeMap<String, String>,
}

impl Options {
    /// Parse an option string on top of the implicit defaults.
    pub fn parse(args: &str) -> Self {
        let mut map = BTreeMap::new();
        let full = format!("name=unknown role=unknown {args}");
        for token in full.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => map.insert(key.to_string(), value.to_string()),
                None => map.insert(token.to_string(), String::new()),
            };
        }
        Self { map }
    }

    /// Look up a raw option value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Set or overwrite an option.
    pub fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    /// Apply a `key=value` message (the notify channel).
    pub fn set_pair(&mut self, pair: &str) {
        match pair.split_once('=') {
            Some((key, value)) => self.set(key, value),
            None => self.set(pair, ""),
        }
    }

    /// Parse an optional numeric option. An absent key is `None`; a
    /// present but malformed value is a configuration error.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, AgentError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| AgentError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_defaults() {
        let options = Options::parse("");
        assert_eq!(options.get("name"), Some("unknown"));
        assert_eq!(options.get("role"), Some("unknown"));
        assert_eq!(options.get("search"), None);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let options = Options::parse("name=bot role=black");
        assert_eq!(options.get("name"), Some("bot"));
        assert_eq!(options.get("role"), Some("black"));
    }

    #[test]
    fn test_later_duplicates_win() {
        let options = Options::parse("simulation=100 simulation=500");
        assert_eq!(options.get("simulation"), Some("500"));
    }

    #[test]
    fn test_splits_at_first_equals_only() {
        let options = Options::parse("note=a=b=c");
        assert_eq!(options.get("note"), Some("a=b=c"));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let options = Options::parse("flavor=spicy");
        assert_eq!(options.get("flavor"), Some("spicy"));
    }

    #[test]
    fn test_get_parsed() {
        let options = Options::parse("simulation=250 timeout=1.5");
        assert_eq!(options.get_parsed::<u32>("simulation").unwrap(), Some(250));
        assert_eq!(options.get_parsed::<f64>("timeout").unwrap(), Some(1.5));
        assert_eq!(options.get_parsed::<u32>("thread").unwrap(), None);

        let bad = options.get_parsed::<u32>("timeout");
        assert!(matches!(bad, Err(AgentError::InvalidValue { .. })));
    }

    #[test]
    fn test_set_pair() {
        let mut options = Options::parse("");
        options.set_pair("timeout=2.5");
        assert_eq!(options.get("timeout"), Some("2.5"));

        options.set_pair("timeout=0.5");
        assert_eq!(options.get("timeout"), Some("0.5"));
    }
}
