//! Navigable location strings.
//!
//! A location is a URL-like string `base?key=value&...`. Only the `chat_id`
//! parameter carries meaning here; other parameters are preserved untouched.

use std::borrow::Cow;
use std::fmt;

/// Query parameter that carries the active conversation id.
pub const CHAT_ID_PARAM: &str = "chat_id";

/// A parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    base: String,
    params: Vec<(String, String)>,
}

impl Location {
    /// Parse a location string. Never fails; malformed pairs are kept as
    /// keys with empty values.
    pub fn parse(raw: &str) -> Self {
        let (base, query) = match raw.split_once('?') {
            Some((base, query)) => (base, query),
            None => (raw, ""),
        };
        let query = query.split('#').next().unwrap_or_default();

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self {
            base: base.to_string(),
            params,
        }
    }

    /// The path portion before the query.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// First value of a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The active conversation id, ignoring empty values.
    pub fn chat_id(&self) -> Option<&str> {
        self.param(CHAT_ID_PARAM).filter(|id| !id.is_empty())
    }

    /// Replace (or remove, with `None`) the `chat_id` parameter.
    pub fn with_chat_id(mut self, chat_id: Option<&str>) -> Self {
        self.params.retain(|(k, _)| k != CHAT_ID_PARAM);
        if let Some(id) = chat_id {
            self.params.push((CHAT_ID_PARAM.to_string(), id.to_string()));
        }
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                sep,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => spaced,
    }
}
