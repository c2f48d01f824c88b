//! Placeholder tokens and the scanner that discovers them.
//!
//! A placeholder is `%` followed by one or more digits. Tokens are matched
//! greedily, so `%12` is its own placeholder and never an occurrence of `%1`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumIter, EnumString};

use crate::template::Template;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9]+").expect("valid regex"));

/// A numbered placeholder token such as `%1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder(String);

impl Placeholder {
    /// Parse a token. Returns `None` unless the whole string is `%` plus digits.
    pub fn parse(token: &str) -> Option<Self> {
        let digits = token.strip_prefix('%')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digits(&self) -> &str {
        &self.0[1..]
    }

    /// Byte offsets of every occurrence of this token in `text`
    pub fn occurrences<'a>(&'a self, text: &'a str) -> impl Iterator<Item = usize> + 'a {
        text.match_indices(self.as_str())
            .map(|(at, _)| at)
            .filter(move |at| {
                !text[at + self.0.len()..]
                    .bytes()
                    .next()
                    .is_some_and(|b| b.is_ascii_digit())
            })
    }

    /// True when `text` holds at least one occurrence of this token
    pub fn occurs_in(&self, text: &str) -> bool {
        self.occurrences(text).next().is_some()
    }

    /// Replace every occurrence in `text` with `value`. Not recursive: the
    /// inserted value is never rescanned.
    pub fn replace_in(&self, text: &str, value: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for at in self.occurrences(text) {
            out.push_str(&text[last..at]);
            out.push_str(value);
            last = at + self.0.len();
        }
        out.push_str(&text[last..]);
        out
    }

    /// Compare by the number after `%`, without overflow for long digit runs
    fn numeric_cmp(&self, other: &Self) -> Ordering {
        let a = self.digits().trim_start_matches('0');
        let b = other.digits().trim_start_matches('0');
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order in which placeholders are expanded, which fixes output numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlaceholderOrder {
    /// Order of first appearance, top to bottom, left to right
    #[default]
    FirstSeen,
    /// Ascending by placeholder number
    Numeric,
}

/// Collect the distinct placeholders of a template, comments included.
pub fn scan(template: &Template, order: PlaceholderOrder) -> Vec<Placeholder> {
    let mut found: Vec<Placeholder> = Vec::new();
    for line in template.lines() {
        for m in PLACEHOLDER_RE.find_iter(line) {
            if !found.iter().any(|p| p.as_str() == m.as_str()) {
                found.push(Placeholder(m.as_str().to_string()));
            }
        }
    }
    if order == PlaceholderOrder::Numeric {
        found.sort_by(Placeholder::numeric_cmp);
    }
    found
}
