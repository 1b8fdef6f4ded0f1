// Todo record: one parsed line of the store
// Content hash is the only external identifier - there is no numeric ID

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use super::common::TodoState;
use super::recurrence::Recurrence;
use crate::error::TodoError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One todo record.
///
/// Stored line layout:
/// `[x <completionDate> ][(<priority>) ][<creationDate> ]<text with key:value tags>`
///
/// Parsing is total - any line yields a record - and `serialize` produces the
/// canonical form of that line: tags are re-emitted after the free text in
/// first-seen order, so `serialize(parse(line))` re-parses to an identical
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    state: TodoState,
    priority: Option<char>,
    created: Option<NaiveDate>,
    completed: Option<NaiveDate>,
    text: String,
    tags: IndexMap<String, String>,
}

impl Todo {
    /// Parse a stored line (or user-supplied text) into a record. Never fails.
    pub fn parse(line: &str) -> Self {
        let mut rest = line.trim();

        let mut state = TodoState::Pending;
        let mut completed = None;
        if let Some(after) = rest.strip_prefix("x ") {
            state = TodoState::Done;
            rest = after.trim_start();
            if let Some((token, tail)) = split_token(rest) {
                if let Ok(date) = NaiveDate::parse_from_str(token, DATE_FORMAT) {
                    completed = Some(date);
                    rest = tail;
                }
            }
        }

        let mut priority = None;
        if let Some((token, tail)) = split_token(rest) {
            if let Some(p) = parse_priority(token) {
                priority = Some(p);
                rest = tail;
            }
        }

        let mut created = None;
        if let Some((token, tail)) = split_token(rest) {
            if let Ok(date) = NaiveDate::parse_from_str(token, DATE_FORMAT) {
                created = Some(date);
                rest = tail;
            }
        }

        let (text, tags) = scan_tags(rest);

        Self { state, priority, created, completed, text, tags }
    }

    /// Canonical store line for this record. Deterministic and total.
    pub fn serialize(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.state == TodoState::Done {
            parts.push("x".to_string());
            if let Some(date) = self.completed {
                parts.push(date.format(DATE_FORMAT).to_string());
            }
        }
        if let Some(p) = self.priority {
            parts.push(format!("({p})"));
        }
        if let Some(date) = self.created {
            parts.push(date.format(DATE_FORMAT).to_string());
        }
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        for (key, value) in &self.tags {
            parts.push(format!("{key}:{value}"));
        }
        parts.join(" ")
    }

    /// Short content hash over the canonical serialization.
    ///
    /// Identical content always yields the same hash; any text change yields
    /// a different one. Pure, safe to call concurrently.
    pub fn hash(&self) -> String {
        let digest = Sha256::digest(self.serialize().as_bytes());
        digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
    }

    pub fn state(&self) -> TodoState {
        self.state
    }

    /// Free text without tags
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Option<char> {
        self.priority
    }

    pub fn created(&self) -> Option<NaiveDate> {
        self.created
    }

    pub fn completed(&self) -> Option<NaiveDate> {
        self.completed
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Replace the free text, re-deriving tags from the new text. State,
    /// priority and dates are untouched.
    pub fn set_text(&mut self, text: &str) {
        let (text, tags) = scan_tags(text);
        self.text = text;
        self.tags = tags;
    }

    /// Set the `rec` tag from a `<count><d|w|m|y>` spec.
    ///
    /// A malformed spec fails with a validation error and leaves the record
    /// unchanged. The due date is not touched here.
    pub fn set_recurrence(&mut self, spec: &str) -> Result<(), TodoError> {
        let rec: Recurrence = spec.parse()?;
        self.tags.insert("rec".to_string(), rec.to_string());
        Ok(())
    }

    /// Flip between pending and done.
    ///
    /// Completing sets the completion date to today; reopening clears it.
    /// Completing a record with a well-formed `rec` tag returns the next
    /// occurrence: a pending clone without completion date, due today plus
    /// the recurrence offset, all tags (including `rec`) retained. Persisting
    /// both records is the caller's job.
    pub fn toggle_state(&mut self) -> Option<Todo> {
        match self.state {
            TodoState::Done => {
                self.state = TodoState::Pending;
                self.completed = None;
                None
            }
            TodoState::Pending => {
                let today = Local::now().date_naive();
                self.state = TodoState::Done;
                self.completed = Some(today);

                let rec: Recurrence = self.tag("rec")?.parse().ok()?;
                let mut next = self.clone();
                next.state = TodoState::Pending;
                next.completed = None;
                next.tags.insert(
                    "due".to_string(),
                    rec.next_due(today).format(DATE_FORMAT).to_string(),
                );
                Some(next)
            }
        }
    }

    /// Human-facing rendering used in list output and confirmation messages.
    /// Unlike `serialize`, state marker and dates are omitted.
    pub fn to_display_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(p) = self.priority {
            parts.push(format!("({p})"));
        }
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        for (key, value) in &self.tags {
            parts.push(format!("{key}:{value}"));
        }
        parts.join(" ")
    }
}

/// Split off the first whitespace-delimited token
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(' ') {
        Some((token, tail)) => Some((token, tail)),
        None => Some((s, "")),
    }
}

/// `(A)` through `(Z)`
fn parse_priority(token: &str) -> Option<char> {
    let inner = token.strip_prefix('(')?.strip_suffix(')')?;
    let mut chars = inner.chars();
    let p = chars.next()?;
    (chars.next().is_none() && p.is_ascii_uppercase()).then_some(p)
}

/// Split text into free words and `key:value` tags, tags in first-seen order.
/// A tag token has exactly one colon and a non-empty alphanumeric key; a
/// duplicate key overwrites the value in place.
fn scan_tags(s: &str) -> (String, IndexMap<String, String>) {
    let mut words: Vec<&str> = Vec::new();
    let mut tags = IndexMap::new();
    for token in s.split_whitespace() {
        match parse_tag(token) {
            Some((key, value)) => {
                tags.insert(key.to_string(), value.to_string());
            }
            None => words.push(token),
        }
    }
    (words.join(" "), tags)
}

fn parse_tag(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once(':')?;
    if key.is_empty() || value.contains(':') {
        return None;
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((key, value))
}
