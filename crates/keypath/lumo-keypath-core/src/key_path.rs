//! KeyPath: an ordered list of segments addressing nodes of a content tree.
//!
//! Textual form (for hosts and config files):
//!   "Shape Layer 1.Group 1.*.Fill"  -> ["Shape Layer 1", "Group 1", "*", "Fill"]
//!   "**.Stroke"                       -> ["**", "Stroke"]
//! - '.' separates segments; segments may contain spaces but must not be empty
//! - `*` matches exactly one level, `**` matches zero or more levels
//!
//! The matching predicates below are evaluated per (node key, depth) pair while
//! the resolver walks the tree. `depth` indexes the segment that the node at
//! hand is compared against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::element::is_container_key;
use crate::error::KeyPathError;

/// Single-level wildcard segment.
pub const WILDCARD: &str = "*";
/// Multi-level wildcard segment.
pub const GLOBSTAR: &str = "**";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Construct a KeyPath from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A KeyPath without segments (the starting point of a resolution walk).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the `.`-separated textual form.
    pub fn parse(s: &str) -> Result<Self, KeyPathError> {
        if s.is_empty() {
            return Err(KeyPathError::EmptyPath);
        }
        let mut segments = Vec::new();
        for (index, segment) in s.split('.').enumerate() {
            if segment.is_empty() {
                return Err(KeyPathError::EmptySegment { index });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Return a new KeyPath with `key` appended. `self` is left untouched.
    #[must_use]
    pub fn add_key(&self, key: impl Into<String>) -> KeyPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.into());
        KeyPath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segment at `depth`, or `None` past the end.
    pub fn segment(&self, depth: usize) -> Option<&str> {
        self.segments.get(depth).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when any segment is `*` or `**`.
    pub fn has_wildcards(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s == WILDCARD || s == GLOBSTAR)
    }

    fn is_globstar_at(&self, depth: usize) -> bool {
        self.segment(depth) == Some(GLOBSTAR)
    }

    fn ends_with_globstar(&self) -> bool {
        self.segments.last().is_some_and(|s| s == GLOBSTAR)
    }

    /// Whether a node with `key` at `depth` can be part of a match.
    pub fn matches(&self, key: &str, depth: usize) -> bool {
        if is_container_key(key) {
            return true;
        }
        match self.segment(depth) {
            Some(segment) => segment == key || segment == WILDCARD || segment == GLOBSTAR,
            None => false,
        }
    }

    /// How far `depth` advances when descending below a node with `key`.
    ///
    /// A globstar stays open (0) unless the node also satisfies the literal
    /// after it, in which case both segments are consumed at once (2).
    pub fn increment_depth_by(&self, key: &str, depth: usize) -> usize {
        if is_container_key(key) {
            return 0;
        }
        if !self.is_globstar_at(depth) {
            return 1;
        }
        match self.segment(depth + 1) {
            None => 0,
            Some(next) if next == key => 2,
            Some(_) => 0,
        }
    }

    /// Whether a node with `key` at `depth` is a terminal match of the whole path.
    pub fn fully_resolves_to(&self, key: &str, depth: usize) -> bool {
        let len = self.segments.len();
        let Some(segment) = self.segment(depth) else {
            return false;
        };
        let is_last = depth + 1 == len;

        if segment != GLOBSTAR {
            let matches = segment == key || segment == WILDCARD;
            let only_trailing_globstar_left = depth + 2 == len && self.ends_with_globstar();
            return matches && (is_last || only_trailing_globstar_left);
        }

        if !is_last && self.segment(depth + 1) == Some(key) {
            // The literal after the globstar is satisfied by this node too.
            return depth + 2 == len || (depth + 3 == len && self.ends_with_globstar());
        }

        if is_last {
            return true;
        }
        if depth + 2 < len {
            // More than one segment left after the globstar.
            return false;
        }
        self.segment(depth + 1) == Some(key)
    }

    /// Whether the walk should continue into the children of a node with `key`.
    pub fn propagate_to_children(&self, key: &str, depth: usize) -> bool {
        if is_container_key(key) {
            return true;
        }
        depth + 1 < self.segments.len() || self.is_globstar_at(depth)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeyPath::new(iter)
    }
}
