//! Shared JSON fixtures for the lumo crates.
//!
//! Fixtures are listed in `fixtures/manifest.json` at the workspace root and
//! loaded by name, so tests in every crate agree on the same content trees and
//! player configurations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    trees: HashMap<String, TreeEntry>,
    players: HashMap<String, String>,
}

/// A content tree fixture plus the node count `[**]` is expected to resolve to.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        addressable_nodes: Option<usize>,
    },
}

impl TreeEntry {
    fn rel_path(&self) -> &str {
        match self {
            TreeEntry::Path(path) | TreeEntry::Detailed { path, .. } => path,
        }
    }
}

fn on_disk(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel)
}

fn read_fixture(rel: &str) -> Result<String> {
    let path = on_disk(rel);
    fs::read_to_string(&path).with_context(|| format!("cannot read fixture {}", path.display()))
}

fn tree_entry(name: &str) -> Result<&'static TreeEntry> {
    MANIFEST
        .trees
        .get(name)
        .ok_or_else(|| anyhow!("no tree fixture named '{name}'"))
}

fn player_path(name: &str) -> Result<&'static str> {
    MANIFEST
        .players
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("no player fixture named '{name}'"))
}

pub mod trees {
    use super::*;

    /// Deserialize the named content tree.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = tree_entry(name)?.rel_path();
        let text = read_fixture(rel)?;
        serde_json::from_str(&text).with_context(|| format!("tree fixture {rel} is not valid"))
    }

    /// Number of non-container nodes in the tree, when the manifest records it.
    pub fn addressable_nodes(name: &str) -> Result<Option<usize>> {
        Ok(match tree_entry(name)? {
            TreeEntry::Path(_) => None,
            TreeEntry::Detailed {
                addressable_nodes, ..
            } => *addressable_nodes,
        })
    }
}

pub mod players {
    use super::*;

    /// Raw JSON of the named player config.
    pub fn json(name: &str) -> Result<String> {
        read_fixture(player_path(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entries_exist_on_disk() {
        for entry in MANIFEST.trees.values() {
            let path = on_disk(entry.rel_path());
            assert!(path.exists(), "missing tree fixture {}", path.display());
        }
        for name in MANIFEST.players.keys() {
            players::json(name).unwrap();
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = trees::load::<serde_json::Value>("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
        assert!(players::json("nope").is_err());
    }
}
