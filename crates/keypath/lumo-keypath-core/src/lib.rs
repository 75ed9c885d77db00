//! Lumo key path core
//!
//! Addresses nodes of a composition content tree (layers, groups, shapes) with
//! key paths made of literal keys, the `*` wildcard (exactly one level) and the
//! `**` globstar (any number of levels). Resolved nodes can carry value
//! overrides that a player evaluates once per frame.

pub mod content;
pub mod element;
pub mod error;
pub mod key_path;
pub mod resolver;
pub mod value_override;

pub use content::{ContentKind, ContentNode};
pub use element::{is_container_key, KeyPathElement, CONTAINER_KEY};
pub use error::KeyPathError;
pub use key_path::{KeyPath, GLOBSTAR, WILDCARD};
pub use resolver::{resolve_key_path, ResolvedKeyPath};
pub use value_override::{
    FrameInfo, OverrideValue, Property, PropertyValue, ValueCallback, ValueOverride,
};

/// Key path result type
pub type Result<T> = core::result::Result<T, KeyPathError>;
