//! URI-keyed extension trees.
//!
//! FHIR extensions are an open-ended attribute mechanism layered on the fixed
//! base schema: every element may carry a list of URI-keyed nodes, each
//! holding either a scalar value or a list of child nodes. This module models
//! that as a tagged variant ([`ExtensionValue`]) so codecs never need runtime
//! type inspection, and provides the tree primitives ([`ExtensionHost`]) that
//! the profile codecs are built on.
//!
//! Semantics:
//! - A host may hold multiple nodes with the same URL; reads return the first
//!   or all matches in insertion order.
//! - `set_extension` is a singleton replace (remove all, then insert one) for
//!   fields profiled as 1..1.
//! - `add_extension` appends without any dedup check; dedup policy belongs to
//!   the calling codec, not the tree.
//! - Absence is never an error: reads return `None` / empty.

use serde::{Deserialize, Serialize};

use crate::types::Coding;

/// The payload of an extension node: a scalar value or nested children.
///
/// Serialises to the FHIR choice-type wire form (`valueCode`, `valueString`,
/// `valueCoding`) or to a nested `extension` array for complex extensions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ExtensionValue {
    /// A terminology-bound code without an explicit system (FHIR `code`).
    #[serde(rename = "valueCode")]
    Code(String),

    /// Free text (FHIR `string`).
    #[serde(rename = "valueString")]
    Text(String),

    /// A full coding triple.
    #[serde(rename = "valueCoding")]
    Coding(Coding),

    /// Child extension nodes of a complex extension.
    #[serde(rename = "extension")]
    Children(Vec<Extension>),
}

/// A single URI-keyed extension node.
///
/// The value is flattened on the wire so the JSON matches FHIR:
/// `{"url": "...", "valueCode": "F"}` or `{"url": "...", "extension": [...]}`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Extension {
    pub url: String,

    #[serde(flatten)]
    pub value: ExtensionValue,
}

impl Extension {
    /// Create an extension node carrying a scalar value.
    pub fn new(url: impl Into<String>, value: ExtensionValue) -> Self {
        Extension {
            url: url.into(),
            value,
        }
    }

    /// Create a complex extension node with no children yet.
    pub fn parent(url: impl Into<String>) -> Self {
        Extension {
            url: url.into(),
            value: ExtensionValue::Children(Vec::new()),
        }
    }

    /// The coding payload, if this node holds one.
    pub fn as_coding(&self) -> Option<&Coding> {
        match &self.value {
            ExtensionValue::Coding(coding) => Some(coding),
            _ => None,
        }
    }

    /// The code payload, if this node holds one.
    pub fn as_code(&self) -> Option<&str> {
        match &self.value {
            ExtensionValue::Code(code) => Some(code),
            _ => None,
        }
    }

    /// The text payload, if this node holds one.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            ExtensionValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An element that owns a list of extension nodes.
///
/// Implementors supply the backing list; all tree operations are provided.
pub trait ExtensionHost {
    /// The node list, insertion order.
    fn extensions(&self) -> &[Extension];

    /// Mutable access to the node list.
    fn extensions_mut(&mut self) -> &mut Vec<Extension>;

    /// First node with the given URL, `None` when absent.
    fn extension(&self, url: &str) -> Option<&Extension> {
        self.extensions().iter().find(|ext| ext.url == url)
    }

    /// Mutable variant of [`ExtensionHost::extension`].
    fn extension_mut(&mut self, url: &str) -> Option<&mut Extension> {
        self.extensions_mut().iter_mut().find(|ext| ext.url == url)
    }

    /// All nodes with the given URL, insertion order preserved.
    fn extensions_with_url(&self, url: &str) -> Vec<&Extension> {
        self.extensions()
            .iter()
            .filter(|ext| ext.url == url)
            .collect()
    }

    /// Whether at least one node with the given URL exists.
    fn has_extension(&self, url: &str) -> bool {
        self.extension(url).is_some()
    }

    /// Singleton replace: remove all nodes with this URL, then insert one.
    fn set_extension(&mut self, url: &str, value: ExtensionValue) {
        self.remove_extension(url);
        self.extensions_mut().push(Extension::new(url, value));
    }

    /// Append a node without checking for duplicates.
    fn add_extension(&mut self, url: &str, value: ExtensionValue) {
        self.extensions_mut().push(Extension::new(url, value));
    }

    /// Remove all nodes with the given URL. No-op when none exist.
    fn remove_extension(&mut self, url: &str) {
        self.extensions_mut().retain(|ext| ext.url != url);
    }
}

const NO_CHILDREN: &[Extension] = &[];

/// Extensions nest: a complex extension hosts its own children.
///
/// Reading children of a scalar-valued node yields the empty slice; the
/// first mutation promotes the value to `Children`.
impl ExtensionHost for Extension {
    fn extensions(&self) -> &[Extension] {
        match &self.value {
            ExtensionValue::Children(children) => children,
            _ => NO_CHILDREN,
        }
    }

    fn extensions_mut(&mut self) -> &mut Vec<Extension> {
        if !matches!(self.value, ExtensionValue::Children(_)) {
            self.value = ExtensionValue::Children(Vec::new());
        }
        match &mut self.value {
            ExtensionValue::Children(children) => children,
            _ => unreachable!("value promoted to Children above"),
        }
    }
}
