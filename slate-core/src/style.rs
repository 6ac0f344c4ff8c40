//! Optional inline-style presentation layer.
//!
//! Styling is kept out of the content-rendering contract: an unstyled
//! [`crate::render::Renderer`] is the canonical output, and a [`StyleSheet`]
//! only decorates the root element of each block kind it has rules for.

use std::collections::{BTreeMap, HashMap};

use crate::content::BlockKind;
use crate::node::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Parse `"prop: value; prop: value"` into declarations.
///
/// Empty declarations are skipped. Only the first colon separates property
/// from value, so values such as `url(http://x)` survive intact. Fragments
/// without a colon are dropped.
pub fn parse_declarations(css: &str) -> Vec<Declaration> {
    css.split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property: property.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: BTreeMap<BlockKind, Vec<Declaration>>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[styles]` configuration table. Keys name block kinds;
    /// unrecognized keys are logged and ignored.
    pub fn from_config(table: &HashMap<String, String>) -> Self {
        let mut sheet = Self::new();
        for (key, css) in table {
            match BlockKind::from_tag(key) {
                Some(kind) => sheet.set(kind, css),
                None => tracing::warn!(key = %key, "Ignoring style rule for unknown block type"),
            }
        }
        sheet
    }

    pub fn set(&mut self, kind: BlockKind, css: &str) {
        let declarations = parse_declarations(css);
        if declarations.is_empty() {
            self.rules.remove(&kind);
        } else {
            self.rules.insert(kind, declarations);
        }
    }

    pub fn with_rule(mut self, kind: BlockKind, css: &str) -> Self {
        self.set(kind, css);
        self
    }

    pub fn rule(&self, kind: BlockKind) -> Option<&[Declaration]> {
        self.rules.get(&kind).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialized `style` attribute value for a block kind.
    pub fn inline_style(&self, kind: BlockKind) -> Option<String> {
        self.rule(kind).map(|decls| {
            decls
                .iter()
                .map(|d| format!("{}: {}", d.property, d.value))
                .collect::<Vec<_>>()
                .join("; ")
        })
    }

    pub fn apply(&self, kind: BlockKind, element: &mut Element) {
        if let Some(style) = self.inline_style(kind) {
            element.set_attr("style", style);
        }
    }
}
