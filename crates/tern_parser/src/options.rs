//! Parse configuration.

use serde::{Deserialize, Serialize};
use tern_ast::{LanguageVariant, ScriptKind};

/// Whether top-level code is a classic script or an ES module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    #[default]
    Script,
    /// Enables top-level `await`.
    Module,
}

/// Options for one parse. Every field has a default, so a partial JSON
/// object deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// [`ScriptKind::Unknown`] derives the kind from the file name.
    pub script_kind: ScriptKind,
    pub source_type: SourceType,
    /// Fill parent links after parsing.
    pub set_parent_nodes: bool,
}

impl ParseOptions {
    pub fn with_script_kind(mut self, script_kind: ScriptKind) -> Self {
        self.script_kind = script_kind;
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_parent_nodes(mut self, set_parent_nodes: bool) -> Self {
        self.set_parent_nodes = set_parent_nodes;
        self
    }

    /// The concrete script kind for `file_name`.
    pub fn resolved_script_kind(&self, file_name: &str) -> ScriptKind {
        self.script_kind.ensure(file_name)
    }

    pub fn language_variant(&self, file_name: &str) -> LanguageVariant {
        self.resolved_script_kind(file_name).language_variant()
    }
}
