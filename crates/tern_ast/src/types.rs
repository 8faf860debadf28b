//! Flag types and file-level enums for the syntax tree.

use serde::{Deserialize, Serialize};

use crate::syntax_kind::SyntaxKind;

bitflags::bitflags! {
    /// Flags stored on every node.
    ///
    /// The bits in [`NodeFlags::CONTEXT_FLAGS`] record the parse context that
    /// was active when the node was finished; incremental reuse compares them
    /// against the context at the reuse site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        const USING                         = 1 << 2;
        const AWAIT_USING                   = 1 << 3;
        const NESTED_NAMESPACE              = 1 << 4;
        const NAMESPACE                     = 1 << 5;
        const OPTIONAL_CHAIN                = 1 << 6;
        const GLOBAL_AUGMENTATION           = 1 << 7;
        const DISALLOW_IN_CONTEXT           = 1 << 8;
        const YIELD_CONTEXT                 = 1 << 9;
        const DECORATOR_CONTEXT             = 1 << 10;
        const AWAIT_CONTEXT                 = 1 << 11;
        const DISALLOW_CONDITIONAL_TYPES_CONTEXT = 1 << 12;
        const THIS_NODE_HAS_ERROR           = 1 << 13;
        const JAVASCRIPT_FILE               = 1 << 14;
        const THIS_NODE_OR_ANY_SUB_NODES_HAS_ERROR = 1 << 15;
        const IN_WITH_STATEMENT             = 1 << 16;
        const AMBIENT                       = 1 << 17;
        const JSDOC                         = 1 << 18;
        /// Set by the incremental engine on nodes touched by an edit.
        const INTERSECTS_CHANGE             = 1 << 19;
        const POSSIBLY_CONTAINS_IMPORT_META = 1 << 20;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits() | Self::USING.bits() | Self::AWAIT_USING.bits();

        const CONTEXT_FLAGS = Self::DISALLOW_IN_CONTEXT.bits()
            | Self::YIELD_CONTEXT.bits()
            | Self::DECORATOR_CONTEXT.bits()
            | Self::AWAIT_CONTEXT.bits()
            | Self::DISALLOW_CONDITIONAL_TYPES_CONTEXT.bits()
            | Self::JAVASCRIPT_FILE.bits()
            | Self::IN_WITH_STATEMENT.bits()
            | Self::AMBIENT.bits();
    }
}

bitflags::bitflags! {
    /// Modifier flags for declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ACCESSOR          = 1 << 7;
        const ABSTRACT          = 1 << 8;
        const ASYNC             = 1 << 9;
        const DEFAULT           = 1 << 10;
        const CONST             = 1 << 11;
        const OVERRIDE          = 1 << 12;
        const IN                = 1 << 13;
        const OUT               = 1 << 14;
        const DECORATOR         = 1 << 15;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits() | Self::OVERRIDE.bits();
        const EXPORT_DEFAULT = Self::EXPORT.bits() | Self::DEFAULT.bits();
    }
}

impl ModifierFlags {
    /// The flag contributed by a modifier token, or by a decorator node.
    pub fn from_modifier_kind(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::InKeyword => ModifierFlags::IN,
            SyntaxKind::OutKeyword => ModifierFlags::OUT,
            SyntaxKind::Decorator => ModifierFlags::DECORATOR,
            _ => ModifierFlags::NONE,
        }
    }
}

bitflags::bitflags! {
    /// Flags the scanner attaches to the current token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const PRECEDING_JSDOC_COMMENT           = 1 << 1;
        const UNTERMINATED                      = 1 << 2;
        const EXTENDED_UNICODE_ESCAPE           = 1 << 3;
        const SCIENTIFIC                        = 1 << 4;
        const OCTAL                             = 1 << 5;
        const HEX_SPECIFIER                     = 1 << 6;
        const BINARY_SPECIFIER                  = 1 << 7;
        const OCTAL_SPECIFIER                   = 1 << 8;
        const CONTAINS_SEPARATOR                = 1 << 9;
        const UNICODE_ESCAPE                    = 1 << 10;
        const CONTAINS_INVALID_ESCAPE           = 1 << 11;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

/// Language variant (standard vs JSX).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguageVariant {
    #[default]
    Standard,
    #[serde(rename = "JSX")]
    Jsx,
}

/// The grammar dialect a file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScriptKind {
    /// Derive the kind from the file extension.
    #[default]
    Unknown,
    JS,
    JSX,
    TS,
    TSX,
}

impl ScriptKind {
    /// Kind implied by a file name's extension. Unrecognized extensions
    /// parse as TypeScript.
    pub fn from_file_name(file_name: &str) -> ScriptKind {
        let lower = file_name.to_ascii_lowercase();
        let ext = match lower.rfind('.') {
            Some(dot) => &lower[dot..],
            None => "",
        };
        match ext {
            ".js" | ".cjs" | ".mjs" => ScriptKind::JS,
            ".jsx" => ScriptKind::JSX,
            ".tsx" => ScriptKind::TSX,
            _ => ScriptKind::TS,
        }
    }

    /// Resolve [`ScriptKind::Unknown`] against a file name.
    pub fn ensure(self, file_name: &str) -> ScriptKind {
        match self {
            ScriptKind::Unknown => ScriptKind::from_file_name(file_name),
            kind => kind,
        }
    }

    /// JavaScript files and every JSX-capable dialect use the JSX variant.
    pub fn language_variant(self) -> LanguageVariant {
        match self {
            ScriptKind::TSX | ScriptKind::JSX | ScriptKind::JS => LanguageVariant::Jsx,
            ScriptKind::TS | ScriptKind::Unknown => LanguageVariant::Standard,
        }
    }

    pub fn is_javascript(self) -> bool {
        matches!(self, ScriptKind::JS | ScriptKind::JSX)
    }
}

/// Whether a file name denotes a declaration file (`.d.ts`, `.d.mts`, `.d.cts`).
pub fn is_declaration_file_name(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".d.ts") || lower.ends_with(".d.mts") || lower.ends_with(".d.cts")
}
