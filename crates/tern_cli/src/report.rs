//! Rendering parse results: miette reports for diagnostics and a JSON
//! dump of the tree.
//!
//! The dump is a flat preorder list with parent indices. A nested value
//! would be as deep as the tree, and both serializing and dropping it
//! recurse.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, Severity, SourceCode};
use serde::Serialize;
use tern_ast::{NodeId, ScriptKind, SourceFile};
use tern_core::LineMap;
use tern_diagnostics::{Diagnostic, DiagnosticCategory};

/// Char offsets to byte offsets for one text. Parser positions count chars;
/// miette spans count bytes.
pub struct ByteOffsets(Vec<usize>);

impl ByteOffsets {
    pub fn new(text: &str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        offsets.push(text.len());
        Self(offsets)
    }

    pub fn of(&self, char_pos: u32) -> usize {
        let last = self.0.len() - 1;
        self.0[(char_pos as usize).min(last)]
    }

    /// `(byte offset, byte length)` of a char span.
    pub fn span(&self, start: u32, length: u32) -> (usize, usize) {
        let from = self.of(start);
        (from, self.of(start.saturating_add(length)) - from)
    }
}

/// A parser diagnostic with its file's text attached, for miette.
#[derive(Debug)]
pub struct SyntaxReport {
    code: u32,
    category: DiagnosticCategory,
    message: String,
    source: NamedSource<String>,
    labels: Vec<LabeledSpan>,
}

impl SyntaxReport {
    pub fn new(file: &SourceFile, offsets: &ByteOffsets, diagnostic: &Diagnostic) -> Self {
        let (offset, len) = offsets.span(diagnostic.start(), diagnostic.length());
        let mut labels = vec![LabeledSpan::new(Some("here".to_string()), offset, len)];
        for related in &diagnostic.related_information {
            let (offset, len) = offsets.span(related.start(), related.length());
            labels.push(LabeledSpan::new(Some(related.message_text.clone()), offset, len));
        }
        Self {
            code: diagnostic.code,
            category: diagnostic.category,
            message: diagnostic.message_text.clone(),
            source: NamedSource::new(&file.file_name, file.text.clone()),
            labels,
        }
    }
}

impl fmt::Display for SyntaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SyntaxReport {}

impl MietteDiagnostic for SyntaxReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("TS{}", self.code)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.category {
            DiagnosticCategory::Error => Severity::Error,
            DiagnosticCategory::Warning => Severity::Warning,
            DiagnosticCategory::Suggestion | DiagnosticCategory::Message => Severity::Advice,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Print up to `limit` diagnostics of `file` to stderr.
pub fn print_diagnostics(file: &SourceFile, limit: usize) {
    if file.diagnostics.is_empty() {
        return;
    }
    let offsets = ByteOffsets::new(&file.text);
    for diagnostic in file.diagnostics.iter().take(limit) {
        let report = miette::Report::new(SyntaxReport::new(file, &offsets, diagnostic));
        eprintln!("{report:?}");
    }
    let hidden = file.diagnostics.len().saturating_sub(limit);
    if hidden > 0 {
        eprintln!("{}: {hidden} more diagnostics not shown", file.file_name);
    }
}

// ============================================================================
// JSON dump
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDump {
    pub file_name: String,
    pub script_kind: ScriptKind,
    pub node_count: usize,
    pub identifier_count: usize,
    pub is_external_module: bool,
    pub is_declaration_file: bool,
    pub diagnostics: Vec<DiagnosticDump>,
    pub tree: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticDump {
    pub start: u32,
    /// Zero-based, like `character`.
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    /// Index of the parent in the dump; `None` for the root.
    pub parent: Option<usize>,
    pub kind: String,
    pub pos: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl FileDump {
    pub fn new(file: &SourceFile) -> Self {
        let lines = LineMap::new(&file.text);
        Self {
            file_name: file.file_name.clone(),
            script_kind: file.script_kind,
            node_count: file.node_count,
            identifier_count: file.identifier_count,
            is_external_module: file.is_external_module(),
            is_declaration_file: file.is_declaration_file,
            diagnostics: file
                .diagnostics
                .iter()
                .map(|d| {
                    let at = lines.line_and_column_of(d.start());
                    DiagnosticDump {
                        start: d.start(),
                        line: at.line,
                        character: at.character,
                        length: d.length(),
                        code: d.code,
                        message: d.message_text.clone(),
                    }
                })
                .collect(),
            tree: dump_tree(file),
        }
    }
}

fn dump_tree(file: &SourceFile) -> Vec<NodeDump> {
    let arena = &file.arena;
    let mut dump = Vec::with_capacity(file.node_count);
    let mut stack: Vec<(NodeId, Option<usize>)> = vec![(file.root, None)];
    while let Some((id, parent)) = stack.pop() {
        let node = arena.node(id);
        let index = dump.len();
        dump.push(NodeDump {
            parent,
            kind: format!("{:?}", node.kind),
            pos: node.pos(),
            end: node.end(),
            text: arena.text_of(id).map(str::to_string),
        });
        stack.extend(arena.children(id).iter().rev().map(|&child| (child, Some(index))));
    }
    dump
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tern_parser::{parse_source_file, ParseOptions};

    #[test]
    fn test_byte_offsets_follow_chars() {
        let offsets = ByteOffsets::new("aé日b");
        assert_eq!(offsets.of(0), 0);
        assert_eq!(offsets.of(2), 3);
        assert_eq!(offsets.of(3), 6);
        assert_eq!(offsets.of(4), 7);
        assert_eq!(offsets.of(99), 7);
        assert_eq!(offsets.span(1, 2), (1, 5));
    }

    #[test]
    fn test_report_carries_code_and_labels() {
        let file = parse_source_file("a.ts", "{ x;", ParseOptions::default());
        let offsets = ByteOffsets::new(&file.text);
        let report = SyntaxReport::new(&file, &offsets, &file.diagnostics[0]);
        assert_eq!(report.code().map(|c| c.to_string()), Some("TS1005".to_string()));
        assert_eq!(report.severity(), Some(Severity::Error));
        // The missing '}' and the '{' it should close.
        assert_eq!(report.labels().map(|l| l.count()), Some(2));
    }

    #[test]
    fn test_dump_shape() {
        let file = parse_source_file("a.ts", "x;", ParseOptions::default());
        let dump = FileDump::new(&file);
        assert_eq!(dump.tree[0].kind, "SourceFile");
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["fileName"], "a.ts");
        assert_eq!(json["scriptKind"], "TS");
        let statement = &json["tree"][1];
        assert_eq!(statement["kind"], "ExpressionStatement");
        assert_eq!(statement["parent"], 0);
        assert_eq!(json["tree"][2]["text"], "x");
        assert_eq!(json["tree"][2]["parent"], 1);
    }

    #[test]
    fn test_dump_of_a_long_chain() {
        let text = format!("x = {}a;", "a+".repeat(100_000));
        let file = parse_source_file("a.ts", &text, ParseOptions::default());
        let dump = FileDump::new(&file);
        assert_eq!(dump.tree.len(), file.node_count);
        let last = dump.tree.iter().rev().find(|node| node.kind == "Identifier").unwrap();
        assert_eq!(last.text.as_deref(), Some("a"));
        assert_eq!(last.end as usize, text.len() - 1);
        assert!(serde_json::to_string(&dump).is_ok());
    }

    #[test]
    fn test_dump_locates_diagnostics() {
        let file = parse_source_file("a.ts", "x;
let y = ;", ParseOptions::default());
        let dump = FileDump::new(&file);
        assert_eq!(dump.diagnostics.len(), 1);
        let diagnostic = &dump.diagnostics[0];
        assert_eq!((diagnostic.line, diagnostic.character), (1, 8));
        assert_eq!(diagnostic.code, 1109);
    }
}
