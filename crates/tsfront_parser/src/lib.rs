//! tsfront_parser: TypeScript and TSX parser.
//!
//! Turns source text into an arena-allocated syntax tree plus parse
//! diagnostics. Syntax errors never stop a parse; the tree always covers
//! the whole file.

mod batch;
pub mod directives;
mod error;
pub mod jsdoc;
mod options;
mod parser;
mod precedence;
mod source_file;
mod utilities;

pub use batch::parse_source_files;
pub use error::ParseError;
pub use options::ParseOptions;
pub use parser::Parser;
pub use source_file::SourceFile;

use tsfront_ast::types::NodeId;

/// Parse a file with default options.
pub fn parse_source_file(file_name: &str, text: &str) -> SourceFile {
    Parser::new(file_name, text, ParseOptions::default()).parse_source_file()
}

pub fn parse_source_file_with_options(
    file_name: &str,
    text: &str,
    options: ParseOptions,
) -> Result<SourceFile, ParseError> {
    Parser::new(file_name, text, options).try_parse_source_file()
}

/// Parse raw bytes, which must be UTF-8.
pub fn parse_source_bytes(file_name: &str, bytes: &[u8], options: ParseOptions) -> Result<SourceFile, ParseError> {
    let text = simdutf8::basic::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8 {
        file_name: file_name.to_string(),
    })?;
    Parser::new(file_name, text, options).try_parse_source_file()
}

/// Parse `text` as a single, possibly dotted, name. `None` unless the whole
/// text is that name and it parsed cleanly.
pub fn parse_isolated_entity_name(text: &str) -> Option<(SourceFile, NodeId)> {
    let options = ParseOptions {
        set_parent_nodes: false,
        collect_jsdoc: false,
        process_reference_directives: false,
        ..ParseOptions::default()
    };
    Parser::new("entity.ts", text, options).parse_isolated_entity_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_path::ScriptKind;

    #[test]
    fn test_parse_source_bytes() {
        let file = parse_source_bytes("a.ts", "let π = 1;".as_bytes(), ParseOptions::default()).unwrap();
        assert!(file.parse_diagnostics.is_empty());

        let err = parse_source_bytes("bad.ts", &[b'l', 0xff, 0xfe], ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::InvalidUtf8 { file_name: "bad.ts".to_string() });
    }

    #[test]
    fn test_isolated_entity_name() {
        let (file, name) = parse_isolated_entity_name("a.b.c").unwrap();
        assert_eq!(file.kind(name), SyntaxKind::QualifiedName);
        assert_eq!(file.get_text_of_node(name), "a.b.c");

        assert!(parse_isolated_entity_name("a.").is_none());
        assert!(parse_isolated_entity_name("a b").is_none());
    }

    #[test]
    fn test_options_pick_the_language() {
        let options = ParseOptions::default().with_script_kind(ScriptKind::Tsx);
        let file = parse_source_file_with_options("component.ts", "<div />;", options).unwrap();
        assert!(file.parse_diagnostics.is_empty());
        assert_eq!(file.descendants_of_kind(SyntaxKind::JsxSelfClosingElement).len(), 1);

        let file = parse_source_file("lib.d.ts", "declare const a: number;");
        assert!(file.is_declaration_file);
    }

    #[test]
    fn test_file_name_is_normalized() {
        let file = parse_source_file("src\\util\\..\\types.d.ts", "let a = ;");
        assert_eq!(file.file_name, "src/types.d.ts");
        assert!(file.is_declaration_file);
        assert_eq!(file.parse_diagnostics[0].file.as_deref(), Some("src/types.d.ts"));
    }

    #[test]
    fn test_skipping_parent_links() {
        let options = ParseOptions { set_parent_nodes: false, ..ParseOptions::default() };
        let file = parse_source_file_with_options("a.ts", "a + b;", options).unwrap();
        let identifier = file.descendants_of_kind(SyntaxKind::Identifier)[0];
        assert_eq!(file.parent(identifier), None);
    }
}
