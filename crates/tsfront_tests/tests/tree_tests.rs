//! Whole-tree properties: child enumeration, parent links, node text and
//! error propagation.

use std::thread;

use tsfront_ast::{for_each_child, for_each_child_with_arrays, NodeData, SyntaxKind};
use tsfront_parser::{parse_source_file, parse_source_file_with_options, ParseOptions};
use tsfront_tests::{check_tree, kinds, nested_parens, FIXTURES};

#[test]
fn test_children_are_stable_across_walks() {
    for (file_name, source) in FIXTURES {
        let file = parse_source_file(file_name, source);
        for id in file.descendants() {
            assert_eq!(file.children(id), file.children(id), "{file_name}: {id}");
        }
    }
}

#[test]
fn test_for_each_child_stops_early() {
    let file = parse_source_file("a.ts", "f(a, b, c);");
    let call = file.descendants_of_kind(SyntaxKind::CallExpression)[0];
    let mut seen = 0;
    let found = for_each_child(&file.arena, call, |child| {
        seen += 1;
        (file.identifier_text(child) == Some("a")).then_some(child)
    });
    let found = found.unwrap();
    assert_eq!(file.get_text_of_node(found), "a");
    // The callee and the first argument.
    assert_eq!(seen, 2);
}

#[test]
fn test_for_each_child_with_arrays_sees_whole_lists() {
    let file = parse_source_file("a.ts", "f(a, b, c,);");
    let call = file.descendants_of_kind(SyntaxKind::CallExpression)[0];
    let mut lists = Vec::new();
    for_each_child_with_arrays(
        &file.arena,
        call,
        |_| None::<()>,
        |array| {
            lists.push((array.len(), array.has_trailing_comma));
            None
        },
    );
    assert_eq!(lists, vec![(3, true)]);
}

#[test]
fn test_yield_children_include_the_operand() {
    let file = parse_source_file("a.ts", "function* g() { yield x; yield* y; }");
    assert!(!file.has_parse_errors(), "{:?}", file.parse_diagnostics);
    let yields = file.descendants_of_kind(SyntaxKind::YieldExpression);
    assert_eq!(yields.len(), 2);
    let texts: Vec<&str> = file.children(yields[0]).into_iter().map(|id| file.get_text_of_node(id)).collect();
    assert_eq!(texts, ["x"]);
    let kinds: Vec<SyntaxKind> = file.children(yields[1]).into_iter().map(|id| file.kind(id)).collect();
    assert_eq!(kinds, [SyntaxKind::AsteriskToken, SyntaxKind::Identifier]);
    check_tree(&file).unwrap();
}

#[test]
fn test_import_clause_children_include_named_bindings() {
    let file = parse_source_file("a.ts", "import a, { b } from 'm';");
    assert!(!file.has_parse_errors(), "{:?}", file.parse_diagnostics);
    let clause = file.descendants_of_kind(SyntaxKind::ImportClause)[0];
    let kinds: Vec<SyntaxKind> = file.children(clause).into_iter().map(|id| file.kind(id)).collect();
    assert_eq!(kinds, [SyntaxKind::Identifier, SyntaxKind::NamedImports]);
    let named = file.descendants_of_kind(SyntaxKind::NamedImports)[0];
    assert_eq!(file.parent(named), Some(clause));
    assert_eq!(file.get_text_of_node(named), "{ b }");
}

#[test]
fn test_fixture_parent_links() {
    for (file_name, source) in FIXTURES {
        let file = parse_source_file(file_name, source);
        check_tree(&file).unwrap_or_else(|err| panic!("{file_name}: {err}"));
        assert_eq!(file.parent(file.root), None);
        for id in file.descendants() {
            assert_eq!(file.ancestors(id).last(), Some(file.root), "{file_name}: {id}");
        }
    }
}

#[test]
fn test_recovered_trees_stay_well_formed() {
    let broken = [
        "class C { m( { }",
        "let = ;",
        "function f(a, , b) {}",
        "if (x { y(); }",
        "const o = { a: , b };",
        "type T = { [K in ]: };",
        "import { from 'x';",
        "x = (a, b => ;",
    ];
    for source in broken {
        let file = parse_source_file("broken.ts", source);
        assert!(!file.parse_diagnostics.is_empty(), "{source}");
        check_tree(&file).unwrap_or_else(|err| panic!("{source}: {err}"));
    }
}

#[test]
fn test_node_text_round_trip() {
    let source = "const a = 1;\n// note\nfunction f() { return a; }\n";
    let file = parse_source_file("a.ts", source);
    let texts: Vec<&str> = file.statements().iter().map(|&id| file.get_text_of_node(id)).collect();
    assert_eq!(texts, vec!["const a = 1;", "function f() { return a; }"]);

    let joined: String = file
        .statements()
        .iter()
        .map(|&id| file.get_source_text_of_node(id))
        .chain(file.end_of_file_token().map(|id| file.get_source_text_of_node(id)))
        .collect();
    assert_eq!(joined, source);
}

#[test]
fn test_missing_type_is_flagged() {
    let file = parse_source_file("a.ts", "let x:");
    let declaration = file.descendants_of_kind(SyntaxKind::VariableDeclaration)[0];
    let NodeData::VariableLike(variable) = &file.node(declaration).data else {
        panic!("not a variable: {:?}", file.node(declaration).data);
    };
    let ty = variable.ty.unwrap();
    let node = file.node(ty);
    assert_eq!(node.pos, node.end);
    assert!(node.is_missing());
    assert!(node.has_error());
    assert!(file.contains_parse_error(file.root));
    assert!(!file.contains_parse_error(variable.name));
}

#[test]
fn test_parse_error_flag_is_local() {
    let file = parse_source_file("a.ts", "let ok = 1;\nlet bad = ;\n");
    let [ok, bad] = file.statements() else {
        panic!("expected two statements");
    };
    assert!(!file.contains_parse_error(*ok));
    assert!(file.contains_parse_error(*bad));
}

#[test]
fn test_deep_nesting_reports_instead_of_overflowing() {
    let source = nested_parens(10_000);
    let handle = thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || {
            let file = parse_source_file("deep.ts", &source);
            let root = file.node(file.root);
            (file.parse_diagnostics.len(), root.end, file.text.len())
        })
        .unwrap();
    let (diagnostics, end, len) = handle.join().unwrap();
    assert!(diagnostics > 0);
    assert_eq!(end, len);
}

#[test]
fn test_deep_jsx_reports_instead_of_overflowing() {
    let depth = 20_000;
    let source = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
    let handle = thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(move || {
            let file = parse_source_file("deep.tsx", &source);
            let root = file.node(file.root);
            (file.parse_diagnostics.len(), root.end, file.text.len())
        })
        .unwrap();
    let (diagnostics, end, len) = handle.join().unwrap();
    assert!(diagnostics > 0);
    assert_eq!(end, len);
}

#[test]
fn test_moderate_jsx_nesting_is_fine() {
    let source = format!("let e = {}{};", "<a>".repeat(50), "</a>".repeat(50));
    let file = parse_source_file("a.tsx", &source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(file.descendants_of_kind(SyntaxKind::JsxElement).len(), 50);
}

#[test]
fn test_moderate_nesting_is_fine() {
    let file = parse_source_file("a.ts", &nested_parens(50));
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(file.descendants_of_kind(SyntaxKind::ParenthesizedExpression).len(), 50);
}

#[test]
fn test_parses_are_deterministic() {
    for (file_name, source) in FIXTURES {
        let first = parse_source_file(file_name, source);
        let second = parse_source_file_with_options(file_name, source, ParseOptions::default()).unwrap();
        assert_eq!(kinds(&first), kinds(&second), "{file_name}");
    }
}

#[test]
fn test_node_classification() {
    let file = parse_source_file("a.ts", "let s = 'text' + f(1);\nif (s) {}\n");
    assert!(!file.has_parse_errors());
    for &statement in file.statements() {
        assert!(file.node(statement).is_statement(), "{:?}", file.kind(statement));
    }
    let literal = file.descendants_of_kind(SyntaxKind::StringLiteral)[0];
    assert_eq!(file.node(literal).literal_text(), Some("text"));
    let expressions: Vec<SyntaxKind> = file
        .descendants()
        .into_iter()
        .filter(|&id| file.node(id).is_expression())
        .map(|id| file.kind(id))
        .collect();
    assert!(expressions.contains(&SyntaxKind::BinaryExpression));
    assert!(expressions.contains(&SyntaxKind::CallExpression));
    assert!(!expressions.contains(&SyntaxKind::VariableDeclaration));

    let broken = parse_source_file("b.ts", "let = ;");
    assert!(broken.has_parse_errors());
}
