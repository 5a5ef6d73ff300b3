//! Parser integration tests.
//!
//! Parses whole snippets through the public API and checks the statement
//! list, node kinds and diagnostics.

use indoc::indoc;
use tsfront_ast::{NodeData, SyntaxKind};
use tsfront_parser::{parse_source_file, SourceFile};

fn parse(source: &str) -> SourceFile {
    parse_source_file("test.ts", source)
}

/// Parses cleanly into the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "source: {source}\n{:?}", file.parse_diagnostics);
    assert_eq!(file.statements().len(), expected, "source: {source}");
}

fn first_kind(source: &str) -> SyntaxKind {
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "source: {source}\n{:?}", file.parse_diagnostics);
    file.kind(file.statements()[0])
}

fn messages(source: &str) -> Vec<String> {
    parse(source).parse_diagnostics.into_iter().map(|d| d.message_text).collect()
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_variable_declarations() {
    assert_statement_count("const x = 42;", 1);
    assert_statement_count("let y = 'hello';", 1);
    assert_statement_count("var z = true;", 1);
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
    assert_statement_count("const x: number = 42;", 1);
}

#[test]
fn test_parse_destructuring_declarations() {
    assert_statement_count("const { a, b: [c, ...d], e = 1 } = obj;", 1);
    let file = parse("let [x, , y] = z;");
    assert_eq!(file.descendants_of_kind(SyntaxKind::OmittedExpression).len(), 1);
    assert_eq!(file.descendants_of_kind(SyntaxKind::ArrayBindingPattern).len(), 1);
}

// ============================================================================
// Functions and Classes
// ============================================================================

#[test]
fn test_parse_functions() {
    assert_eq!(first_kind("function foo() {}"), SyntaxKind::FunctionDeclaration);
    assert_statement_count("function add(a: number, b?: number, ...rest: number[]): number { return a; }", 1);
    assert_statement_count("async function f() { await g(); }", 1);
    assert_statement_count("function* gen() { yield 1; yield* other(); }", 1);
    assert_statement_count("function f(a: string): void;\nfunction f(a: any) {}", 2);
}

#[test]
fn test_parse_class_with_heritage_and_generics() {
    let file = parse(indoc! {"
        abstract class Repo<T extends { id: number }> extends Base<T> implements Store, Disposable {
            private static count: number = 0;
            protected readonly items: T[] = [];
            constructor(private name: string) { super(); }
            get size(): number { return this.items.length; }
            set size(value) {}
            abstract find(id: number): T | undefined;
            [key: string]: any;
        }
    "});
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(file.descendants_of_kind(SyntaxKind::HeritageClause).len(), 2);
    assert_eq!(file.descendants_of_kind(SyntaxKind::Constructor).len(), 1);
    assert_eq!(file.descendants_of_kind(SyntaxKind::GetAccessor).len(), 1);
    assert_eq!(file.descendants_of_kind(SyntaxKind::SetAccessor).len(), 1);
    assert_eq!(file.descendants_of_kind(SyntaxKind::IndexSignature).len(), 1);
}

#[test]
fn test_parse_decorated_class() {
    let file = parse("@Component({ selector: 'x' })\nclass A { @Input() name: string; }");
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    let class = file.node(file.statements()[0]);
    assert_eq!(class.decorators.as_ref().map(|d| d.len()), Some(1));
}

// ============================================================================
// Interfaces, Types and Enums
// ============================================================================

#[test]
fn test_parse_interface_signatures() {
    let file = parse(indoc! {"
        interface Callable<T> extends Base {
            (x: number): string;
            new (x: number): Callable<T>;
            [index: number]: T;
            method?<U>(u: U): void;
            readonly prop: T;
        }
    "});
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    for kind in [
        SyntaxKind::CallSignature,
        SyntaxKind::ConstructSignature,
        SyntaxKind::IndexSignature,
        SyntaxKind::MethodSignature,
        SyntaxKind::PropertySignature,
    ] {
        assert_eq!(file.descendants_of_kind(kind).len(), 1, "{kind:?}");
    }
}

#[test]
fn test_parse_type_aliases() {
    for source in [
        "type A = string | number;",
        "type B = { a: string } & { b: number };",
        "type C<T> = T extends string ? 'str' : T extends (infer U)[] ? U : never;",
        "type D<T> = { readonly [K in keyof T]?: T[K] };",
        "type E = [string, number];",
        "type F = typeof import_value;",
        "type G = (a: number, ...rest: string[]) => void;",
        "type H = new () => object;",
        "type I = Array<Array<number>>;",
        "type J = -1 | 'a' | true | null | undefined;",
        "type K = number[][];",
        "type L = this;",
    ] {
        assert_eq!(first_kind(source), SyntaxKind::TypeAliasDeclaration, "{source}");
    }
}

#[test]
fn test_parse_enums() {
    assert_eq!(first_kind("enum Color { Red, Green = 'g', Blue = 1 << 2, }"), SyntaxKind::EnumDeclaration);
    assert_eq!(first_kind("const enum E { A }"), SyntaxKind::EnumDeclaration);
    let file = parse("enum E { A, B, C }");
    assert_eq!(file.descendants_of_kind(SyntaxKind::EnumMember).len(), 3);
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_parse_modules() {
    assert_statement_count("namespace A.B { export const x = 1; }", 1);
    assert_statement_count("declare module 'fs' { export function read(): void; }", 1);
    assert_statement_count("declare global { interface Window {} }", 1);
    let file = parse("module M {}");
    assert_eq!(file.kind(file.statements()[0]), SyntaxKind::ModuleDeclaration);
}

#[test]
fn test_parse_imports_and_exports() {
    for (source, kind) in [
        ("import a from 'a';", SyntaxKind::ImportDeclaration),
        ("import * as ns from 'a';", SyntaxKind::ImportDeclaration),
        ("import a, { b as c, d } from 'a';", SyntaxKind::ImportDeclaration),
        ("import 'side-effect';", SyntaxKind::ImportDeclaration),
        ("import fs = require('fs');", SyntaxKind::ImportEqualsDeclaration),
        ("export { a, b as c };", SyntaxKind::ExportDeclaration),
        ("export * from 'a';", SyntaxKind::ExportDeclaration),
        ("export default 1 + 2;", SyntaxKind::ExportAssignment),
        ("export = foo;", SyntaxKind::ExportAssignment),
        ("export as namespace Lib;", SyntaxKind::NamespaceExportDeclaration),
        ("export default function () {}", SyntaxKind::FunctionDeclaration),
    ] {
        let file = parse(source);
        assert!(file.parse_diagnostics.is_empty(), "{source}: {:?}", file.parse_diagnostics);
        assert_eq!(file.kind(file.statements()[0]), kind, "{source}");
        assert_eq!(file.is_external_module(), kind != SyntaxKind::NamespaceExportDeclaration, "{source}");
    }
}

#[test]
fn test_dynamic_import_is_an_expression() {
    let file = parse("import('./a').then(m => m);");
    assert!(file.parse_diagnostics.is_empty());
    assert_eq!(file.kind(file.statements()[0]), SyntaxKind::ExpressionStatement);
    assert!(!file.is_external_module());
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_control_flow() {
    for (source, kind) in [
        ("if (a) b(); else c();", SyntaxKind::IfStatement),
        ("for (let i = 0; i < 10; i++) {}", SyntaxKind::ForStatement),
        ("for (const x of xs) {}", SyntaxKind::ForOfStatement),
        ("for (const k in obj) {}", SyntaxKind::ForInStatement),
        ("while (true) { break; }", SyntaxKind::WhileStatement),
        ("do { continue; } while (false);", SyntaxKind::DoStatement),
        ("switch (x) { case 1: case 2: a(); break; default: b(); }", SyntaxKind::SwitchStatement),
        ("try { a(); } catch (e) { b(); } finally { c(); }", SyntaxKind::TryStatement),
        ("try {} catch {}", SyntaxKind::TryStatement),
        ("outer: for (;;) { break outer; }", SyntaxKind::LabeledStatement),
        ("throw new Error('x');", SyntaxKind::ThrowStatement),
        ("debugger;", SyntaxKind::DebuggerStatement),
        ("with (obj) {}", SyntaxKind::WithStatement),
        (";", SyntaxKind::EmptyStatement),
    ] {
        assert_eq!(first_kind(source), kind, "{source}");
    }
}

#[test]
fn test_parse_for_await_of() {
    let file = parse("async function af() { for await (const x of xs) {} }");
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    let [statement] = file.descendants_of_kind(SyntaxKind::ForOfStatement)[..] else {
        panic!("expected one for..of statement");
    };
    let NodeData::ForInOf { await_modifier, expression, .. } = &file.node(statement).data else {
        panic!("not a for..of: {:?}", file.node(statement).data);
    };
    let await_modifier = await_modifier.unwrap();
    assert_eq!(file.kind(await_modifier), SyntaxKind::AwaitKeyword);
    assert_eq!(file.get_text_of_node(*expression), "xs");
    assert_eq!(file.children(statement)[0], await_modifier);

    let plain = parse("for (const x of xs) {}");
    let NodeData::ForInOf { await_modifier, .. } = &plain.node(plain.statements()[0]).data else {
        panic!("not a for..of");
    };
    assert_eq!(*await_modifier, None);

    assert_eq!(messages("async function af() { for await (const k in o) {} }")[0], "'of' expected.");
}

#[test]
fn test_throw_requires_expression_on_same_line() {
    assert_eq!(messages("throw\nerr;"), ["Line break not permitted here."]);
}

#[test]
fn test_asi() {
    assert_statement_count("let a = 1\nlet b = 2\na\n++b", 4);
    let file = parse("return\n1;");
    assert_eq!(file.statements().len(), 2);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_parse_expressions() {
    for source in [
        "const f = (a: number, { b }: Opts = {}): number => a;",
        "const t = `a ${b} c ${d + e} f`;",
        "const o = { a, b: 1, [c]: 2, ...d, m() {}, get g() { return 1; } };",
        "const xs = [1, , ...ys];",
        "const v = a ? b ? c : d : e;",
        "const s = tag`x${y}`;",
        "const n = a!.b!;",
        "const c = <const>['a'];",
        "const k = x as unknown as string;",
        "const r = /ab+c/gi.test(s);",
        "const q = a?.b?.[c]?.(d);",
        "const g = async <T>(x: T) => x;",
        "const cls = class extends Base {};",
        "const fn = function named() {};",
        "const nt = () => new.target;",
        "const big = 10n ** 2n;",
    ] {
        let file = parse(source);
        assert!(file.parse_diagnostics.is_empty(), "{source}: {:?}", file.parse_diagnostics);
    }
}

#[test]
fn test_arrow_vs_parenthesized() {
    let kind_of_initializer = |source: &str| {
        let file = parse(source);
        let declaration = file.descendants_of_kind(SyntaxKind::VariableDeclaration)[0];
        let NodeData::VariableLike(variable) = &file.node(declaration).data else {
            panic!("expected a variable declaration");
        };
        file.kind(variable.initializer.unwrap())
    };
    assert_eq!(kind_of_initializer("const a = (x) => x;"), SyntaxKind::ArrowFunction);
    assert_eq!(kind_of_initializer("const a = (x);"), SyntaxKind::ParenthesizedExpression);
    assert_eq!(kind_of_initializer("const a = (x: number) => x;"), SyntaxKind::ArrowFunction);
    assert_eq!(kind_of_initializer("const a = x => x;"), SyntaxKind::ArrowFunction);
    assert_eq!(kind_of_initializer("const a = async x => x;"), SyntaxKind::ArrowFunction);
    assert_eq!(kind_of_initializer("const a = (x, y);"), SyntaxKind::ParenthesizedExpression);
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_unclosed_class_still_returns_a_tree() {
    let file = parse("class Foo {");
    assert_eq!(file.statements().len(), 1);
    assert_eq!(file.kind(file.statements()[0]), SyntaxKind::ClassDeclaration);
    assert_eq!(file.parse_diagnostics[0].message_text, "'}' expected.");
}

#[test]
fn test_missing_type_is_empty_and_flagged() {
    let file = parse("let x:");
    assert_eq!(file.parse_diagnostics.len(), 1);
    assert_eq!(file.parse_diagnostics[0].message_text, "Type expected.");
    let declaration = file.descendants_of_kind(SyntaxKind::VariableDeclaration)[0];
    let NodeData::VariableLike(variable) = &file.node(declaration).data else {
        panic!("expected a variable declaration");
    };
    let ty = file.node(variable.ty.unwrap());
    assert_eq!(ty.pos, ty.end);
    assert!(ty.has_error());
}

#[test]
fn test_one_diagnostic_per_position() {
    let file = parse("let = ;");
    let starts: Vec<u32> = file.parse_diagnostics.iter().map(|d| d.start()).collect();
    let mut deduped = starts.clone();
    deduped.dedup();
    assert_eq!(starts, deduped);
}

#[test]
fn test_stray_tokens_are_skipped() {
    let file = parse("let a = 1;\n) ] }\nlet b = 2;");
    assert!(!file.parse_diagnostics.is_empty());
    let names: Vec<_> = file
        .descendants_of_kind(SyntaxKind::VariableDeclaration)
        .into_iter()
        .filter_map(|declaration| file.declaration_name_text(declaration))
        .collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_unterminated_literals() {
    assert!(messages("let s = 'abc").contains(&"Unterminated string literal.".to_string()));
    assert!(messages("let t = `abc").contains(&"Unterminated template literal.".to_string()));
    assert!(messages("/* open").contains(&"'*/' expected.".to_string()));
}

#[test]
fn test_edge_inputs() {
    assert_statement_count("", 0);
    assert_statement_count("// only a comment", 0);
    assert_statement_count(";;;", 3);
    let file = parse("#!/usr/bin/env node\nlet a;");
    assert!(file.parse_diagnostics.is_empty());
    assert_eq!(file.statements().len(), 1);
}

// ============================================================================
// JSX
// ============================================================================

#[test]
fn test_jsx_in_tsx_only() {
    let file = parse_source_file("view.tsx", "const v = <List items={xs}>{xs.map(x => <Item key={x} />)}</List>;");
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(file.descendants_of_kind(SyntaxKind::JsxElement).len(), 1);
    assert_eq!(file.descendants_of_kind(SyntaxKind::JsxSelfClosingElement).len(), 1);

    let file = parse_source_file("view.tsx", "<div>");
    assert!(file
        .parse_diagnostics
        .iter()
        .any(|d| d.message_text == "JSX element 'div' has no corresponding closing tag."));
}
