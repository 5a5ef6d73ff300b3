//! Conformance cases grouped by grammar area.
//!
//! Every case states the exact diagnostic codes it expects, so the suite
//! covers recovery as well as clean input.

use tsfront_tests::{check_tree, Suite, FIXTURES};
use tsfront_parser::parse_source_file;

fn run(cases: &[(&str, &str, &str, &[u32])]) {
    let mut suite = Suite::new();
    for (name, category, source, codes) in cases {
        let file_name = if *category == "jsx" { "test.tsx" } else { "test.ts" };
        suite.add(name, category, file_name, source, codes);
    }
    println!("{}", suite.summary());
    assert!(suite.failures().is_empty(), "{}", suite.summary());
}

#[test]
fn test_fixtures_parse_cleanly() {
    for (file_name, source) in FIXTURES {
        let file = parse_source_file(file_name, source);
        assert!(file.parse_diagnostics.is_empty(), "{file_name}: {:#?}", file.parse_diagnostics);
        check_tree(&file).unwrap_or_else(|err| panic!("{file_name}: {err}"));
    }
}

#[test]
fn test_declarations_conformance() {
    run(&[
        ("var_declaration", "declarations", "var x: number = 42;", &[]),
        ("typed_array", "declarations", "const arr: number[] = [1, 2, 3];", &[]),
        ("function_with_params", "declarations", "function add(a: number, b: number): number { return a + b; }", &[]),
        ("async_function", "declarations", "async function fetchData(): Promise<string> { return await Promise.resolve('data'); }", &[]),
        ("interface_extends", "declarations", "interface Animal { name: string; } interface Dog extends Animal { breed: string; }", &[]),
        ("class_with_constructor", "declarations", "class Person { constructor(public name: string) {} }", &[]),
        ("class_extends", "declarations", "class Animal {} class Dog extends Animal { breed: string; }", &[]),
        ("enum_with_values", "declarations", "enum Status { Active = 'active', Inactive = 'inactive' }", &[]),
        ("generic_class", "declarations", "class Container<T> { value: T; }", &[]),
        ("decorator_class", "declarations", "@Component class MyClass {}", &[]),
        ("export_default", "declarations", "export default function() {}", &[]),
        ("contextual_keywords_as_names", "declarations", "let type = 1, namespace = 2, module = 3, declare = 4, async = 5;", &[]),
        ("unclosed_class", "declarations", "class Foo {", &[1005]),
        ("missing_function_name", "declarations", "function () {}", &[1003]),
        ("enum_member_expected", "declarations", "enum E { A, ; }", &[1132]),
    ]);
}

#[test]
fn test_types_conformance() {
    run(&[
        ("union", "types", "type Status = 'active' | 'inactive' | 'pending';", &[]),
        ("function_type", "types", "type Handler = (event: string) => void;", &[]),
        ("intersection", "types", "type A = { a: number; }; type B = { b: string; }; type C = A & B;", &[]),
        ("typeof_variable", "types", "const x = 42; type TypeOfX = typeof x;", &[]),
        ("mapped_readonly", "types", "type Readonly<T> = { readonly [P in keyof T]: T[P]; };", &[]),
        ("mapped_partial", "types", "type Partial<T> = { [P in keyof T]?: T[P]; };", &[]),
        ("conditional", "types", "type IsString<T> = T extends string ? true : false;", &[]),
        ("conditional_nested", "types", "type NonNullable<T> = T extends null | undefined ? never : T;", &[]),
        ("missing_type", "types", "let x: ;", &[1110]),
        ("missing_type_at_end", "types", "let x:", &[1110]),
    ]);
}

#[test]
fn test_expressions_conformance() {
    run(&[
        ("template_interpolation", "expressions", "const name = 'Alice'; const greeting = `Hello, ${name}!`;", &[]),
        ("destructuring_with_types", "expressions", "const { name, age }: { name: string; age: number } = { name: 'Alice', age: 30 };", &[]),
        ("optional_chain_call", "expressions", "const result = obj?.method?.();", &[]),
        ("nullish_chain", "expressions", "const y = a ?? b ?? c;", &[]),
        ("spread_array", "expressions", "const arr = [...[1, 2, 3], 4, 5];", &[]),
        ("spread_object", "expressions", "const obj = { ...{ a: 1 }, b: 2 };", &[]),
        ("async_arrow", "expressions", "const fetch = async () => { await Promise.resolve(); };", &[]),
        ("exponent_chain", "expressions", "const p = 2 ** 3 ** 2;", &[]),
        ("comparison_chain", "expressions", "const q = a < b > c;", &[]),
        ("unary_exponent_base", "expressions", "const r = -2 ** 2;", &[17006]),
        ("assertion_exponent_base", "expressions", "const s = <number>a ** 2;", &[17007]),
        ("missing_operand", "expressions", "const t = a + ;", &[1109]),
        ("unclosed_call", "expressions", "f(a, b;", &[1005]),
        ("unterminated_string", "expressions", "const u = 'abc", &[1002]),
        ("super_alone", "expressions", "class A extends B { m() { super; } }", &[1034]),
    ]);
}

#[test]
fn test_statements_conformance() {
    run(&[
        ("labeled_break", "statements", "outer: for (;;) { break outer; }", &[]),
        ("switch", "statements", "switch (x) { case 1: a(); break; default: b(); }", &[]),
        ("try_catch_finally", "statements", "try { a(); } catch (e) { b(); } finally { c(); }", &[]),
        ("throw_line_break", "statements", "throw\nerr;", &[1142]),
        ("stray_close_brace", "statements", "let a = 1; }", &[1128]),
        ("case_outside_switch", "statements", "switch (x) { foo(); }", &[1130, 1128]),
    ]);
}

#[test]
fn test_jsx_conformance() {
    run(&[
        ("element", "jsx", "const a = <div className=\"x\">text {value}</div>;", &[]),
        ("self_closing", "jsx", "const b = <Input value={v} {...rest} />;", &[]),
        ("fragment", "jsx", "const c = <><A /><B /></>;", &[]),
        ("namespaced_tag", "jsx", "const d = <UI.Button onClick={() => go()}>Go</UI.Button>;", &[]),
        ("generic_arrow", "jsx", "const e = <T,>(x: T) => x;", &[]),
        ("mismatched_close", "jsx", "const f = <a></b>;", &[17002]),
        ("siblings", "jsx", "const g = <a /><b />;", &[2657]),
    ]);
}
