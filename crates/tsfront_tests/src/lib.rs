//! Shared fixtures and checks for the tsfront conformance tests.
//!
//! A conformance case is a named snippet that must parse without a panic
//! or an internal error, produce exactly the expected diagnostic codes,
//! and yield a tree that passes [`check_tree`].

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use indoc::indoc;
use tsfront_ast::{children, descendants, NodeId};
use tsfront_parser::{parse_source_file_with_options, ParseOptions, SourceFile};

/// Larger programs that exercise most of the grammar.
pub const FIXTURES: &[(&str, &str)] = &[
    (
        "basic.ts",
        indoc! {r#"
            /// <reference path="./globals.d.ts" />
            const greeting: string = "hello";
            let count = 0;
            var legacy;

            function add(a: number, b: number = 1, ...rest: number[]): number {
                return a + b + rest.reduce((x, y) => x + y, 0);
            }

            for (let i = 0; i < 10; i++) {
                if (i % 2 === 0) continue;
                count += i ** 2;
            }

            label: while (count > 0) {
                switch (count) {
                    case 1:
                        break label;
                    default:
                        count--;
                }
            }

            try {
                throw new Error(`failed after ${count} tries`);
            } catch (e) {
                console.log(e);
            } finally {
                count = 0;
            }
        "#},
    ),
    (
        "types.ts",
        indoc! {r#"
            interface Point { readonly x: number; y?: number; [extra: string]: unknown; }
            interface Factory<T> { new (seed: number): T; (input: string): T; }
            type Shape = { kind: "circle"; radius: number } | { kind: "square"; size: number };
            type Keys<T> = keyof T;
            type Values<T> = T[keyof T];
            type Unpack<T> = T extends Promise<infer U> ? U : T extends (infer V)[] ? V : never;
            type Mutable<T> = { -readonly [K in keyof T]-?: T[K] };
            type Fn = <A, B extends A = A>(a: A, b: B) => [A, B];
            type Ctor = new (...args: any[]) => object;
            declare function isPoint(value: unknown): value is Point;
            let tuple: [string, number[], { a: 1 }] = ["a", [1], { a: 1 }];
        "#},
    ),
    (
        "classes.ts",
        indoc! {r#"
            @sealed
            export abstract class Animal<T = string> implements Named {
                private static registry = new Map<string, Animal>();
                protected abstract sound(): string;
                constructor(public readonly name: string, private age?: number) {}
                get label() { return `${this.name} (${this.age})`; }
                set label(value: string) { this.name = value; }
                @log
                speak<U>(this: Animal<T>, times: U[]): void {}
            }
            class Dog extends Animal implements Pet, Tracked {
                sound() { return "woof"; }
                async *walk() { yield* this.steps(); }
            }
            const Anonymous = class {};
        "#},
    ),
    (
        "modules.ts",
        indoc! {r#"
            import Default, * as everything from "./all";
            import { a, b as c } from "./named";
            import fs = require("fs");
            import Alias = Outer.Inner.Value;
            export * from "./reexport";
            export { a as default, c };
            export namespace Outer.Inner { export const Value = 1; }
            declare module "ambient" { export function f(): void; }
            declare global { interface Window { custom: string } }
            export default class {}
        "#},
    ),
    (
        "expressions.ts",
        indoc! {r#"
            const a = x => x * 2, b = async (y) => await y, c = <T>(z: T): T => z;
            const d = (p, { q, r = 1 }, [s, ...t]) => p;
            const e = obj?.deep?.[key]?.(arg) ?? fallback;
            const f = typeof v === "number" ? -v : !v;
            const g = new Foo<Bar>(1).method<Baz>()!.prop;
            const h = { a, "b": 1, 2: c, [d]: e, ...f, m() {}, get n() { return 1; }, async *o() {} };
            const i = [, , 1, ...j];
            const k = tag`one ${two} three`;
            const l = /re[/]gex/g.exec(s) as RegExpExecArray;
            const m = <string>n, o = p instanceof Q, r = "s" in t;
            const u = (v, w) ? x : y;
            delete obj.key, void 0, ++i, i--;
        "#},
    ),
];

/// Structural checks every parse must pass: the root spans the text,
/// children lie inside their parents in source order and were allocated
/// first, and parent links agree with the children view.
pub fn check_tree(file: &SourceFile) -> Result<(), String> {
    let root = file.node(file.root);
    if (root.pos, root.end) != (0, file.text.len()) {
        return Err(format!("root spans {}..{}, text is {} long", root.pos, root.end, file.text.len()));
    }
    let mut ids = vec![file.root];
    ids.extend(descendants(&file.arena, file.root));
    for id in ids {
        let node = file.node(id);
        if node.pos > node.end {
            return Err(format!("{:?} {id} has pos {} > end {}", node.kind, node.pos, node.end));
        }
        let mut previous_end = node.pos;
        for child in children(&file.arena, id) {
            let child_node = file.node(child);
            if child >= id {
                return Err(format!("{:?} {child} was allocated after its parent {id}", child_node.kind));
            }
            if child_node.pos < previous_end || child_node.end > node.end {
                return Err(format!(
                    "{:?} {child} at {}..{} is outside or before its sibling in {:?} {id} at {}..{}",
                    child_node.kind, child_node.pos, child_node.end, node.kind, node.pos, node.end
                ));
            }
            if child_node.parent != Some(id) {
                return Err(format!("{:?} {child} has parent {:?}, expected {id}", child_node.kind, child_node.parent));
            }
            previous_end = child_node.end;
        }
    }
    Ok(())
}

/// Outcome of one conformance case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub category: String,
    pub passed: bool,
    pub failure: Option<String>,
}

/// A conformance suite: cases run as they are added, results are kept
/// for the summary.
#[derive(Debug, Default)]
pub struct Suite {
    pub results: Vec<CaseResult>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and expect exactly `expected_codes`, in order.
    pub fn add(&mut self, name: &str, category: &str, file_name: &str, source: &str, expected_codes: &[u32]) {
        let failure = match catch_unwind(AssertUnwindSafe(|| {
            parse_source_file_with_options(file_name, source, ParseOptions::default())
        })) {
            Err(panic) => Some(
                panic
                    .downcast_ref::<String>()
                    .cloned()
                    .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
                    .unwrap_or_else(|| "unknown panic".to_string()),
            ),
            Ok(Err(err)) => Some(err.to_string()),
            Ok(Ok(file)) => {
                let codes: Vec<u32> = file.parse_diagnostics.iter().map(|d| d.code).collect();
                if codes != expected_codes {
                    Some(format!("expected codes {expected_codes:?}, got {:?}", file.parse_diagnostics))
                } else {
                    check_tree(&file).err()
                }
            }
        };
        self.results.push(CaseResult {
            name: name.to_string(),
            category: category.to_string(),
            passed: failure.is_none(),
            failure,
        });
    }

    pub fn failures(&self) -> Vec<&CaseResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    pub fn summary(&self) -> String {
        let mut categories: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for result in &self.results {
            let entry = categories.entry(result.category.as_str()).or_default();
            entry.0 += usize::from(result.passed);
            entry.1 += 1;
        }
        let mut out = format!(
            "=== tsfront conformance ===\n{}/{} passed\n",
            self.results.len() - self.failures().len(),
            self.results.len()
        );
        for (category, (passed, total)) in categories {
            out.push_str(&format!("  {category}: {passed}/{total}\n"));
        }
        for failure in self.failures() {
            out.push_str(&format!(
                "  FAILED [{}] {}: {}\n",
                failure.category,
                failure.name,
                failure.failure.as_deref().unwrap_or("")
            ));
        }
        out
    }
}

/// `n` nested parentheses around an identifier.
pub fn nested_parens(n: usize) -> String {
    format!("{}x{};", "(".repeat(n), ")".repeat(n))
}

/// Id-ordered list of every node with its kind, for snapshot-like
/// comparisons.
pub fn kinds(file: &SourceFile) -> Vec<(NodeId, tsfront_ast::SyntaxKind)> {
    file.arena.iter().map(|(id, node)| (id, node.kind)).collect()
}
