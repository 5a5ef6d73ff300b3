//! `/** ... */` documentation comments.
//!
//! Comments are attached after the parse by looking at the trivia in
//! front of every node that can carry documentation. Only the comment
//! text and its tags are parsed; type expressions are kept as raw text.

use memchr::memmem;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tsfront_ast::node::AstArena;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::NodeId;
use tsfront_core::text::SourceText;
use tsfront_scanner::{leading_comment_ranges, trailing_comment_ranges, CommentRange};

use crate::utilities::{can_have_jsdoc, takes_trailing_jsdoc};

/// One documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsDoc {
    pub pos: u32,
    pub end: u32,
    /// Text before the first tag, `None` when empty.
    pub comment: Option<String>,
    pub tags: Vec<JsDocTag>,
}

impl JsDoc {
    pub fn tag(&self, tag_name: &str) -> Option<&JsDocTag> {
        self.tags.iter().find(|tag| tag.tag_name == tag_name)
    }
}

/// `@name {type} target comment`. Which parts are read depends on the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsDocTag {
    pub tag_name: String,
    /// Parameter, template or typedef name.
    pub name: Option<String>,
    /// Text between the braces, braces excluded.
    pub type_expression: Option<String>,
    pub comment: Option<String>,
}

/// `/**` but not the empty `/**/`.
fn is_jsdoc_like(text: &[char], range: &CommentRange) -> bool {
    let pos = range.pos as usize;
    range.kind == SyntaxKind::MultiLineCommentTrivia
        && text.get(pos + 2) == Some(&'*')
        && text.get(pos + 3) != Some(&'/')
}

/// Documentation for every node that can take it, keyed by node.
pub(crate) fn collect_jsdoc(arena: &AstArena, source: &SourceText) -> FxHashMap<NodeId, Vec<JsDoc>> {
    let mut docs = FxHashMap::default();
    if memmem::find(source.as_str().as_bytes(), b"/**").is_none() {
        return docs;
    }
    let text: &[char] = source.chars();
    for (id, node) in arena.iter() {
        if !can_have_jsdoc(node.kind) || node.pos == node.end {
            continue;
        }
        let mut ranges = Vec::new();
        if takes_trailing_jsdoc(node.kind) {
            ranges.extend(trailing_comment_ranges(text, node.pos));
        }
        ranges.extend(leading_comment_ranges(text, node.pos));
        let blocks: Vec<JsDoc> = ranges
            .iter()
            .filter(|range| range.end <= node.end && is_jsdoc_like(text, range))
            .map(|range| parse_jsdoc_comment(&range.text(text), range.pos, range.end))
            .collect();
        if !blocks.is_empty() {
            docs.insert(id, blocks);
        }
    }
    docs
}

/// Parse a whole comment, delimiters included.
pub fn parse_jsdoc_comment(comment: &str, pos: u32, end: u32) -> JsDoc {
    let body = comment
        .strip_prefix("/**")
        .unwrap_or(comment);
    let body = body.strip_suffix("*/").unwrap_or(body);

    // Margin: leading whitespace, one `*` and one space on each line.
    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    let mut description = Vec::new();
    let mut tags: Vec<(String, Vec<&str>)> = Vec::new();
    for line in lines {
        if let Some(rest) = line.strip_prefix('@') {
            let tag_name_len = rest
                .find(|c: char| c.is_whitespace() || c == '{')
                .unwrap_or(rest.len());
            let (tag_name, rest) = rest.split_at(tag_name_len);
            tags.push((tag_name.to_string(), vec![rest.trim_start()]));
        } else if let Some((_, tag_lines)) = tags.last_mut() {
            tag_lines.push(line);
        } else {
            description.push(line);
        }
    }

    JsDoc {
        pos,
        end,
        comment: join_comment(&description),
        tags: tags
            .into_iter()
            .map(|(tag_name, lines)| parse_tag(tag_name, &lines.join("\n")))
            .collect(),
    }
}

fn join_comment(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `{...}` at the start of `text` with nested braces balanced.
fn take_type_expression(text: &str) -> (Option<String>, &str) {
    let text = text.trim_start();
    if !text.starts_with('{') {
        return (None, text);
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (Some(text[1..i].trim().to_string()), &text[i + 1..]);
                }
            }
            _ => {}
        }
    }
    // Unclosed: everything is the type.
    (Some(text[1..].trim().to_string()), "")
}

/// A parameter or typedef name. `[name=default]` marks an optional
/// parameter; the brackets and default are dropped.
fn take_name(text: &str) -> (Option<String>, &str) {
    let text = text.trim_start();
    if let Some(rest) = text.strip_prefix('[') {
        let close = rest.find(']').unwrap_or(rest.len());
        let inner = &rest[..close];
        let name = inner.split('=').next().unwrap_or(inner).trim();
        let rest = rest.get(close + 1..).unwrap_or("");
        return ((!name.is_empty()).then(|| name.to_string()), rest);
    }
    let len = text.find(char::is_whitespace).unwrap_or(text.len());
    let (name, rest) = text.split_at(len);
    ((!name.is_empty()).then(|| name.to_string()), rest)
}

fn tag_comment(text: &str) -> Option<String> {
    let text = text.trim_start();
    let text = text.strip_prefix('-').unwrap_or(text);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_tag(tag_name: String, text: &str) -> JsDocTag {
    let (name, type_expression, comment) = match tag_name.as_str() {
        "param" | "arg" | "argument" | "property" | "prop" => {
            // Either order: `@param {T} name` or `@param name {T}`.
            let (mut type_expression, rest) = take_type_expression(text);
            let (name, rest) = take_name(rest);
            let rest = if type_expression.is_none() {
                let (late_type, rest) = take_type_expression(rest);
                type_expression = late_type;
                rest
            } else {
                rest
            };
            (name, type_expression, tag_comment(rest))
        }
        "return" | "returns" | "type" | "this" | "enum" | "augments" | "extends" | "satisfies" => {
            let (type_expression, rest) = take_type_expression(text);
            (None, type_expression, tag_comment(rest))
        }
        "typedef" | "callback" => {
            let (type_expression, rest) = take_type_expression(text);
            let (name, rest) = take_name(rest);
            (name, type_expression, tag_comment(rest))
        }
        "template" => {
            // `@template {Constraint} T, U comment`
            let (type_expression, rest) = take_type_expression(text);
            let rest = rest.trim_start();
            let names_len = rest
                .char_indices()
                .find(|&(i, c)| c.is_whitespace() && !rest[..i].ends_with(',') && !rest[i..].trim_start().starts_with(','))
                .map_or(rest.len(), |(i, _)| i);
            let (names, rest) = rest.split_at(names_len);
            let names: String = names.chars().filter(|c| !c.is_whitespace()).collect();
            ((!names.is_empty()).then_some(names), type_expression, tag_comment(rest))
        }
        _ => (None, None, tag_comment(text)),
    };
    JsDocTag {
        tag_name,
        name,
        type_expression,
        comment,
    }
}
