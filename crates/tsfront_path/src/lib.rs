//! tsfront_path: File-name handling for the front end.
//!
//! Decides how a file is parsed from its name alone: which script kind it
//! is, whether JSX syntax is enabled, and whether it is a declaration file.

use serde::{Deserialize, Serialize};

/// File extensions the front end recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    Js,
    Jsx,
    Mts,
    Cts,
    Mjs,
    Cjs,
}

impl Extension {
    /// The extension text, including the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Ts => ".ts",
            Extension::Tsx => ".tsx",
            Extension::Dts => ".d.ts",
            Extension::Js => ".js",
            Extension::Jsx => ".jsx",
            Extension::Mts => ".mts",
            Extension::Cts => ".cts",
            Extension::Mjs => ".mjs",
            Extension::Cjs => ".cjs",
        }
    }

    /// Determine the extension of a path. `.d.ts` wins over `.ts`.
    pub fn from_path(path: &str) -> Option<Extension> {
        let lower = path.to_ascii_lowercase();
        // longest suffixes first
        const ORDER: [Extension; 9] = [
            Extension::Dts,
            Extension::Tsx,
            Extension::Jsx,
            Extension::Mts,
            Extension::Cts,
            Extension::Mjs,
            Extension::Cjs,
            Extension::Ts,
            Extension::Js,
        ];
        ORDER.into_iter().find(|ext| lower.ends_with(ext.as_str()))
    }
}

/// How a file's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptKind {
    #[default]
    Ts,
    Tsx,
    Js,
    Jsx,
}

impl ScriptKind {
    /// Script kind implied by a file name; unknown extensions parse as `Ts`.
    pub fn from_path(path: &str) -> ScriptKind {
        match Extension::from_path(path) {
            Some(Extension::Tsx) => ScriptKind::Tsx,
            Some(Extension::Js) | Some(Extension::Mjs) | Some(Extension::Cjs) => ScriptKind::Js,
            Some(Extension::Jsx) => ScriptKind::Jsx,
            _ => ScriptKind::Ts,
        }
    }

    /// JSX syntax is recognized in `.tsx`, `.jsx` and `.js` files.
    pub fn language_variant(self) -> LanguageVariant {
        match self {
            ScriptKind::Tsx | ScriptKind::Jsx | ScriptKind::Js => LanguageVariant::Jsx,
            ScriptKind::Ts => LanguageVariant::Standard,
        }
    }

    pub fn is_javascript(self) -> bool {
        matches!(self, ScriptKind::Js | ScriptKind::Jsx)
    }
}

/// Whether `<` may open a JSX element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageVariant {
    #[default]
    Standard,
    Jsx,
}

/// Whether a path ends with a declaration-file extension.
pub fn is_declaration_file_name(path: &str) -> bool {
    Extension::from_path(path) == Some(Extension::Dts)
}

/// Convert backslashes to forward slashes.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize separators and resolve `.` and `..` segments.
///
/// A leading root (`/` or a drive like `c:/`) is preserved; `..` that would
/// climb above a relative start is kept verbatim.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let root_len = root_length(&path);
    let (root, rest) = path.split_at(root_len);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if root.is_empty() => parts.push(".."),
                _ => {}
            },
            other => parts.push(other),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    normalized.push_str(root);
    normalized.push_str(&parts.join("/"));
    if rest.ends_with('/') && !parts.is_empty() {
        normalized.push('/');
    }
    normalized
}

fn root_length(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.first() == Some(&b'/') {
        return 1;
    }
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        return 3;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_path() {
        assert_eq!(Extension::from_path("foo.ts"), Some(Extension::Ts));
        assert_eq!(Extension::from_path("foo.d.ts"), Some(Extension::Dts));
        assert_eq!(Extension::from_path("Foo.TSX"), Some(Extension::Tsx));
        assert_eq!(Extension::from_path("foo.js"), Some(Extension::Js));
        assert_eq!(Extension::from_path("foo.txt"), None);
    }

    #[test]
    fn test_script_kind_from_path() {
        assert_eq!(ScriptKind::from_path("a.tsx"), ScriptKind::Tsx);
        assert_eq!(ScriptKind::from_path("a.d.ts"), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_path("a.mjs"), ScriptKind::Js);
        assert_eq!(ScriptKind::from_path("lib.dom"), ScriptKind::Ts);
        assert_eq!(ScriptKind::Js.language_variant(), LanguageVariant::Jsx);
        assert_eq!(ScriptKind::Ts.language_variant(), LanguageVariant::Standard);
    }

    #[test]
    fn test_script_kind_serde() {
        let kind: ScriptKind = serde_json::from_str("\"tsx\"").unwrap();
        assert_eq!(kind, ScriptKind::Tsx);
        assert_eq!(serde_json::to_string(&ScriptKind::Jsx).unwrap(), "\"jsx\"");
    }

    #[test]
    fn test_declaration_file() {
        assert!(is_declaration_file_name("lib.d.ts"));
        assert!(!is_declaration_file_name("lib.ts"));
        assert!(is_declaration_file_name("src/Lib.D.TS"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a\\b\\c.ts"), "a/b/c.ts");
        assert_eq!(normalize_path("/a/./b/../c.ts"), "/a/c.ts");
        assert_eq!(normalize_path("../x/y.ts"), "../x/y.ts");
        assert_eq!(normalize_path("c:\\src\\..\\lib\\"), "c:/lib/");
        assert_eq!(normalize_path("/.."), "/");
    }
}
