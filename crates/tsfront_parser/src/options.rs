//! Per-file parse options.

use serde::{Deserialize, Serialize};
use tsfront_path::ScriptKind;

use crate::ParseError;

/// Knobs for one parse. Everything defaults to the behavior a compiler
/// front end wants; tools that only need the tree can switch the extra
/// passes off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Overrides the kind implied by the file extension.
    pub script_kind: Option<ScriptKind>,
    /// Run the parent-linking pass after parsing.
    pub set_parent_nodes: bool,
    /// Attach `/** ... */` comments to the declarations they precede.
    pub collect_jsdoc: bool,
    /// Read `/// <reference ... />`, AMD and `@ts-check` directives.
    pub process_reference_directives: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            script_kind: None,
            set_parent_nodes: true,
            collect_jsdoc: true,
            process_reference_directives: true,
        }
    }
}

impl ParseOptions {
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_script_kind(mut self, script_kind: ScriptKind) -> Self {
        self.script_kind = Some(script_kind);
        self
    }

    /// Script kind for `file_name`, honoring the override.
    pub fn script_kind_for(&self, file_name: &str) -> ScriptKind {
        self.script_kind
            .unwrap_or_else(|| ScriptKind::from_path(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(options.set_parent_nodes);
        assert!(options.collect_jsdoc);
        assert_eq!(options.script_kind_for("a.tsx"), ScriptKind::Tsx);
        assert_eq!(options.script_kind_for("a.ts"), ScriptKind::Ts);
    }

    #[test]
    fn test_from_json() {
        let options = ParseOptions::from_json(r#"{ "scriptKind": "jsx", "collectJsdoc": false }"#).unwrap();
        assert_eq!(options.script_kind, Some(ScriptKind::Jsx));
        assert!(!options.collect_jsdoc);
        assert!(options.set_parent_nodes);
        assert_eq!(options.script_kind_for("a.ts"), ScriptKind::Jsx);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ParseOptions::from_json("{ scriptKind: 1 }").unwrap_err();
        assert!(matches!(err, ParseError::Options(_)));
    }
}
