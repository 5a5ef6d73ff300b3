//! Parsing many files at once.

use log::debug;
use rayon::prelude::*;

use crate::options::ParseOptions;
use crate::{ParseError, Parser, SourceFile};

/// Parse `(file_name, text)` pairs on the rayon pool, one parser per file.
/// Results come back in input order.
pub fn parse_source_files<N, T>(inputs: &[(N, T)], options: &ParseOptions) -> Vec<Result<SourceFile, ParseError>>
where
    N: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    debug!("parsing {} files", inputs.len());
    inputs
        .par_iter()
        .map(|(file_name, text)| {
            Parser::new(file_name.as_ref(), text.as_ref(), options.clone()).try_parse_source_file()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_keep_input_order() {
        let inputs: Vec<(String, String)> = (0..32)
            .map(|i| (format!("file{i}.ts"), format!("let v{i} = {i};")))
            .collect();
        let files = parse_source_files(&inputs, &ParseOptions::default());
        assert_eq!(files.len(), 32);
        for (i, file) in files.iter().enumerate() {
            let file = file.as_ref().unwrap();
            assert_eq!(file.file_name, format!("file{i}.ts"));
            assert!(file.identifiers().any(|name| name == format!("v{i}")));
        }
    }

    #[test]
    fn test_errors_stay_per_file() {
        let inputs = [("a.ts", "let x: ;"), ("b.tsx", "<div>")];
        let files = parse_source_files(&inputs, &ParseOptions::default());
        let a = files[0].as_ref().unwrap();
        let b = files[1].as_ref().unwrap();
        assert_eq!(a.parse_diagnostics[0].code, 1110);
        assert!(b.parse_diagnostics.iter().all(|d| d.file.as_deref() == Some("b.tsx")));
    }
}
