//! Hand-written code blocks preserved across regeneration.
//!
//! A block opens with a line `//[Name:]` and closes with `//[end]`. The
//! lines between them are stored under `Name` and spliced back into the
//! entity with that generated name on the next run.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

/// Line closing a custom code block.
pub const END_MARKER: &str = "//[end]";

/// Custom code blocks keyed by generated entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomCode {
    blocks: HashMap<String, String>,
}

impl CustomCode {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line opening the block of `name`.
    #[must_use]
    pub fn start_marker(name: &str) -> String {
        format!("//[{name}:]")
    }

    /// Extracts every block from previously generated output.
    ///
    /// An end marker with no open block is ignored; a start marker inside an
    /// open block discards what was collected and restarts. A block never
    /// closed is dropped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut blocks = HashMap::new();
        let mut current: Option<String> = None;
        let mut value = String::new();

        for line in content.split('\n') {
            let trimmed = line.trim();
            if let Some(name) = parse_start(trimmed) {
                current = Some(name.to_string());
                value.clear();
            } else if trimmed == END_MARKER {
                if let Some(name) = current.take() {
                    blocks.insert(name, value.trim_end_matches([' ', '\t', '\r', '\n']).to_string());
                }
                value.clear();
            } else if current.is_some() {
                value.push_str(line);
                value.push('\n');
            }
        }

        Self { blocks }
    }

    /// Loads the blocks of an existing output file.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    /// Returns any IO error other than the file not existing.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let code = Self::parse(&content);
                trace!(path = %path.display(), blocks = code.len(), "loaded custom code");
                Ok(code)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    /// Returns the non-empty block stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.blocks
            .get(name)
            .map(String::as_str)
            .filter(|code| !code.is_empty())
    }

    /// Stores a block, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.blocks.insert(name.into(), code.into());
    }

    /// Number of stored blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no block is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Renders the block of `name` for splicing before an entity's closing
    /// brace, or an empty string if there is none.
    #[must_use]
    pub fn render(&self, name: &str, indent: &str) -> String {
        match self.get(name) {
            Some(code) => format!(
                "{indent}{}\n{code}\n\n{indent}{END_MARKER}\n",
                Self::start_marker(name)
            ),
            None => String::new(),
        }
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for CustomCode {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self {
            blocks: iter
                .into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
        }
    }
}

fn parse_start(line: &str) -> Option<&str> {
    line.strip_prefix("//[")
        .and_then(|rest| rest.strip_suffix(":]"))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "export class Person {
    name: string;
    //[Person:]
    fullName(): string {
        return this.name;
    }

    //[end]
}";

    #[test]
    fn test_parse_block() {
        let code = CustomCode::parse(GENERATED);
        assert_eq!(code.len(), 1);
        assert_eq!(
            code.get("Person"),
            Some("    fullName(): string {\n        return this.name;\n    }")
        );
    }

    #[test]
    fn test_render_round_trip() {
        let code = CustomCode::parse(GENERATED);
        let rendered = code.render("Person", "    ");
        let reparsed = CustomCode::parse(&rendered);
        assert_eq!(reparsed, code);
    }

    #[test]
    fn test_unmatched_markers() {
        let content = "//[end]\n//[A:]\nfirst\n//[B:]\nsecond\n//[end]\n//[C:]\nopen";
        let code = CustomCode::parse(content);
        assert_eq!(code.get("A"), None);
        assert_eq!(code.get("B"), Some("second"));
        assert_eq!(code.get("C"), None);
        assert_eq!(code.len(), 1);
    }

    #[test]
    fn test_empty_block_is_not_rendered() {
        let code = CustomCode::parse("//[A:]\n\n   \n//[end]\n");
        assert!(code.get("A").is_none());
        assert_eq!(code.render("A", "  "), "");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let code = CustomCode::load(&dir.path().join("missing.ts")).expect("Failed to load");
        assert!(code.is_empty());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("models.ts");
        std::fs::write(&path, GENERATED).expect("Failed to write");
        let code = CustomCode::load(&path).expect("Failed to load");
        assert!(code.get("Person").is_some());
    }

    #[test]
    fn test_from_iter() {
        let code: CustomCode = [("Person", "x = 1;")].into_iter().collect();
        assert_eq!(
            code.render("Person", "\t"),
            "\t//[Person:]\nx = 1;\n\n\t//[end]\n"
        );
    }
}
