//! Document and corpus types, plus the directory loader.

use std::path::Path;

use grounder_core::error::{GrounderError, Result};

/// One retrievable text fragment. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An ordered, read-only collection of documents.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from pre-existing fragments, preserving order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            docs: lines.into_iter().map(Document::new).collect(),
        }
    }

    /// Load a corpus by scanning every regular file in `dir`.
    ///
    /// Each file is read as UTF-8 text; every trimmed, non-blank line becomes
    /// one document. Files are visited in file-name order so the corpus order
    /// (and therefore tie-breaking downstream) is stable across runs. A file
    /// that cannot be read is logged and skipped; an unreadable directory is
    /// fatal.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            GrounderError::CorpusLoad(format!("Cannot read corpus dir {}: {e}", dir.display()))
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut docs = Vec::new();
        for path in &paths {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let before = docs.len();
                    docs.extend(
                        content
                            .lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(Document::new),
                    );
                    tracing::debug!(
                        "Corpus file {}: {} fragment(s)",
                        path.display(),
                        docs.len() - before
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable corpus file {}: {e}", path.display());
                }
            }
        }

        if docs.is_empty() {
            tracing::warn!("Corpus dir {} yielded no documents", dir.display());
        }
        Ok(Self { docs })
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_lines_preserves_order() {
        let corpus = Corpus::from_lines(["first", "second", "third"]);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get(0).unwrap().text, "first");
        assert_eq!(corpus.get(2).unwrap().text, "third");
    }

    #[test]
    fn test_load_dir_trims_and_drops_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("a.txt")).unwrap();
        writeln!(f, "  hello world  ").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "\t").unwrap();
        writeln!(f, "second line").unwrap();

        let corpus = Corpus::load_dir(dir.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().text, "hello world");
        assert_eq!(corpus.get(1).unwrap().text, "second line");
    }

    #[test]
    fn test_load_dir_stable_file_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "from b\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), "from a\n").unwrap();

        let corpus = Corpus::load_dir(dir.path()).unwrap();
        assert_eq!(corpus.get(0).unwrap().text, "from a");
        assert_eq!(corpus.get(1).unwrap().text, "from b");
    }

    #[test]
    fn test_load_dir_skips_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), "fine\n").unwrap();
        // invalid UTF-8 makes read_to_string fail for this file only
        std::fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

        let corpus = Corpus::load_dir(dir.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(0).unwrap().text, "fine");
    }

    #[test]
    fn test_load_dir_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Corpus::load_dir(&missing).unwrap_err();
        assert!(matches!(err, GrounderError::CorpusLoad(_)));
    }

    #[test]
    fn test_empty_dir_is_ok_but_empty() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = Corpus::load_dir(dir.path()).unwrap();
        assert!(corpus.is_empty());
    }
}
