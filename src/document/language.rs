//! File extension to language label mapping

use rustc_hash::FxHashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Language tag derived from a document's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    C,
    Python,
    JavaScript,
    Java,
    Html,
    Css,
    Json,
    Xml,
    Markdown,
    Csv,
    PlainText,
}

impl Language {
    /// Human-readable label shown in the status bar
    pub fn label(self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Xml => "XML",
            Language::Markdown => "Markdown",
            Language::Csv => "CSV",
            Language::PlainText => "Plain text",
        }
    }

    /// Detect the language from the extension of `path` (case-insensitive).
    ///
    /// Paths without an extension, or with one missing from the table, are plain text.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::PlainText)
    }

    /// Look up an extension given without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        EXTENSIONS
            .get(ext.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(Language::PlainText)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static EXTENSIONS: LazyLock<FxHashMap<&'static str, Language>> = LazyLock::new(|| {
    [
        ("cpp", Language::Cpp),
        ("cc", Language::Cpp),
        ("cxx", Language::Cpp),
        ("c", Language::C),
        ("py", Language::Python),
        ("js", Language::JavaScript),
        ("java", Language::Java),
        ("html", Language::Html),
        ("htm", Language::Html),
        ("css", Language::Css),
        ("json", Language::Json),
        ("xml", Language::Xml),
        ("md", Language::Markdown),
        ("txt", Language::PlainText),
        ("csv", Language::Csv),
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(Language::from_path(Path::new("main.cc")), Language::Cpp);
        assert_eq!(Language::from_path(Path::new("lib/app.js")), Language::JavaScript);
        assert_eq!(Language::from_path(Path::new("index.htm")), Language::Html);
        assert_eq!(Language::from_path(Path::new("data.csv")).label(), "CSV");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(Language::from_path(Path::new("HELLO.PY")), Language::Python);
        assert_eq!(Language::from_path(Path::new("Notes.Md")), Language::Markdown);
    }

    #[test]
    fn test_unknown_extension_is_plain_text() {
        assert_eq!(Language::from_path(Path::new("main.rs")), Language::PlainText);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::PlainText);
        assert_eq!(Language::from_path(Path::new(".bashrc")), Language::PlainText);
        assert_eq!(Language::PlainText.to_string(), "Plain text");
    }
}
