//! Keyword highlighting for the code pane
//!
//! A simple per-line tokenizer: comments, string literals, numbers and the
//! keywords of the document's language. It never needs more than the current
//! line, which is all a partially revealed file can offer anyway.

use crate::document::Language;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

const C_KEYWORDS: &[&str] = &[
    "int", "char", "void", "bool", "float", "double", "long", "short", "unsigned", "signed",
    "struct", "return", "if", "else", "while", "for", "do", "switch", "case", "default", "break",
    "continue", "goto", "sizeof", "const", "static", "typedef", "enum", "include", "define",
];
const CPP_KEYWORDS: &[&str] = &[
    "class", "namespace", "template", "typename", "public", "private", "protected", "virtual",
    "new", "delete", "using", "auto", "nullptr", "this", "std",
];
const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "return", "if", "elif", "else", "for", "while", "in", "import", "from", "as",
    "with", "try", "except", "finally", "raise", "lambda", "pass", "None", "True", "False", "and",
    "or", "not", "yield", "self",
];
const JS_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "return", "if", "else", "for", "while", "class", "new",
    "this", "import", "export", "from", "async", "await", "true", "false", "null", "undefined",
];
const JAVA_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "class", "interface", "static", "void", "int", "new",
    "return", "if", "else", "for", "while", "import", "package", "extends", "implements", "final",
];

fn keywords(language: Language) -> &'static [&'static str] {
    match language {
        Language::C => C_KEYWORDS,
        Language::Cpp => CPP_KEYWORDS,
        Language::Python => PYTHON_KEYWORDS,
        Language::JavaScript => JS_KEYWORDS,
        Language::Java => JAVA_KEYWORDS,
        _ => &[],
    }
}

fn line_comment(language: Language) -> Option<&'static str> {
    match language {
        Language::C | Language::Cpp | Language::JavaScript | Language::Java => Some("//"),
        Language::Python => Some("#"),
        _ => None,
    }
}

fn is_keyword(language: Language, word: &str) -> bool {
    keywords(language).contains(&word) || (language == Language::Cpp && C_KEYWORDS.contains(&word))
}

fn word_style(language: Language, word: &str) -> Style {
    if is_keyword(language, word) {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Highlight one line of `language` source
pub fn highlight_line(line: &str, language: Language) -> Line<'static> {
    let plain = Style::default().fg(DEFAULT_THEME.fg);
    if keywords(language).is_empty() && line_comment(language).is_none() {
        return Line::from(Span::styled(line.to_string(), plain));
    }

    let comment = line_comment(language);
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = line.char_indices();

    let flush_word = |spans: &mut Vec<Span<'static>>, start: Option<usize>, end: usize| {
        if let Some(start) = start {
            let word = &line[start..end];
            spans.push(Span::styled(word.to_string(), word_style(language, word)));
        }
    };

    while let Some((i, c)) = chars.next() {
        if comment.is_some_and(|marker| line[i..].starts_with(marker)) {
            flush_word(&mut spans, word_start.take(), i);
            spans.push(Span::styled(
                line[i..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, word_start.take(), i);
            let mut end = line.len();
            let mut escaped = false;
            for (j, d) in chars.by_ref() {
                if escaped {
                    escaped = false;
                } else if d == '\\' {
                    escaped = true;
                } else if d == c {
                    end = j + d.len_utf8();
                    break;
                }
            }
            spans.push(Span::styled(
                line[i..end].to_string(),
                Style::default().fg(DEFAULT_THEME.secondary),
            ));
            continue;
        }

        if c.is_alphanumeric() || c == '_' {
            word_start.get_or_insert(i);
            continue;
        }

        flush_word(&mut spans, word_start.take(), i);
        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            _ => plain,
        };
        spans.push(Span::styled(c.to_string(), style));
    }
    flush_word(&mut spans, word_start, line.len());

    Line::from(spans)
}
