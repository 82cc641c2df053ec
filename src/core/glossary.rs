//! Fixed-term glossary and `[KEEP]` protection markers

use regex::Regex;
use std::sync::OnceLock;

/// Opening protection marker
pub const KEEP_OPEN: &str = "[KEEP]";
/// Closing protection marker
pub const KEEP_CLOSE: &str = "[/KEEP]";

fn keep_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[KEEP\](.*?)\[/KEEP\]").expect("valid KEEP pattern"))
}

/// Ordered source -> target term mapping, built fresh for every invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<(String, String)>,
}

impl Glossary {
    /// Parse `source=target` lines.
    ///
    /// Lines without `=` are ignored, a line is split at its first `=` and
    /// both halves are trimmed. A repeated source keeps its first position
    /// and takes the last target.
    pub fn parse(text: &str) -> Self {
        let mut glossary = Self::default();
        let text = text.trim();
        if text.is_empty() {
            return glossary;
        }

        for line in text.split('\n') {
            if let Some((source, target)) = line.split_once('=') {
                glossary.insert(source.trim(), target.trim());
            }
        }
        glossary
    }

    /// Insert or overwrite a term
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|(s, _)| *s == source) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((source, target)),
        }
    }

    /// Target for `source`, if present
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, t)| t.as_str())
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no terms were parsed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms in glossary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Replace every occurrence of each source term with its target wrapped
    /// in protection markers.
    ///
    /// Terms are applied one after another in glossary order, so a later
    /// term also matches inside targets inserted by an earlier one. An empty
    /// source term matches at every character boundary.
    pub fn protect(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (source, target) in self.iter() {
            text = text.replace(source, &format!("{KEEP_OPEN}{target}{KEEP_CLOSE}"));
        }
        text
    }
}

/// Strip protection markers, keeping the enclosed text.
///
/// Markers are matched pairwise and non-greedily on a single line.
pub fn restore(text: &str) -> String {
    keep_pattern().replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_pair() {
        let glossary = Glossary::parse("A=B");
        assert_eq!(glossary.len(), 1);
        assert_eq!(glossary.get("A"), Some("B"));
    }

    #[test]
    fn test_parse_ignores_lines_without_equals() {
        let glossary = Glossary::parse("no separator here\n大可爱 = XXX \n\n");
        assert_eq!(glossary.len(), 1);
        assert_eq!(glossary.get("大可爱"), Some("XXX"));
    }

    #[test]
    fn test_parse_blank_input() {
        assert!(Glossary::parse("").is_empty());
        assert!(Glossary::parse("  \n \t ").is_empty());
    }

    #[test]
    fn test_parse_splits_at_first_equals() {
        let glossary = Glossary::parse("x=y=z\r\n");
        assert_eq!(glossary.get("x"), Some("y=z"));
    }

    #[test]
    fn test_parse_duplicate_keeps_position_takes_last_value() {
        let glossary = Glossary::parse("a=1\nb=2\na=3");
        let entries: Vec<_> = glossary.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_protect_wraps_every_occurrence() {
        let glossary = Glossary::parse("猫=cat");
        assert_eq!(
            glossary.protect("猫和猫"),
            "[KEEP]cat[/KEEP]和[KEEP]cat[/KEEP]"
        );
    }

    #[test]
    fn test_protect_later_terms_see_earlier_insertions() {
        let glossary = Glossary::parse("A=B\nB=C");
        assert_eq!(
            glossary.protect("A"),
            "[KEEP][KEEP]C[/KEEP][/KEEP]"
        );
    }

    #[test]
    fn test_protect_empty_source_wraps_every_boundary() {
        let glossary = Glossary::parse("=nothing");
        assert_eq!(glossary.len(), 1);
        assert_eq!(
            glossary.protect("abc"),
            "[KEEP]nothing[/KEEP]a[KEEP]nothing[/KEEP]b[KEEP]nothing[/KEEP]c[KEEP]nothing[/KEEP]"
        );
    }

    #[test]
    fn test_restore_strips_markers() {
        assert_eq!(
            restore("你是[KEEP]XXX[/KEEP]吗？[KEEP][/KEEP]"),
            "你是XXX吗？"
        );
        assert_eq!(restore("no markers"), "no markers");
    }

    #[test]
    fn test_restore_leaves_multiline_markers() {
        let text = "[KEEP]line one\nline two[/KEEP]";
        assert_eq!(restore(text), text);
    }

    #[test]
    fn test_protect_then_restore_substitutes_term() {
        let glossary = Glossary::parse("大可爱=XXX");
        let masked = glossary.protect("你是大可爱吗？");
        assert_eq!(restore(&masked), "你是XXX吗？");
    }
}
