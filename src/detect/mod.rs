//! Citation detection.
//!
//! One composed regular expression covers the whole citation grammar:
//! single citations ("Article 5(2)"), multi-citations with ranges and
//! conjunctions, nested "of" chains, document names with official
//! numbering, demonstratives and the trailing "thereof". Detection is a
//! plain scan with it; no tokenization happens here.

pub mod fragments;

use std::sync::LazyLock;

use regex::Regex;

use crate::citation::Citation;

use fragments::{
    or_range, CONJUNCTION, DOCUMENT_NUMBERING, LETTER, NUMBER, ORDINAL, PAREN_NUMBER, ROMAN,
};

/// Node-kind keywords taking decimal numbers.
const NODE_NAME_DEC: &str = r"(?:article|paragraph|subparagraph|section|indent)";

/// Node-kind keywords taking roman numerals.
const NODE_NAME_ROM: &str = r"(?:chapter|title)";

/// Alternation order is load-bearing throughout: the engine takes the
/// first alternative that lets the rest of the pattern succeed, so tight
/// notation ("Article 22(1) and (4)") must be tried before the bare
/// "Article 22" form or the span is cut short.
fn reference_pattern() -> String {
    let number_or_range = or_range(NUMBER);
    let token_or_range = format!("(?:{}|{})", or_range(PAREN_NUMBER), or_range(LETTER));
    let letter_or_range = or_range(LETTER);

    let regulation = format!(r"(?:(?:Commission\s)?Regulation{DOCUMENT_NUMBERING}?)");
    let directive = format!(r"(?:(?:(?:First\s)?Council\s)?Directive{DOCUMENT_NUMBERING}?)");
    // Treaties appear either as a capitalized long name, optionally with
    // an abbreviation in parentheses, or as a bare acronym.
    let treaty = r"(?:the\streaty(?:\s(?:[a-z]+\s){0,2}(?-i:[A-Z][a-z]*))+(?:\s\((?-i:[A-Z]{2,})\))?|(?:the\s)?(?-i:[A-Z]{2,}))";
    let document = format!(r"(?:(?:this\s|that\s)?(?:{regulation}|{directive}|{treaty}))");

    let node_name = format!(r"(?:{NODE_NAME_ROM}|{NODE_NAME_DEC})");

    // "paragraph 2(b), (d) to (f), (h)" and friends.
    let tight = format!(
        r"(?:{node_name}\s{NUMBER}{token_or_range}(?:,\s{token_or_range})*(?:\s{CONJUNCTION}\s{token_or_range})*)"
    );
    let single = format!(
        r"(?:this\s{node_name}|the\sprevious\s{node_name}|those\s{node_name}s|{node_name}\s{NUMBER}|{NODE_NAME_ROM}\s{ROMAN}|the\s{ORDINAL}\s{node_name}|that\s{node_name}|{document})"
    );
    let cite = format!(r"(?:{tight}|{single})");
    let multi = format!(
        r"(?:{node_name}s?\s{number_or_range}(?:,\s{number_or_range})*(?:\s{CONJUNCTION}\s{number_or_range})*)"
    );
    let point = format!(
        r"(?:points?\s{letter_or_range}(?:(?:,\s{letter_or_range})*\s{CONJUNCTION}\s{letter_or_range})*)"
    );

    format!(
        r"(?i)(?:(?:{point}\sof\s{cite})|(?:{cite}|{multi})(?:(?:\sof)?\s{cite})*)(?:\sthereof)?"
    )
}

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&reference_pattern()).expect("valid regex"));

/// Finds citation spans in prose.
#[derive(Debug, Default, Clone, Copy)]
pub struct CitationDetector;

impl CitationDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan `text` for citations. Spans are non-overlapping and returned
    /// in left-to-right order; offsets are byte offsets into `text`.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<Citation> {
        REFERENCE
            .find_iter(text)
            .map(|found| Citation::new(found.start(), found.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(found: &[Citation]) -> Vec<&str> {
        found.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_single_article_with_paragraph() {
        let found = CitationDetector::new().detect("as laid down in Article 5(2) above");
        assert_eq!(texts(&found), vec!["Article 5(2)"]);
        assert_eq!(found[0].start, 16);
    }

    #[test]
    fn test_multi_citation_is_one_span() {
        let found = CitationDetector::new().detect("Articles 8, 11, 25 to 39 and 42 and 43");
        assert_eq!(texts(&found), vec!["Articles 8, 11, 25 to 39 and 42 and 43"]);
    }

    #[test]
    fn test_tight_notation_with_ranges() {
        let found = CitationDetector::new().detect("see paragraph 2(b), (d) to (f), (h)");
        assert_eq!(texts(&found), vec!["paragraph 2(b), (d) to (f), (h)"]);
    }

    #[test]
    fn test_nested_point_chain() {
        let found = CitationDetector::new().detect("pursuant to point (a) of Article 5(2)");
        assert_eq!(texts(&found), vec!["point (a) of Article 5(2)"]);
    }

    #[test]
    fn test_point_list_with_ranges() {
        let found =
            CitationDetector::new().detect("points (a), (c) to (e) and (g) of Article 6(1)");
        assert_eq!(
            texts(&found),
            vec!["points (a), (c) to (e) and (g) of Article 6(1)"]
        );
    }

    #[test]
    fn test_document_citations() {
        let found = CitationDetector::new()
            .detect("repealing Directive 95/46/EC and Regulation (EC) No 45/2001");
        assert_eq!(
            texts(&found),
            vec!["Directive 95/46/EC", "Regulation (EC) No 45/2001"]
        );
    }

    #[test]
    fn test_demonstratives() {
        let found = CitationDetector::new()
            .detect("this Regulation applies; this Article and that paragraph govern");
        assert_eq!(
            texts(&found),
            vec!["this Regulation", "this Article", "that paragraph"]
        );
    }

    #[test]
    fn test_chain_with_document() {
        let found =
            CitationDetector::new().detect("subject to Article 13 of Directive 95/46/EC");
        assert_eq!(texts(&found), vec!["Article 13 of Directive 95/46/EC"]);
    }

    #[test]
    fn test_thereof_suffix() {
        let found = CitationDetector::new()
            .detect("see Regulation (EU) 2016/679 and Article 22(1) and (4) thereof");
        assert_eq!(
            texts(&found),
            vec!["Regulation (EU) 2016/679", "Article 22(1) and (4) thereof"]
        );
    }

    #[test]
    fn test_ordinal_and_previous() {
        let found = CitationDetector::new()
            .detect("the third subparagraph applies, unlike the previous paragraph");
        assert_eq!(
            texts(&found),
            vec!["the third subparagraph", "the previous paragraph"]
        );
    }

    #[test]
    fn test_those_plural() {
        let found = CitationDetector::new().detect("the obligations of those Articles");
        assert_eq!(texts(&found), vec!["those Articles"]);
    }

    #[test]
    fn test_roman_chapter() {
        let found = CitationDetector::new().detect("as set out in Chapter IV");
        assert_eq!(texts(&found), vec!["Chapter IV"]);
    }

    #[test]
    fn test_plain_prose_yields_nothing() {
        let found = CitationDetector::new().detect("the controller shall inform the data subject");
        assert!(found.is_empty());
    }
}
