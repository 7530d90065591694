//! Block preprocessors.
//!
//! Pure `Vec<String> -> Vec<String>` transforms applied to the block list
//! before classification. Composition is order-sensitive: the header
//! filter must run before footnote relocation, or a date header can
//! shadow a footnote back-reference.

use std::sync::LazyLock;

use regex::Regex;

/// A pure transform over the block list.
pub trait BlockPreprocessor {
    fn process(&self, blocks: Vec<String>) -> Vec<String>;
}

/// Publication headers in EU journal extracts start with a `d.m.yyyy`
/// date.
static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]{1,2}\.[1-9][0-9]{3}").expect("valid regex"));

/// Drops header blocks that start with a date.
pub struct HeaderFilter;

impl BlockPreprocessor for HeaderFilter {
    fn process(&self, blocks: Vec<String>) -> Vec<String> {
        blocks
            .into_iter()
            .filter(|block| !DATE_HEADER.is_match(block))
            .collect()
    }
}

/// Paragraph marker glued to its text, e.g. "1.This paragraph". The
/// capture ends where the space must be inserted.
static GLUED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[1-9][0-9]*)\.|\((?:[1-9][0-9]*)\))\S").expect("valid regex")
});

/// Inserts the missing space between a paragraph marker and its text.
///
/// Idempotent: on its own output the marker is followed by a space and
/// the pattern no longer matches.
pub struct InitialSpaceNormalizer;

impl BlockPreprocessor for InitialSpaceNormalizer {
    fn process(&self, blocks: Vec<String>) -> Vec<String> {
        blocks
            .into_iter()
            .map(|block| match GLUED_MARKER.captures(&block) {
                Some(caps) => {
                    let split = caps
                        .get(1)
                        .map(|marker| marker.end())
                        .unwrap_or(block.len());
                    format!("{} {}", &block[..split], &block[split..])
                }
                None => block,
            })
            .collect()
    }
}

/// Start-of-block footnote marker: a parenthesized number.
static FOOTNOTE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([1-9][0-9]*)\)").expect("valid regex"));

/// Whether `text` contains a back-reference ` (marker)` that is not part
/// of paragraph numbering. An enumeration context ("and (2)", "(1), (2)")
/// is excluded by inspecting the three characters before the space.
fn has_footnote_back_reference(text: &str, marker: &str) -> bool {
    let needle = format!(" ({marker})");
    for (position, _) in text.match_indices(&needle) {
        let mut lookback: Vec<char> = text[..position].chars().rev().take(3).collect();
        lookback.reverse();
        if lookback.len() == 3 {
            let window: String = lookback.iter().collect();
            if window == "and" || window.ends_with(',') {
                continue;
            }
        }
        return true;
    }
    false
}

/// Relocates footnotes to the block that references them.
///
/// A block beginning with a parenthesized number is treated as a footnote
/// when an earlier block contains a matching back-reference; the footnote
/// is appended to that block. Unmatched footnotes are left in place.
pub struct FootnoteAppend;

impl BlockPreprocessor for FootnoteAppend {
    fn process(&self, blocks: Vec<String>) -> Vec<String> {
        let mut visited: Vec<String> = Vec::new();
        for block in blocks {
            let Some(caps) = FOOTNOTE_START.captures(&block) else {
                visited.push(block);
                continue;
            };
            let marker = caps[1].to_string();
            // Most recent block first.
            let referencing = visited
                .iter()
                .rposition(|earlier| has_footnote_back_reference(earlier, &marker));
            match referencing {
                Some(index) => {
                    visited[index].push(' ');
                    visited[index].push_str(&block);
                }
                None => visited.push(block),
            }
        }
        visited
    }
}

/// Variant of [`FootnoteAppend`] that drops matched footnotes instead of
/// relocating them.
pub struct FootnoteDelete;

impl BlockPreprocessor for FootnoteDelete {
    fn process(&self, blocks: Vec<String>) -> Vec<String> {
        let mut visited: Vec<String> = Vec::new();
        for block in blocks {
            let Some(caps) = FOOTNOTE_START.captures(&block) else {
                visited.push(block);
                continue;
            };
            let marker = caps[1].to_string();
            let referenced = visited
                .iter()
                .any(|earlier| has_footnote_back_reference(earlier, &marker));
            if !referenced {
                visited.push(block);
            }
        }
        visited
    }
}
