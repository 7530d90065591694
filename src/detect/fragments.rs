//! Reusable regular-expression fragments for the citation grammar.
//!
//! The detector composes these into one pattern; the resolver reuses
//! them in its per-fragment sub-patterns so that both sides agree on
//! what a number token looks like.

use crate::numerals::{alpha_to_decimal, roman_to_decimal};

/// Plain integer without leading zeros.
pub const NUMBER: &str = r"(?:[1-9][0-9]*)";

/// Parenthesized paragraph number, "(3)".
pub const PAREN_NUMBER: &str = r"(?:\((?:[1-9][0-9]*)\))";

/// Parenthesized point marker, "(a)" through "(z)" plus the drafting
/// oddity "(ii)".
pub const LETTER: &str = r"(?:\((?:[a-z]|ii)\))";

/// Roman numeral. Permissive: also matches malformed numerals, whose
/// translation is undefined.
pub const ROMAN: &str = r"(?:[IVXLCDM]+)";

/// Ordinal words used in citation practice.
pub const ORDINAL: &str = r"(?:first|second|third|fourth|fifth|sixth)";

pub const CONJUNCTION: &str = r"(?:and|or)";

/// Official document numbering, e.g. " (EU) 2016/679" or " No 45/2001".
/// See <https://publications.europa.eu/code/en/en-110202.htm>.
pub const DOCUMENT_NUMBERING: &str =
    r"(?:(?:\s\(\w{2,7}\))?(?:\sNo)?\s[1-9][0-9]*(?:/[1-9][0-9]*)?(?:/\w{2,7}))";

/// Wrap a number fragment so it also accepts the range form "X to Y".
#[must_use]
pub fn or_range(fragment: &str) -> String {
    format!(r"(?:{fragment}(?:\sto\s{fragment})?)")
}

/// The number formats a citation token can take, with their grammar
/// fragment and translation to a node number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Decimal,
    ParenNumber,
    Letter,
    Roman,
}

impl NumberFormat {
    #[must_use]
    pub fn fragment(self) -> &'static str {
        match self {
            Self::Decimal => NUMBER,
            Self::ParenNumber => PAREN_NUMBER,
            Self::Letter => LETTER,
            Self::Roman => ROMAN,
        }
    }

    /// Translate a matched token to a node number. Returns `None` for
    /// tokens the format cannot interpret.
    #[must_use]
    pub fn translate(self, token: &str) -> Option<i32> {
        let trimmed = token.trim_matches(|c| c == '(' || c == ')');
        match self {
            Self::Decimal | Self::ParenNumber => trimmed.parse().ok(),
            Self::Letter => (!trimmed.is_empty()).then(|| alpha_to_decimal(trimmed)),
            Self::Roman => {
                let value = roman_to_decimal(trimmed);
                (value > 0).then_some(value)
            }
        }
    }
}
