//! Translation of numbering tokens used in legal drafting.
//!
//! Covers the three numbering conventions found in EU regulations: roman
//! numerals for chapters and titles, alphabetic markers for points, and
//! ordinal words ("the third subparagraph").

/// Convert a roman numeral to a number.
///
/// Scans right to left and subtracts a primitive when a larger one has
/// already been seen, so subtractive forms like "IV" and "XC" work.
/// Behaviour on malformed numerals is undefined and not defended against;
/// characters outside the roman alphabet contribute zero.
#[must_use]
pub fn roman_to_decimal(numeral: &str) -> i32 {
    fn primitive(c: char) -> i32 {
        match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        }
    }

    let mut acc = 0;
    let mut last = 0;
    for c in numeral.chars().rev() {
        let value = primitive(c);
        if last > value {
            acc -= value;
        } else {
            acc += value;
        }
        last = value;
    }
    acc
}

/// Convert an alphabetic point marker to a number: 'a' -> 1 ... 'z' -> 26.
///
/// The marker "ii" maps to 10 so that a point list running (h), (i), (ii)
/// keeps its document order; drafters reuse the roman-looking "ii" as the
/// letter after (i).
#[must_use]
pub fn alpha_to_decimal(marker: &str) -> i32 {
    if marker.eq_ignore_ascii_case("ii") {
        return 10;
    }
    marker
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase() as i32 - 'a' as i32 + 1)
        .unwrap_or(0)
}

/// Convert an ordinal word to a number. Only the words that appear in
/// citation practice are covered.
#[must_use]
pub fn ordinal_to_decimal(word: &str) -> Option<i32> {
    match word.to_lowercase().as_str() {
        "first" => Some(1),
        "second" => Some(2),
        "third" => Some(3),
        "fourth" => Some(4),
        "fifth" => Some(5),
        "sixth" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roman_basic() {
        assert_eq!(roman_to_decimal("I"), 1);
        assert_eq!(roman_to_decimal("III"), 3);
        assert_eq!(roman_to_decimal("IV"), 4);
        assert_eq!(roman_to_decimal("IX"), 9);
        assert_eq!(roman_to_decimal("XIV"), 14);
        assert_eq!(roman_to_decimal("XC"), 90);
        assert_eq!(roman_to_decimal("MMXXIV"), 2024);
    }

    #[test]
    fn test_roman_lowercase() {
        assert_eq!(roman_to_decimal("iv"), 4);
        assert_eq!(roman_to_decimal("xii"), 12);
    }

    #[test]
    fn test_alpha_full_range() {
        assert_eq!(alpha_to_decimal("a"), 1);
        assert_eq!(alpha_to_decimal("b"), 2);
        assert_eq!(alpha_to_decimal("z"), 26);
    }

    #[test]
    fn test_alpha_double_i() {
        assert_eq!(alpha_to_decimal("ii"), 10);
        assert_eq!(alpha_to_decimal("II"), 10);
    }

    #[test]
    fn test_ordinal_words() {
        assert_eq!(ordinal_to_decimal("first"), Some(1));
        assert_eq!(ordinal_to_decimal("Third"), Some(3));
        assert_eq!(ordinal_to_decimal("sixth"), Some(6));
        assert_eq!(ordinal_to_decimal("seventh"), None);
    }
}
