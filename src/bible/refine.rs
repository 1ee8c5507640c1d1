//! Trailing punctuation ownership.
//!
//! Inside a parenthetical aside, a citation owns the punctuation and spaces up
//! to the closing parenthesis: `(1 Cor. i. 24.)` matches `1 Cor. i. 24.`.
//! Anywhere else the match stops at the last numeral, leaving a following
//! `.` `,` `;` or `:` to the surrounding prose.

use std::collections::HashMap;

/// Matching parentheses in one input, indexed by the closing byte offset.
#[derive(Debug, Default)]
pub(crate) struct ParenIndex {
    opener_of: HashMap<usize, usize>,
}

impl ParenIndex {
    /// Pair every `)` with its `(` in a single pass. Unbalanced closers are left out.
    pub(crate) fn new(text: &str) -> Self {
        let mut open: Vec<usize> = Vec::new();
        let mut opener_of = HashMap::new();

        for (i, c) in text.char_indices() {
            match c {
                '(' => open.push(i),
                ')' => {
                    if let Some(start) = open.pop() {
                        opener_of.insert(i, start);
                    }
                }
                _ => {}
            }
        }

        Self { opener_of }
    }

    /// Whether the `)` at `close` pairs with a `(` before `start`.
    fn encloses(&self, close: usize, start: usize) -> bool {
        self.opener_of.get(&close).is_some_and(|&open| open < start)
    }
}

const fn is_trailing_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | ';' | ':')
}

/// Final end offset of a citation spanning `start..numeral_end`.
pub(crate) fn refine_end(text: &str, parens: &ParenIndex, start: usize, numeral_end: usize) -> usize {
    for (offset, c) in text[numeral_end..].char_indices() {
        if c == ')' {
            let close = numeral_end + offset;
            return if parens.encloses(close, start) { close } else { numeral_end };
        }
        if !(is_trailing_punctuation(c) || c.is_whitespace()) {
            break;
        }
    }
    numeral_end
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn refined(text: &str, citation: &str) -> String {
        let start = text.find(citation).unwrap();
        let parens = ParenIndex::new(text);
        let end = refine_end(text, &parens, start, start + citation.len());
        text[start..end].to_string()
    }

    #[test]
    fn test_absorbs_punctuation_before_closing_paren() {
        assert_eq!(refined("Foo (1 Cor. i. 24.) bar.", "1 Cor. i. 24"), "1 Cor. i. 24.");
        assert_eq!(refined("Foo (1 Cor. i. 24;) bar.", "1 Cor. i. 24"), "1 Cor. i. 24;");
        assert_eq!(refined("Foo (1 Cor. 1:1-3.  ) bar.", "1 Cor. 1:1-3"), "1 Cor. 1:1-3.  ");
        assert_eq!(refined("(Matt. xi. 29) the", "Matt. xi. 29"), "Matt. xi. 29");
    }

    #[test]
    fn test_leaves_punctuation_outside_parens() {
        assert_eq!(refined("Foo is 1 Cor. i. 24. And...", "1 Cor. i. 24"), "1 Cor. i. 24");
        assert_eq!(refined("Foo is 1 Cor. i. 24: bar.", "1 Cor. i. 24"), "1 Cor. i. 24");
    }

    #[test]
    fn test_words_before_paren_block_absorption() {
        assert_eq!(
            refined("(Hosea, xii. 6; Isai. xl. 31;)", "Hosea, xii. 6"),
            "Hosea, xii. 6"
        );
    }

    #[test]
    fn test_unpaired_closer_is_not_owned() {
        assert_eq!(refined("Rom. v. 11.) Abiding", "Rom. v. 11"), "Rom. v. 11");
    }

    #[test]
    fn test_paren_index_pairs_nested() {
        let parens = ParenIndex::new("a (b (c) d) e");
        assert!(parens.encloses(7, 6));
        assert!(parens.encloses(10, 3));
        assert!(!parens.encloses(7, 4));
    }
}
