//! Candidate discovery.
//!
//! Every book's alias matcher runs over the text left to right; each alias
//! followed by a citation continuation becomes a [`Candidate`]. Candidates
//! from different books may overlap (`1 John` also contains `John`), which is
//! left to the disambiguation pass.

use std::cmp::Reverse;
use std::ops::Range;

use super::books::{Book, BookRegistry};
use super::patterns::{self, VerseToken};

/// A tentative citation, not yet validated against its book.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<'r> {
    pub(crate) book: &'r Book,
    /// Byte range of the alias text.
    pub(crate) alias: Range<usize>,
    pub(crate) chapter: u32,
    /// Verse tokens with absolute offsets; empty for chapter-only citations.
    pub(crate) verses: Vec<VerseToken>,
    /// End of the last numeral, before any trailing punctuation.
    pub(crate) numeral_end: usize,
}

impl Candidate<'_> {
    /// Alias start to numeral end.
    pub(crate) const fn span(&self) -> Range<usize> {
        self.alias.start..self.numeral_end
    }
}

/// Finds candidates in one input buffer.
pub(crate) struct Scanner<'r, 't> {
    registry: &'r BookRegistry,
    text: &'t str,
}

impl<'r, 't> Scanner<'r, 't> {
    pub(crate) const fn new(registry: &'r BookRegistry, text: &'t str) -> Self {
        Self { registry, text }
    }

    /// All candidates, ordered by alias start with longer aliases first.
    pub(crate) fn candidates(&self) -> Vec<Candidate<'r>> {
        let mut found: Vec<Candidate<'r>> = self
            .registry
            .books()
            .iter()
            .flat_map(|book| {
                book.alias_matches(self.text)
                    .filter_map(move |alias| self.extend(book, alias))
            })
            .collect();

        found.sort_by_key(|c| (c.alias.start, Reverse(c.alias.len())));
        found
    }

    /// Try to extend an alias match with a chapter and verse list.
    fn extend(&self, book: &'r Book, alias: Range<usize>) -> Option<Candidate<'r>> {
        let raw = patterns::parse(&self.text[alias.end..])?;
        let base = alias.end;

        let mut verses: Vec<VerseToken> = raw
            .verses
            .into_iter()
            .map(|token| token.shifted(base))
            .collect();

        // `John 3:16, 1 John 2:2`: the `1` opens the next citation.
        if let Some(cut) = verses
            .iter()
            .position(|token| self.starts_citation(token.span.start))
        {
            tracing::trace!(book = book.name(), at = verses[cut].span.start, "Verse list cut at next citation");
            verses.truncate(cut);
        }

        let numeral_end = verses
            .last()
            .map_or(base + raw.chapter_end, |token| token.span.end);

        Some(Candidate {
            book,
            alias,
            chapter: raw.chapter,
            verses,
            numeral_end,
        })
    }

    /// Whether a complete, in-bounds citation begins exactly at `pos`.
    fn starts_citation(&self, pos: usize) -> bool {
        let rest = &self.text[pos..];
        self.registry.books().iter().any(|book| {
            book.alias_prefix(rest).is_some_and(|len| {
                patterns::parse(&rest[len..]).is_some_and(|raw| book.contains_chapter(raw.chapter))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::books::registry;

    fn scan(text: &str) -> Vec<Candidate<'static>> {
        Scanner::new(registry(), text).candidates()
    }

    #[test]
    fn test_bare_book_name_is_not_a_candidate() {
        assert!(scan("Isaiah, the prophet").is_empty());
        assert!(scan("blah blah").is_empty());
    }

    #[test]
    fn test_nested_alias_yields_two_candidates() {
        let found = scan("(See 1 John i. 7.)");
        let books: Vec<_> = found.iter().map(|c| c.book.name()).collect();
        assert_eq!(books, vec!["1 John", "John"]);
        assert_eq!(found[0].alias, 5..11);
        assert_eq!(found[1].alias, 7..11);
    }

    #[test]
    fn test_candidate_span_excludes_trailing_punctuation() {
        let text = "Foo (1 Cor. i. 24.) bar.";
        let found = scan(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].span()], "1 Cor. i. 24");
        assert_eq!(found[0].chapter, 1);
    }

    #[test]
    fn test_out_of_bounds_chapter_is_still_a_candidate() {
        let found = scan("In Isaiah 67:19, we read");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].chapter, 67);
    }

    #[test]
    fn test_verse_list_stops_before_next_citation() {
        let text = "John 3:16, 1 John 2:2";
        let found = scan(text);
        let john = found.iter().find(|c| c.alias.start == 0).unwrap();
        assert_eq!(john.verses.len(), 1);
        assert_eq!(&text[john.span()], "John 3:16");
    }

    #[test]
    fn test_chapter_only_when_verse_opens_next_citation() {
        let text = "(2 Kings v. 1 Cor. ix. 27)";
        let kings = scan(text).into_iter().find(|c| c.book.name() == "2 Kings").unwrap();
        assert!(kings.verses.is_empty());
        assert_eq!(&text[kings.span()], "2 Kings v");
    }
}
