//! Citation grammar following a book alias.
//!
//! Matches `<chapter>` or `<chapter> [:.] <verse-list>` at the start of the
//! text after an alias, e.g. `. xvii. 20, 21, 23`, `, viii. 12`, ` 4:23-24`.
//! The `regex` crate runs these as finite automata, so matching stays linear
//! in the scanned span no matter how long a run of digits or commas gets.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::numerals;
use crate::constants::numerals::{MAX_ARABIC_DIGITS, MAX_EXPANDED_VERSES, MAX_ROMAN_LEN};

/// Chapter numerals: arabic, or roman in any case (plus the `u`/`j` substitutions).
fn chapter_numeral() -> String {
    format!(r"[0-9]{{1,{MAX_ARABIC_DIGITS}}}|[ivxlcjuIVXLCJU]{{1,{MAX_ROMAN_LEN}}}")
}

/// Verse numerals: arabic, or lowercase roman.
fn verse_numeral() -> String {
    format!(r"[0-9]{{1,{MAX_ARABIC_DIGITS}}}|[ivxlcju]{{1,{MAX_ROMAN_LEN}}}")
}

/// Book terminator, chapter, and an optional separator plus verse list.
#[allow(clippy::expect_used)]
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    let (chapter, verse) = (chapter_numeral(), verse_numeral());
    Regex::new(&format!(
        r"^(?:\.\s*,?|,)?\s*(?P<chapter>{chapter})\b(?:\s*[:.]\s*(?P<verses>(?:{verse})\b(?:\s*(?:,|--?|–|—)\s*(?:{verse})\b)*))?"
    ))
    .expect("valid regex: CITATION")
});

/// One verse inside an already matched verse list.
#[allow(clippy::expect_used)]
static VERSE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let verse = verse_numeral();
    Regex::new(&format!(r"(?P<joiner>\s*(?:,|--?|–|—)\s*)?(?P<num>{verse})"))
        .expect("valid regex: VERSE_TOKEN")
});

/// How a verse attaches to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Joiner {
    /// First verse of the list.
    Lead,
    /// `,`: a separate verse.
    Comma,
    /// `-`, `--`, en or em dash: the end of a range.
    Range,
}

/// A parsed verse number and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerseToken {
    pub(crate) joiner: Joiner,
    pub(crate) value: u32,
    pub(crate) span: Range<usize>,
}

impl VerseToken {
    /// Move the span by `offset` bytes.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        Self {
            span: self.span.start + offset..self.span.end + offset,
            ..self
        }
    }
}

/// The numeric part of a citation, with offsets relative to the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawCitation {
    pub(crate) chapter: u32,
    /// End of the chapter numeral.
    pub(crate) chapter_end: usize,
    /// Verses in written order; empty for a chapter-only citation.
    pub(crate) verses: Vec<VerseToken>,
}

impl RawCitation {
    /// End of the last numeral belonging to the citation.
    #[cfg(test)]
    pub(crate) fn numeral_end(&self) -> usize {
        self.verses.last().map_or(self.chapter_end, |token| token.span.end)
    }
}

/// Parse the citation continuation at the start of `rest`.
///
/// Returns `None` when no chapter numeral follows, when a roman chapter is
/// really an abbreviation (`i.e.`), or when a bare uppercase `I` has no verse
/// after it (`Mark, I tell you`). A verse that fails to parse (bad roman
/// numeral, zero, a change of numeral style, a range running backwards, or one
/// expanding past [`MAX_EXPANDED_VERSES`]) ends the list before it; if that
/// leaves nothing the citation is chapter-only.
pub(crate) fn parse(rest: &str) -> Option<RawCitation> {
    let caps = CITATION.captures(rest)?;
    let chapter_match = caps.name("chapter")?;
    if starts_abbreviation(rest, chapter_match.as_str(), chapter_match.end()) {
        return None;
    }
    let chapter = numerals::parse_numeral(chapter_match.as_str())?;

    let verses = caps
        .name("verses")
        .map(|list| tokenize_verses(rest, list.range()))
        .unwrap_or_default();

    if chapter_match.as_str() == "I" && verses.is_empty() {
        return None;
    }

    Some(RawCitation {
        chapter,
        chapter_end: chapter_match.end(),
        verses,
    })
}

/// Whether `token` is roman and runs straight into `.` and a letter, as in `i.e.`.
fn starts_abbreviation(rest: &str, token: &str, end: usize) -> bool {
    if is_arabic(token) {
        return false;
    }
    let mut after = rest[end..].chars();
    after.next() == Some('.') && after.next().is_some_and(char::is_alphabetic)
}

fn is_arabic(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit())
}

fn tokenize_verses(rest: &str, list: Range<usize>) -> Vec<VerseToken> {
    let mut tokens: Vec<VerseToken> = Vec::new();
    let mut expanded: usize = 0;

    for caps in VERSE_TOKEN.captures_iter(&rest[list.clone()]) {
        let Some(num) = caps.name("num") else { break };
        let span = list.start + num.start()..list.start + num.end();
        let joiner = match caps.name("joiner") {
            None => Joiner::Lead,
            Some(j) if j.as_str().contains(',') => Joiner::Comma,
            Some(_) => Joiner::Range,
        };

        // `3:16, i.e.`: later verses keep the lead verse's numeral style.
        let arabic = is_arabic(num.as_str());
        if tokens.first().is_some_and(|lead| is_arabic(&rest[lead.span.clone()]) != arabic)
            || starts_abbreviation(rest, num.as_str(), span.end)
        {
            break;
        }

        let Some(value) = numerals::parse_numeral(num.as_str()) else {
            break;
        };
        let added = match (joiner, tokens.last()) {
            (Joiner::Range, Some(prev)) if value > prev.value => {
                usize::try_from(value - prev.value).unwrap_or(usize::MAX)
            }
            (Joiner::Range, _) => break,
            _ => 1,
        };
        expanded = expanded.saturating_add(added);
        if expanded > MAX_EXPANDED_VERSES {
            break;
        }

        tokens.push(VerseToken { joiner, value, span });
    }

    tokens
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn values(raw: &RawCitation) -> Vec<u32> {
        raw.verses.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_chapter_only() {
        let raw = parse(". Xxxi").unwrap();
        assert_eq!(raw.chapter, 31);
        assert!(raw.verses.is_empty());
        assert_eq!(raw.numeral_end(), 6);
    }

    #[test]
    fn test_separator_without_verse_is_chapter_only() {
        let raw = parse(". i. And").unwrap();
        assert_eq!(raw.chapter, 1);
        assert!(raw.verses.is_empty());
        assert_eq!(raw.numeral_end(), 3);
    }

    #[test]
    fn test_comma_after_book() {
        let raw = parse(", viii. 12.) The").unwrap();
        assert_eq!(raw.chapter, 8);
        assert_eq!(values(&raw), vec![12]);
        assert_eq!(raw.numeral_end(), 10);
    }

    #[test]
    fn test_colon_verse_list() {
        let raw = parse(" 12:5,6,7").unwrap();
        assert_eq!(raw.chapter, 12);
        assert_eq!(values(&raw), vec![5, 6, 7]);
        assert!(raw.verses.iter().skip(1).all(|t| t.joiner == Joiner::Comma));
    }

    #[test]
    fn test_dash_ranges() {
        let raw = parse(" i. 4--6.)").unwrap();
        assert_eq!(values(&raw), vec![4, 6]);
        assert_eq!(raw.verses[1].joiner, Joiner::Range);

        let raw = parse(" 4:23–24").unwrap();
        assert_eq!(values(&raw), vec![23, 24]);
        assert_eq!(raw.verses[1].joiner, Joiner::Range);
    }

    #[test]
    fn test_trailing_comma_is_not_a_verse() {
        let raw = parse(" iX. 23,) and").unwrap();
        assert_eq!(raw.chapter, 9);
        assert_eq!(values(&raw), vec![23]);
    }

    #[test]
    fn test_backwards_range_is_cut() {
        let raw = parse(" 4:23-2").unwrap();
        assert_eq!(values(&raw), vec![23]);
    }

    #[test]
    fn test_no_numeral() {
        assert!(parse(", chap. xlix. 6").is_none());
        assert!(parse(" D.").is_none());
        assert!(parse(" is here").is_none());
        assert!(parse("1234").is_none());
    }

    #[test]
    fn test_abbreviation_is_not_a_verse() {
        let raw = parse(" 3:16, i.e. the gospel").unwrap();
        assert_eq!(values(&raw), vec![16]);
        assert_eq!(raw.numeral_end(), 5);

        let raw = parse(". v. 16, i.").unwrap();
        assert_eq!(values(&raw), vec![16]);

        let raw = parse(" 3. i.e. the").unwrap();
        assert!(raw.verses.is_empty());
        assert!(parse(" i.e. the").is_none());
    }

    #[test]
    fn test_verses_keep_lead_numeral_style() {
        let raw = parse(" v. xvi, xvii, 3").unwrap();
        assert_eq!(values(&raw), vec![16, 17]);

        let raw = parse(" 5:16, 17, iv").unwrap();
        assert_eq!(values(&raw), vec![16, 17]);
    }

    #[test]
    fn test_lone_capital_i_needs_a_verse() {
        assert!(parse(", I tell you").is_none());
        assert!(parse(" I think").is_none());
        let raw = parse(" I. 5").unwrap();
        assert_eq!(raw.chapter, 1);
        assert_eq!(values(&raw), vec![5]);
    }

    #[test]
    fn test_expansion_is_capped() {
        let raw = parse(" 1:1-999, 3").unwrap();
        assert_eq!(values(&raw), vec![1]);

        let list = format!(" 1:{}", "1-150, ".repeat(10));
        let raw = parse(&list).unwrap();
        let total: usize = raw
            .verses
            .iter()
            .map(|t| if t.joiner == Joiner::Range { 149 } else { 1 })
            .sum();
        assert!(total <= MAX_EXPANDED_VERSES);
        assert_eq!(raw.verses.len(), 7);
    }

    #[test]
    fn test_shifted() {
        let token = VerseToken { joiner: Joiner::Lead, value: 3, span: 1..2 };
        assert_eq!(token.shifted(10).span, 11..12);
    }
}
