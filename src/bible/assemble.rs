//! Turning accepted candidates into [`Reference`] records.

use super::patterns::Joiner;
use super::scanner::Candidate;
use super::{Position, Reference, VerseRef};

/// Build the output record for `candidate`, whose final span ends at `end`.
pub(crate) fn assemble(text: &str, candidate: &Candidate<'_>, end: usize) -> Reference {
    let verses = expand(candidate);
    let start = candidate.alias.start;

    Reference {
        matched: text[start..end].to_string(),
        book: candidate.book.name().to_string(),
        contiguous: is_contiguous(&verses),
        verses,
        position: Position { start, end },
    }
}

/// Expand ranges in written order; chapter-only citations yield one bare chapter.
fn expand(candidate: &Candidate<'_>) -> Vec<VerseRef> {
    let chapter = candidate.chapter;
    if candidate.verses.is_empty() {
        return vec![VerseRef::chapter(chapter)];
    }

    let mut verses: Vec<VerseRef> = Vec::with_capacity(candidate.verses.len());
    let mut previous = 0;
    for token in &candidate.verses {
        let first = match token.joiner {
            Joiner::Range => previous + 1,
            Joiner::Lead | Joiner::Comma => token.value,
        };
        verses.extend((first..=token.value).map(|verse| VerseRef::verse(chapter, verse)));
        previous = token.value;
    }
    verses
}

/// True when each verse follows the one before it by exactly one, in the same chapter.
pub(crate) fn is_contiguous(verses: &[VerseRef]) -> bool {
    verses.windows(2).all(|pair| {
        pair[0].chapter == pair[1].chapter
            && matches!((pair[0].verse, pair[1].verse), (Some(a), Some(b)) if b == a + 1)
    })
}
