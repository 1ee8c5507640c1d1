//! Candidate validation and overlap resolution.
//!
//! Runs in a fixed order: chapter bounds, then leftmost-longest alias
//! collisions, then overlapping spans. Resolution is explicit rather than
//! relying on regex alternation order, so it can be tested on hand-built
//! candidates.

use std::cmp::Reverse;
use std::ops::Range;

use super::scanner::Candidate;

/// Why two candidates cannot both be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// The alias texts overlap (`1 John` and the `John` inside it).
    AliasCollision,
    /// Distinct aliases, but the full citations overlap.
    SpanOverlap,
}

/// Classify how `a` and `b` conflict, if at all.
pub(crate) fn conflict(a: &Candidate<'_>, b: &Candidate<'_>) -> Option<Conflict> {
    if overlaps(&a.alias, &b.alias) {
        Some(Conflict::AliasCollision)
    } else if overlaps(&a.span(), &b.span()) {
        Some(Conflict::SpanOverlap)
    } else {
        None
    }
}

const fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Accept a non-overlapping subset of `candidates`, ordered by start.
pub(crate) fn resolve<'r>(mut candidates: Vec<Candidate<'r>>) -> Vec<Candidate<'r>> {
    candidates.sort_by_key(|c| (c.alias.start, Reverse(c.alias.len())));

    // Accepted spans never overlap, so they stay sorted by both start and end.
    let mut accepted: Vec<Candidate<'r>> = Vec::new();

    for candidate in candidates {
        if !candidate.book.contains_chapter(candidate.chapter) {
            tracing::trace!(
                book = candidate.book.name(),
                chapter = candidate.chapter,
                "Dropped candidate outside the book's chapters"
            );
            continue;
        }

        let start = candidate.alias.start;
        let rivals: Vec<(usize, Conflict)> = accepted
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, kept)| kept.numeral_end > start)
            .filter_map(|(i, kept)| conflict(kept, &candidate).map(|kind| (i, kind)))
            .collect();

        if rivals.is_empty() {
            accepted.push(candidate);
            continue;
        }

        // Sorted input means every accepted rival starts no later and, on a
        // shared start, has the longer alias.
        if rivals.iter().any(|&(_, kind)| kind == Conflict::AliasCollision) {
            tracing::trace!(book = candidate.book.name(), start, "Dropped colliding alias");
            continue;
        }

        let length = candidate.span().len();
        if rivals.iter().all(|&(i, _)| length > accepted[i].span().len()) {
            // Indices were collected back to front, so removal keeps them valid.
            for &(i, _) in &rivals {
                let dropped = accepted.remove(i);
                tracing::trace!(book = dropped.book.name(), "Replaced by a longer overlapping citation");
            }
            accepted.push(candidate);
        } else {
            tracing::trace!(book = candidate.book.name(), start, "Dropped overlapped citation");
        }
    }

    accepted
}
