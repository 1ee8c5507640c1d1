//! Bible citation finding for free-form prose.
//!
//! [`find`] scans text for citations such as `Jn 4:23-24`, `(John xvii. 20,
//! 21, 23, 26.)` or `In Jer. Xxxi` and returns one [`Reference`] per citation,
//! with the exact byte span it occupies. Text that only looks like a citation
//! (`Hebrew 12:14`, `Isaiah 67:19`, `Am I not`) yields nothing: a missed
//! citation is preferred over a spurious one.
//!
//! The pipeline runs in one direction:
//! books/patterns → [`scanner`] → [`disambiguate`] → [`refine`] → [`assemble`].

mod assemble;
mod books;
mod disambiguate;
mod numerals;
mod patterns;
mod refine;
mod scanner;

use serde::{Deserialize, Serialize};

use self::refine::ParenIndex;
use self::scanner::Scanner;

/// One chapter, or one verse within a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    /// Chapter number, within the book's chapter count.
    pub chapter: u32,
    /// Verse number; `None` for chapter-only citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
}

impl VerseRef {
    /// A whole chapter.
    #[must_use]
    pub const fn chapter(chapter: u32) -> Self {
        Self { chapter, verse: None }
    }

    /// A single verse.
    #[must_use]
    pub const fn verse(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse: Some(verse) }
    }
}

/// Byte offsets of a match in the scanned text (`text[start..end]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

/// A citation found in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The exact matched text, including any owned trailing punctuation.
    #[serde(rename = "match")]
    pub matched: String,
    /// Canonical book name (e.g. "1 Corinthians").
    pub book: String,
    /// Verses in written order, ranges expanded. Never empty.
    pub verses: Vec<VerseRef>,
    /// Whether consecutive verses increase by exactly one.
    pub contiguous: bool,
    /// Where `matched` sits in the scanned text.
    pub position: Position,
}

impl Reference {
    /// Format as a normalized citation (e.g. "John 17:20-21,23,26", "Jeremiah 31").
    pub fn display(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut index = 0;

        while let Some(first) = self.verses.get(index) {
            let Some(verse) = first.verse else {
                parts.push(first.chapter.to_string());
                index += 1;
                continue;
            };

            // Collect this chapter's verses as runs of consecutive numbers.
            let mut runs: Vec<(u32, u32)> = Vec::new();
            let (mut from, mut to) = (verse, verse);
            index += 1;
            while let Some(next) = self.verses.get(index) {
                let Some(v) = next.verse.filter(|_| next.chapter == first.chapter) else {
                    break;
                };
                if v == to + 1 {
                    to = v;
                } else {
                    runs.push((from, to));
                    (from, to) = (v, v);
                }
                index += 1;
            }
            runs.push((from, to));

            let runs: Vec<String> = runs
                .into_iter()
                .map(|(from, to)| if from == to { from.to_string() } else { format!("{from}-{to}") })
                .collect();
            parts.push(format!("{}:{}", first.chapter, runs.join(",")));
        }

        format!("{} {}", self.book, parts.join("; "))
    }
}

/// Ordering of the references returned by [`Finder::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputOrder {
    /// Canonical book order, then position within the text.
    #[default]
    Canonical,
    /// Plain left-to-right position in the text.
    Textual,
}

impl OutputOrder {
    /// Returns the configuration name of this ordering.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Textual => "text",
        }
    }

    /// Parse a configuration name (`canonical` or `text`), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "canonical" | "book" => Some(Self::Canonical),
            "text" | "textual" | "position" => Some(Self::Textual),
            _ => None,
        }
    }
}

/// Finds Bible citations in text.
///
/// Holds no per-call state; one finder can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Finder {
    order: OutputOrder,
}

impl Finder {
    /// A finder with canonical output ordering.
    #[must_use]
    pub const fn new() -> Self {
        Self { order: OutputOrder::Canonical }
    }

    /// Use `order` for returned references.
    #[must_use]
    pub const fn with_order(mut self, order: OutputOrder) -> Self {
        self.order = order;
        self
    }

    /// The ordering this finder applies.
    #[must_use]
    pub const fn order(&self) -> OutputOrder {
        self.order
    }

    /// Find every citation in `text`.
    pub fn find(&self, text: &str) -> Vec<Reference> {
        let registry = books::registry();
        let candidates = Scanner::new(registry, text).candidates();
        let scanned = candidates.len();
        let accepted = disambiguate::resolve(candidates);

        let parens = ParenIndex::new(text);
        let mut found: Vec<(usize, Reference)> = accepted
            .iter()
            .map(|candidate| {
                let end = refine::refine_end(text, &parens, candidate.alias.start, candidate.numeral_end);
                (candidate.book.ordinal(), assemble::assemble(text, candidate, end))
            })
            .collect();

        match self.order {
            OutputOrder::Canonical => found.sort_by_key(|(ordinal, r)| (*ordinal, r.position.start)),
            OutputOrder::Textual => found.sort_by_key(|(_, r)| r.position.start),
        }

        tracing::debug!(
            candidates = scanned,
            references = found.len(),
            order = self.order.name(),
            "Scanned text for citations"
        );
        found.into_iter().map(|(_, reference)| reference).collect()
    }
}

/// Find every citation in `text`, in canonical book order.
pub fn find(text: &str) -> Vec<Reference> {
    Finder::new().find(text)
}

/// Resolve a book alias (`Jer.`, `1 Cor`, `Song of Songs`) to its canonical name.
pub fn resolve_book(alias: &str) -> Option<&'static str> {
    books::registry().resolve(alias).map(books::Book::name)
}
