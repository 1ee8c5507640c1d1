//! Canonical book catalog and alias matching.
//!
//! Each book carries the alias stems authors use for it. Numbered books list
//! their stems without the ordinal; the registry expands them with every
//! ordinal spelling (`1`, `I`, `1st`, `First`). Words that double as common
//! English (`Is`, `So`, `Am`) are deliberately absent.

use std::collections::HashMap;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::registry::{BOOK_COUNT, MAX_CHAPTERS, MAX_ORDINAL_PREFIX};
use crate::error::{Error, Result};

/// Static row describing one canonical book.
struct BookSpec {
    name: &'static str,
    chapters: u32,
    /// Ordinal prefix for numbered books (`1 Corinthians` carries `Some(1)`).
    number: Option<u8>,
    /// Alias stems besides the canonical name, without any ordinal prefix.
    stems: &'static [&'static str],
}

const fn book(name: &'static str, chapters: u32, stems: &'static [&'static str]) -> BookSpec {
    BookSpec { name, chapters, number: None, stems }
}

const fn numbered(
    name: &'static str,
    number: u8,
    chapters: u32,
    stems: &'static [&'static str],
) -> BookSpec {
    BookSpec { name, chapters, number: Some(number), stems }
}

const BOOKS: &[BookSpec] = &[
    book("Genesis", 50, &["Gen", "Gn"]),
    book("Exodus", 40, &["Exod", "Ex"]),
    book("Leviticus", 27, &["Lev", "Lv"]),
    book("Numbers", 36, &["Num", "Numb"]),
    book("Deuteronomy", 34, &["Deut", "Deu", "Dt"]),
    book("Joshua", 24, &["Josh", "Jos"]),
    book("Judges", 21, &["Judg", "Jdg"]),
    book("Ruth", 4, &[]),
    numbered("1 Samuel", 1, 31, &["Sam", "Sm"]),
    numbered("2 Samuel", 2, 24, &["Sam", "Sm"]),
    numbered("1 Kings", 1, 22, &["Kgs"]),
    numbered("2 Kings", 2, 25, &["Kgs"]),
    numbered("1 Chronicles", 1, 29, &["Chron", "Chr"]),
    numbered("2 Chronicles", 2, 36, &["Chron", "Chr"]),
    book("Ezra", 10, &[]),
    book("Nehemiah", 13, &["Neh"]),
    book("Esther", 10, &["Esth", "Est"]),
    book("Job", 42, &[]),
    book("Psalms", 150, &["Psalm", "Psa", "Pss", "Ps"]),
    book("Proverbs", 31, &["Prov"]),
    book("Ecclesiastes", 12, &["Eccles", "Eccle", "Eccl", "Ecc", "Qoh"]),
    book("Song of Solomon", 8, &["Song of Songs", "Canticles", "Cant", "Song"]),
    book("Isaiah", 66, &["Isai", "Isa"]),
    book("Jeremiah", 52, &["Jerem", "Jer"]),
    book("Lamentations", 5, &["Lam"]),
    book("Ezekiel", 48, &["Ezek", "Eze"]),
    book("Daniel", 12, &["Dan"]),
    book("Hosea", 14, &["Hos"]),
    book("Joel", 3, &[]),
    book("Amos", 9, &[]),
    book("Obadiah", 1, &["Obad"]),
    book("Jonah", 4, &[]),
    book("Micah", 7, &["Mic"]),
    book("Nahum", 3, &["Nah"]),
    book("Habakkuk", 3, &["Hab"]),
    book("Zephaniah", 3, &["Zeph"]),
    book("Haggai", 2, &["Hag"]),
    book("Zechariah", 14, &["Zech", "Zec"]),
    // `Mai` is a common OCR misreading of `Mal`
    book("Malachi", 4, &["Mal", "Mai"]),
    book("Matthew", 28, &["Matt", "Mat", "Mt"]),
    book("Mark", 16, &["Mrk", "Mk"]),
    book("Luke", 24, &["Luk", "Lk"]),
    book("John", 21, &["Joh", "Jhn", "Jn"]),
    book("Acts", 28, &[]),
    book("Romans", 16, &["Rom", "Rm"]),
    numbered("1 Corinthians", 1, 16, &["Cor"]),
    numbered("2 Corinthians", 2, 13, &["Cor"]),
    book("Galatians", 6, &["Gal"]),
    book("Ephesians", 6, &["Ephes", "Eph"]),
    book("Philippians", 4, &["Philip", "Phil", "Php"]),
    book("Colossians", 4, &["Coloss", "Col"]),
    numbered("1 Thessalonians", 1, 5, &["Thess", "Thes"]),
    numbered("2 Thessalonians", 2, 3, &["Thess", "Thes"]),
    numbered("1 Timothy", 1, 6, &["Tim"]),
    numbered("2 Timothy", 2, 4, &["Tim"]),
    book("Titus", 3, &["Tit"]),
    book("Philemon", 1, &["Philem", "Phm"]),
    book("Hebrews", 13, &["Heb"]),
    book("James", 5, &["Jam", "Jas"]),
    numbered("1 Peter", 1, 5, &["Pet", "Pt"]),
    numbered("2 Peter", 2, 3, &["Pet", "Pt"]),
    numbered("1 John", 1, 5, &["John", "Joh", "Jn"]),
    numbered("2 John", 2, 1, &["John", "Joh", "Jn"]),
    numbered("3 John", 3, 1, &["John", "Joh", "Jn"]),
    book("Jude", 1, &[]),
    book("Revelation", 22, &["Revelations", "Apocalypse", "Apoc", "Rev"]),
];

lazy_static! {
    /// Process-wide registry, built and validated on first use.
    #[allow(clippy::expect_used)]
    static ref REGISTRY: BookRegistry = BookRegistry::build().expect("valid book registry");
}

/// The shared, immutable book registry.
pub(crate) fn registry() -> &'static BookRegistry {
    &REGISTRY
}

/// A canonical book with its compiled alias matchers.
#[derive(Debug)]
pub(crate) struct Book {
    name: &'static str,
    ordinal: usize,
    chapters: u32,
    aliases: Vec<String>,
    /// Word-bounded alias matcher used to scan text.
    pattern: Regex,
    /// Same alternation anchored at the start of the haystack.
    anchored: Regex,
}

impl Book {
    fn compile(spec: &BookSpec, ordinal: usize) -> Result<Self> {
        let mut aliases = expand_aliases(spec)?;
        // Longest first so the alternation prefers `Song of Solomon` over `Song`.
        aliases.sort_by_key(|alias| std::cmp::Reverse(alias.len()));

        let alternation = aliases
            .iter()
            .map(|alias| alias_pattern(alias))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            name: spec.name,
            ordinal,
            chapters: spec.chapters,
            pattern: Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?,
            anchored: Regex::new(&format!(r"(?i)^(?:{alternation})\b"))?,
            aliases,
        })
    }

    /// Canonical book name.
    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    /// Position in canonical order, starting at 1 for Genesis.
    pub(crate) const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Number of chapters in this book.
    #[cfg(test)]
    pub(crate) const fn chapters(&self) -> u32 {
        self.chapters
    }

    /// Whether `chapter` exists in this book.
    pub(crate) const fn contains_chapter(&self, chapter: u32) -> bool {
        chapter >= 1 && chapter <= self.chapters
    }

    /// Every alias match for this book in `text`, left to right.
    pub(crate) fn alias_matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.pattern.find_iter(text).map(|m| m.range())
    }

    /// Length of the alias starting exactly at the beginning of `text`, if any.
    pub(crate) fn alias_prefix(&self, text: &str) -> Option<usize> {
        self.anchored.find(text).map(|m| m.end())
    }
}

/// Immutable catalog of the canonical books.
#[derive(Debug)]
pub(crate) struct BookRegistry {
    books: Vec<Book>,
    by_alias: HashMap<String, usize>,
}

impl BookRegistry {
    /// Build the registry from the static table, validating it as it goes.
    pub(crate) fn build() -> Result<Self> {
        if BOOKS.len() != BOOK_COUNT {
            return Err(Error::Registry(format!(
                "expected {BOOK_COUNT} books, found {}",
                BOOKS.len()
            )));
        }

        let mut books = Vec::with_capacity(BOOKS.len());
        let mut by_alias: HashMap<String, usize> = HashMap::new();

        for (index, spec) in BOOKS.iter().enumerate() {
            if !(1..=MAX_CHAPTERS).contains(&spec.chapters) {
                return Err(Error::Registry(format!(
                    "{} has {} chapters",
                    spec.name, spec.chapters
                )));
            }

            let book = Book::compile(spec, index + 1)?;
            for alias in &book.aliases {
                let key = alias_key(alias);
                if let Some(&owner) = by_alias.get(&key) {
                    if owner != index {
                        return Err(Error::Registry(format!(
                            "alias `{alias}` claimed by both {} and {}",
                            BOOKS[owner].name, spec.name
                        )));
                    }
                }
                by_alias.insert(key, index);
            }
            books.push(book);
        }

        tracing::debug!(
            books = books.len(),
            aliases = by_alias.len(),
            "Built book registry"
        );
        Ok(Self { books, by_alias })
    }

    /// All books in canonical order.
    pub(crate) fn books(&self) -> &[Book] {
        &self.books
    }

    /// Resolve an alias such as `1 Cor.` or `jer` to its book.
    pub(crate) fn resolve(&self, alias: &str) -> Option<&Book> {
        self.by_alias
            .get(&alias_key(alias))
            .and_then(|&index| self.books.get(index))
    }
}

/// Every alias of a book, including its canonical name, with ordinal prefixes applied.
fn expand_aliases(spec: &BookSpec) -> Result<Vec<String>> {
    let Some(number) = spec.number else {
        return Ok(std::iter::once(spec.name)
            .chain(spec.stems.iter().copied())
            .map(str::to_string)
            .collect());
    };

    let prefixes = ordinal_prefixes(number).ok_or_else(|| {
        Error::Registry(format!(
            "{} has ordinal {number}, maximum is {MAX_ORDINAL_PREFIX}",
            spec.name
        ))
    })?;
    let base = spec
        .name
        .split_once(' ')
        .map(|(_, stem)| stem)
        .ok_or_else(|| Error::Registry(format!("{} lacks an ordinal prefix", spec.name)))?;

    Ok(std::iter::once(base)
        .chain(spec.stems.iter().copied())
        .flat_map(|stem| prefixes.iter().map(move |prefix| format!("{prefix} {stem}")))
        .collect())
}

const fn ordinal_prefixes(number: u8) -> Option<&'static [&'static str]> {
    match number {
        1 => Some(&["1", "I", "1st", "First"]),
        2 => Some(&["2", "II", "2nd", "Second"]),
        3 => Some(&["3", "III", "3rd", "Third"]),
        _ => None,
    }
}

/// Regex source for one alias. Periods between words are optional; a digit
/// prefix may touch its stem (`1Cor`), a word prefix may not (`I Cor`).
fn alias_pattern(alias: &str) -> String {
    let words: Vec<&str> = alias.split_whitespace().collect();
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            let after_digit = words[i - 1].ends_with(|c: char| c.is_ascii_digit());
            out.push_str(if after_digit { r"\.?\s*" } else { r"(?:\.\s*|\s+)" });
        }
        out.push_str(&regex::escape(word));
    }
    out
}

/// Lookup key ignoring case, whitespace, and punctuation.
fn alias_key(alias: &str) -> String {
    alias
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_registry_builds() {
        let registry = BookRegistry::build().unwrap();
        assert_eq!(registry.books().len(), BOOK_COUNT);
        assert_eq!(registry.books()[0].name(), "Genesis");
        assert_eq!(registry.books()[65].name(), "Revelation");
        assert_eq!(registry.books()[18].chapters(), 150);
    }

    #[test]
    fn test_resolve_abbreviations() {
        let registry = registry();
        assert_eq!(registry.resolve("Jer.").map(Book::name), Some("Jeremiah"));
        assert_eq!(registry.resolve("1 Cor.").map(Book::name), Some("1 Corinthians"));
        assert_eq!(registry.resolve("1cor").map(Book::name), Some("1 Corinthians"));
        assert_eq!(registry.resolve("II Thess").map(Book::name), Some("2 Thessalonians"));
        assert_eq!(registry.resolve("song of songs").map(Book::name), Some("Song of Solomon"));
        assert_eq!(registry.resolve("JAM.").map(Book::name), Some("James"));
    }

    #[test]
    fn test_canonical_names_resolve() {
        let registry = registry();
        for book in registry.books() {
            assert_eq!(registry.resolve(book.name()).map(Book::name), Some(book.name()));
        }
    }

    #[test]
    fn test_rejects_non_aliases() {
        let registry = registry();
        assert!(registry.resolve("Hebrew").is_none());
        assert!(registry.resolve("Is").is_none());
        assert!(registry.resolve("So").is_none());
        assert!(registry.resolve("Am").is_none());
    }

    #[test]
    fn test_alias_pattern_requires_word_boundary() {
        let hebrews = registry().resolve("Heb").unwrap();
        assert_eq!(hebrews.alias_matches("Hebrew 12:14").count(), 0);
        assert_eq!(hebrews.alias_matches("Heb. 12:14").collect::<Vec<_>>(), vec![0..3]);
    }

    #[test]
    fn test_alias_pattern_prefers_longest() {
        let song = registry().resolve("Song").unwrap();
        let found: Vec<_> = song.alias_matches("in Song of Solomon 2:1").collect();
        assert_eq!(found, vec![3..18]);
    }

    #[test]
    fn test_numbered_prefix_spellings() {
        let first_john = registry().resolve("1 John").unwrap();
        assert_eq!(first_john.alias_prefix("1 John i. 7"), Some(6));
        assert_eq!(first_john.alias_prefix("I. John i. 7"), Some(7));
        assert_eq!(first_john.alias_prefix("First John 1:7"), Some(10));
        assert_eq!(first_john.alias_prefix("John 1:7"), None);
    }

    #[test]
    fn test_alias_key() {
        assert_eq!(alias_key("1 Cor."), "1cor");
        assert_eq!(alias_key("Song of Solomon"), "songofsolomon");
    }
}
