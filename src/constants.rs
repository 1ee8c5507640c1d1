//! Crate-wide constants.
//!
//! Centralizes limits and defaults shared by the finder, the corpus scanner,
//! and configuration loading.

/// Book registry limits.
pub mod registry {
    /// Number of books in the Protestant canon.
    pub const BOOK_COUNT: usize = 66;

    /// Largest chapter count of any book (Psalms).
    pub const MAX_CHAPTERS: u32 = 150;

    /// Highest ordinal prefix a numbered book can carry (`3 John`).
    pub const MAX_ORDINAL_PREFIX: u8 = 3;
}

/// Numeral grammar limits.
pub mod numerals {
    /// Maximum arabic digits in a chapter or verse number.
    pub const MAX_ARABIC_DIGITS: usize = 3;

    /// Maximum letters in a roman chapter or verse numeral.
    pub const MAX_ROMAN_LEN: usize = 9;

    /// Maximum verses one citation may expand to once ranges are filled in.
    pub const MAX_EXPANDED_VERSES: usize = 500;
}

/// Corpus scanning defaults.
pub mod corpus {
    /// File extensions scanned when walking directories.
    pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md"];
}

/// Environment variable names read by [`crate::config::Config::load`].
pub mod env {
    /// Output ordering: `canonical` or `text`.
    pub const ORDER: &str = "REFS_ORDER";

    /// Comma-separated list of file extensions to scan.
    pub const EXTENSIONS: &str = "REFS_EXTENSIONS";

    /// Whether to pretty-print JSON output.
    pub const PRETTY: &str = "REFS_PRETTY";
}
