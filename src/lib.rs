//! `scripture-refs` - find Bible citations in free-form prose.
//!
//! Scans historical, theological, or literary text for citations written in
//! the many informal styles authors use (`Jn 4:23-24`, `1 Cor. i. 24`,
//! `(John xvii. 20, 21, 23, 26.)`, `In Jer. Xxxi`) and returns structured,
//! position-exact references for linking or highlighting.
//!
//! ```
//! let found = scripture_refs::find("Foo (1 Cor. i. 24.) bar.");
//! assert_eq!(found[0].book, "1 Corinthians");
//! assert_eq!(found[0].matched, "1 Cor. i. 24.");
//! ```

pub mod bible;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod error;

pub use bible::{find, resolve_book, Finder, OutputOrder, Position, Reference, VerseRef};
