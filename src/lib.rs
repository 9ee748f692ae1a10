//! `glob-tries` provides two dual data structures for many-to-many matching
//! between glob patterns and filesystem-style paths.
//!
//! [`GlobTrie`] indexes a set of glob patterns, each carrying a value of the
//! caller's choosing. Given a concrete path, it returns the value of the
//! *most specific* matching glob, if any — a single trie walk rather than a
//! linear scan over every pattern.
//!
//! [`PathTrie`] is the dual: it indexes a set of concrete paths. Given a
//! single glob pattern, it enumerates every indexed path the glob matches.
//!
//! Both are built on a shared, character-level trie (see the internal
//! `trie` module) whose edges are one of a closed set of kinds — literal
//! character, positive/negative character class, `?`, `*`, `**` — so that
//! glob patterns and concrete paths can be unified into a single
//! nondeterministic graph and walked in either direction.
//!
//! ## Example
//! ```
//! use glob_tries::GlobTrie;
//!
//! let mut trie = GlobTrie::new();
//! trie.augment("*.rs", "rust").unwrap();
//! trie.augment("src/**/*.rs", "rust-in-src").unwrap();
//!
//! assert_eq!(trie.get("main.rs"), Some(&"rust"));
//! assert_eq!(trie.get("src/lib/mod.rs"), Some(&"rust-in-src"));
//! assert_eq!(trie.get("README.md"), None);
//! ```
//!
//! ```
//! use glob_tries::PathTrie;
//!
//! let mut trie = PathTrie::new();
//! trie.augment("src/lib.rs").unwrap();
//! trie.augment("src/main.rs").unwrap();
//! trie.augment("README.md").unwrap();
//!
//! let matches: std::collections::HashSet<_> =
//!     trie.get_all_matches("src/*.rs").unwrap().into_iter().collect();
//! assert_eq!(matches.len(), 2);
//! ```
//!
//! This crate has no CLI, does no file I/O, and holds no global state — it's
//! a pure in-memory library. Augmentation is single-writer; concurrent
//! readers of an already-built trie are safe, but `augment`-while-reading is
//! undefined, same as mutating a `Vec` while iterating it.

mod error;
mod glob_trie;
mod path_trie;
mod tokenizer;
mod trie;

pub use error::Error;
pub use glob_trie::GlobTrie;
pub use path_trie::PathTrie;
