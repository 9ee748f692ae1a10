use thiserror::Error;

/// Errors surfaced while augmenting a [`crate::GlobTrie`] or
/// [`crate::PathTrie`]. Matching never fails — an absent value or an empty
/// sequence stands in for "no match" — so these only ever come out of
/// `augment`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed glob {glob:?}: {reason}")]
    MalformedGlob { glob: String, reason: &'static str },

    #[error("malformed path {path:?}: {reason}")]
    MalformedPath { path: String, reason: &'static str },
}
