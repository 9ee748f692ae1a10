use std::collections::HashSet;

use crate::error::Error;
use crate::tokenizer::{tokenize_glob, tokenize_path};
use crate::trie::{EdgeKind, NodeId, Trie};

/// Index of concrete paths, queried by glob. The dual of [`crate::GlobTrie`]:
/// here the *glob* drives consumption of *trie edges* rather than the other
/// way around, so every augmented path only ever produces `Lit`/`Sep` edges.
pub struct PathTrie {
    trie: Trie<String>,
}

impl Default for PathTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTrie {
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Index `path`. Returns `true` if `path` was already present.
    pub fn augment(&mut self, path: &str) -> Result<bool, Error> {
        let tokens = tokenize_path(path)?;
        Ok(self.trie.augment(&tokens, path.to_owned()))
    }

    /// All stored paths matching `glob`, in discovery order (treat the
    /// result as a set — the order is not guaranteed). Duplicates are
    /// impossible: the search is deduplicated at the terminal node, so a
    /// path reachable via more than one NFA thread is only returned once.
    pub fn get_all_matches(&self, glob: &str) -> Result<Vec<String>, Error> {
        let tokens = tokenize_glob(glob)?;
        let mut out = Vec::new();
        let mut seen_terminals = HashSet::new();
        walk(&self.trie, Trie::root(), &tokens, 0, &mut out, &mut seen_terminals);
        Ok(out)
    }
}

/// Advance one glob token's worth of consumption against the trie frontier.
/// `node` is the current trie position, `tokens[pos..]` the remaining glob.
fn walk(
    trie: &Trie<String>,
    node: NodeId,
    tokens: &[EdgeKind],
    pos: usize,
    out: &mut Vec<String>,
    seen: &mut HashSet<NodeId>,
) {
    if pos == tokens.len() {
        if let Some(path) = trie.node(node).terminal() {
            if seen.insert(node) {
                out.push(path.clone());
            }
        }
        return;
    }

    match &tokens[pos] {
        EdgeKind::Lit(c) => {
            for (edge, child) in trie.node(node).children() {
                if matches!(edge, EdgeKind::Lit(ec) if ec == c) {
                    walk(trie, *child, tokens, pos + 1, out, seen);
                }
            }
        }
        EdgeKind::AnyChar => {
            for (edge, child) in trie.node(node).children() {
                if matches!(edge, EdgeKind::Lit(_)) {
                    walk(trie, *child, tokens, pos + 1, out, seen);
                }
            }
        }
        EdgeKind::Class(set) => {
            for (edge, child) in trie.node(node).children() {
                if let EdgeKind::Lit(c) = edge {
                    if set.contains(c) {
                        walk(trie, *child, tokens, pos + 1, out, seen);
                    }
                }
            }
        }
        EdgeKind::NegClass(set) => {
            for (edge, child) in trie.node(node).children() {
                if let EdgeKind::Lit(c) = edge {
                    if !set.contains(c) {
                        walk(trie, *child, tokens, pos + 1, out, seen);
                    }
                }
            }
        }
        EdgeKind::Sep => {
            for (edge, child) in trie.node(node).children() {
                if edge.is_sep() {
                    walk(trie, *child, tokens, pos + 1, out, seen);
                }
            }
        }
        EdgeKind::StarSeg => {
            let mut descendants = Vec::new();
            collect_descendants(trie, node, false, &mut descendants);
            for descendant in descendants {
                walk(trie, descendant, tokens, pos + 1, out, seen);
            }
        }
        EdgeKind::DoubleStar => {
            let mut descendants = Vec::new();
            collect_descendants(trie, node, true, &mut descendants);
            for descendant in descendants {
                walk(trie, descendant, tokens, pos + 1, out, seen);
            }
        }
    }
}

/// Every node reachable from `node` (including `node` itself, the zero-step
/// case), walking only `Lit` edges unless `cross_segment` also admits `Sep`.
/// Paths stored in a `PathTrie` only ever produce `Lit`/`Sep` edges, and the
/// trie is a tree (no cycles reachable from augmentation), so a plain DFS
/// terminates without needing a visited set.
fn collect_descendants(trie: &Trie<String>, node: NodeId, cross_segment: bool, out: &mut Vec<NodeId>) {
    out.push(node);
    for (edge, child) in trie.node(node).children() {
        if cross_segment || !edge.is_sep() {
            collect_descendants(trie, *child, cross_segment, out);
        }
    }
}
