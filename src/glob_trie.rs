use std::collections::HashMap;

use crate::error::Error;
use crate::tokenizer::tokenize_glob;
use crate::trie::{EdgeKind, NodeId, Trie};

/// A sequence of edge-specificity ranks consumed along one candidate match,
/// one entry per character of the queried path. Comparing two candidates'
/// ranks lexicographically (smaller wins, position by position) is what
/// "most specific wins" actually means once more than one stored glob can
/// match the same path — see `GlobTrie::get`.
type RankPath = Vec<u8>;

/// Index of glob patterns, queried by path. Returns the most specific
/// pattern's value when several match.
///
/// Internally a [`Trie`] keyed by the tokens of each augmented glob, with
/// the terminal carrying an insertion sequence number alongside the value
/// so that truly tied matches (identical rank sequences) resolve to the
/// most recently augmented pattern, mirroring how a later, more specific
/// rule is expected to take precedence over an earlier, broader one.
pub struct GlobTrie<V> {
    trie: Trie<(u64, V)>,
    next_seq: u64,
}

impl<V> Default for GlobTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GlobTrie<V> {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            next_seq: 0,
        }
    }

    /// Index `value` under `glob`. Returns `true` if `glob` (exactly, after
    /// tokenization) was already present and its value has been replaced.
    pub fn augment(&mut self, glob: &str, value: V) -> Result<bool, Error> {
        let tokens = tokenize_glob(glob)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        Ok(self.trie.augment(&tokens, (seq, value)))
    }

    /// Look up the most specific glob matching `path`, if any.
    pub fn get(&self, path: &str) -> Option<&V> {
        let chars: Vec<char> = path.chars().collect();
        let mut memo = HashMap::new();
        let (_, _, terminal) = best_match(&self.trie, Trie::root(), &chars, 0, &mut memo)?;
        self.trie.node(terminal).terminal().map(|(_, v)| v)
    }
}

/// Best (lexicographically smallest) rank sequence reachable from
/// `(node, pos)` to a terminal at path end, along with the insertion
/// sequence and node id of the terminal it leads to. `None` means no
/// terminal is reachable from here at all.
///
/// This is a memoized search over the whole trie rather than a simple
/// greedy walk: a pattern that starts with a wildcard can still beat one
/// that starts with a literal, if the wildcard pattern's *later* characters
/// are more specific (e.g. `**/bar/**/foo.py` beating `bar/**` for
/// `bar/eggs/foo.py`, because the former pins down the literal suffix
/// `foo.py` that the latter leaves to its own double-star). A search that
/// stopped at the first successful branch out of the root would miss that.
///
/// `memo` doubles as a re-entrance guard: a `None` is stashed before
/// recursing so that if a state were ever revisited while still being
/// computed, the lookup returns "no path" instead of overflowing the stack.
fn best_match<V>(
    trie: &Trie<(u64, V)>,
    node: NodeId,
    path: &[char],
    pos: usize,
    memo: &mut HashMap<(NodeId, usize), Option<(RankPath, u64, NodeId)>>,
) -> Option<(RankPath, u64, NodeId)> {
    if let Some(cached) = memo.get(&(node, pos)) {
        return cached.clone();
    }
    memo.insert((node, pos), None);

    let mut best: Option<(RankPath, u64, NodeId)> = None;
    let consider = |best: &mut Option<(RankPath, u64, NodeId)>, candidate: Option<(RankPath, u64, NodeId)>| {
        if let Some(c) = candidate {
            let better = match best {
                None => true,
                Some(b) => (&c.0, std::cmp::Reverse(c.1)) < (&b.0, std::cmp::Reverse(b.1)),
            };
            if better {
                *best = Some(c);
            }
        }
    };

    if pos == path.len() {
        if let Some((seq, _)) = trie.node(node).terminal() {
            consider(&mut best, Some((Vec::new(), *seq, node)));
        }
    }

    let is_hub = trie
        .node(node)
        .children()
        .iter()
        .any(|(k, id)| k.is_double_star() && *id == node);
    if is_hub {
        let at_boundary = pos == 0 || pos == path.len() || path[pos - 1] == '/';
        if at_boundary {
            for (edge, child) in trie.node(node).children() {
                if edge.is_sep() {
                    let candidate = best_match(trie, *child, path, pos, memo);
                    consider(&mut best, candidate);
                }
            }
        }
    }

    for (edge, child) in trie.node(node).children() {
        match edge {
            EdgeKind::Lit(c) => {
                if pos < path.len() && path[pos] == *c {
                    consider(&mut best, consume(trie, *child, path, pos, edge.specificity_rank(), memo));
                }
            }
            EdgeKind::Class(set) => {
                if pos < path.len() && path[pos] != '/' && set.contains(&path[pos]) {
                    consider(&mut best, consume(trie, *child, path, pos, edge.specificity_rank(), memo));
                }
            }
            EdgeKind::NegClass(set) => {
                if pos < path.len() && path[pos] != '/' && !set.contains(&path[pos]) {
                    consider(&mut best, consume(trie, *child, path, pos, edge.specificity_rank(), memo));
                }
            }
            EdgeKind::AnyChar => {
                if pos < path.len() && path[pos] != '/' {
                    consider(&mut best, consume(trie, *child, path, pos, edge.specificity_rank(), memo));
                }
            }
            EdgeKind::Sep => {
                if pos < path.len() && path[pos] == '/' {
                    consider(&mut best, consume(trie, *child, path, pos, edge.specificity_rank(), memo));
                }
            }
            EdgeKind::StarSeg => {
                if *child == node {
                    if pos < path.len() && path[pos] != '/' {
                        consider(&mut best, consume(trie, node, path, pos, edge.specificity_rank(), memo));
                    }
                } else {
                    let candidate = best_match(trie, *child, path, pos, memo);
                    consider(&mut best, candidate);
                }
            }
            EdgeKind::DoubleStar => {
                if *child == node {
                    if pos < path.len() {
                        consider(&mut best, consume(trie, node, path, pos, edge.specificity_rank(), memo));
                    }
                } else {
                    let candidate = best_match(trie, *child, path, pos, memo);
                    consider(&mut best, candidate);
                }
            }
        }
    }

    memo.insert((node, pos), best.clone());
    best
}

fn consume<V>(
    trie: &Trie<(u64, V)>,
    next_node: NodeId,
    path: &[char],
    pos: usize,
    rank: u8,
    memo: &mut HashMap<(NodeId, usize), Option<(RankPath, u64, NodeId)>>,
) -> Option<(RankPath, u64, NodeId)> {
    let (mut tail, seq, terminal) = best_match(trie, next_node, path, pos + 1, memo)?;
    tail.insert(0, rank);
    Some((tail, seq, terminal))
}
