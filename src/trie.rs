use std::collections::BTreeSet;

/// One outgoing edge of a trie node. This is a closed set of tagged
/// variants — matching dispatches on the tag, there's no open
/// polymorphism here.
///
/// `Class`/`NegClass` carry a canonical (sorted, deduped) character set so
/// two classes built from the same characters in a different order compare
/// equal and collapse onto the same edge during augmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    Lit(char),
    Sep,
    AnyChar,
    Class(BTreeSet<char>),
    NegClass(BTreeSet<char>),
    StarSeg,
    DoubleStar,
}

impl EdgeKind {
    /// Total order used to pick the "best" glob when several edges out of a
    /// node could consume the current input: literal beats class beats
    /// any-char beats separator beats single-segment star beats
    /// double-star.
    pub(crate) fn specificity_rank(&self) -> u8 {
        match self {
            EdgeKind::Lit(_) => 0,
            EdgeKind::Class(_) => 1,
            EdgeKind::NegClass(_) => 2,
            EdgeKind::AnyChar => 3,
            EdgeKind::Sep => 4,
            EdgeKind::StarSeg => 5,
            EdgeKind::DoubleStar => 6,
        }
    }

    pub(crate) fn is_double_star(&self) -> bool {
        matches!(self, EdgeKind::DoubleStar)
    }

    pub(crate) fn is_star_seg(&self) -> bool {
        matches!(self, EdgeKind::StarSeg)
    }

    pub(crate) fn is_sep(&self) -> bool {
        matches!(self, EdgeKind::Sep)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

pub(crate) struct Node<T> {
    children: Vec<(EdgeKind, NodeId)>,
    terminal: Option<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            terminal: None,
        }
    }

    pub(crate) fn terminal(&self) -> Option<&T> {
        self.terminal.as_ref()
    }

    pub(crate) fn children(&self) -> &[(EdgeKind, NodeId)] {
        &self.children
    }
}

/// The trie owns a contiguous arena of nodes indexed by `NodeId`; edges
/// reference children by id rather than by pointer. Shared by `GlobTrie` and
/// `PathTrie` — the only difference between the two is which edge kinds
/// `augment` ever produces (paths only ever produce `Lit`/`Sep`) and which
/// side drives consumption during matching.
pub(crate) struct Trie<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Trie<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    pub(crate) fn root() -> NodeId {
        NodeId::ROOT
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[usize::from(id)]
    }

    fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new());
        id
    }

    /// Find the child reached by an edge equal to `kind`, or create it.
    /// `StarSeg` and `DoubleStar` are stable by kind alone (at most one such
    /// child per node) — every other kind compares by full structural
    /// equality (canonical set, for classes).
    fn find_or_create_child(&mut self, from: NodeId, kind: EdgeKind) -> NodeId {
        let existing = self.nodes[usize::from(from)]
            .children
            .iter()
            .find(|(k, _)| k == &kind)
            .map(|(_, id)| *id);
        if let Some(id) = existing {
            return id;
        }
        let id = self.add_node();
        self.nodes[usize::from(from)].children.push((kind, id));
        id
    }

    /// Create (if absent) the self-loop that gives a quantified edge
    /// (`StarSeg`/`DoubleStar`) its "zero or more" behavior: a dedicated
    /// node reached by a zero-consumption entry edge, with a self-loop edge
    /// of the same kind that consumes one character and stays put.
    fn find_or_create_quantifier_target(&mut self, from: NodeId, kind: EdgeKind) -> NodeId {
        let target = self.find_or_create_child(from, kind.clone());
        // Ensure the self-loop exists on `target`, unless `from == target`
        // already (can't happen on first creation, but augmentation is
        // idempotent so this guards re-augmenting through the same state).
        let has_self_loop = self.nodes[usize::from(target)]
            .children
            .iter()
            .any(|(k, id)| k == &kind && *id == target);
        if !has_self_loop {
            self.nodes[usize::from(target)]
                .children
                .push((kind, target));
        }
        target
    }

    /// Walk (and create as needed) the path of edges for `tokens`, then set
    /// the terminal on the final node. Returns whether a terminal was
    /// already present there (and has now been replaced).
    pub(crate) fn augment(&mut self, tokens: &[EdgeKind], terminal: T) -> bool {
        let mut node = Self::root();
        for token in tokens {
            node = if token.is_star_seg() || token.is_double_star() {
                self.find_or_create_quantifier_target(node, token.clone())
            } else {
                self.find_or_create_child(node, token.clone())
            };
        }
        let existed = self.nodes[usize::from(node)].terminal.is_some();
        self.nodes[usize::from(node)].terminal = Some(terminal);
        existed
    }
}
