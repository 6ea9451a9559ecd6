//! Configurations and the arena that holds their search tree.
//!
//! A configuration is a snapshot of one branch of a simulation. Successors
//! are always new records that point back at their parent by index, so
//! the tree never holds reference cycles and abandoned branches can be
//! reclaimed by rebuilding the arena.

use crate::core::{Move, StateId, Symbol, TapeOp, BLANK};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Index of a configuration inside a [`ConfigurationTree`].
pub type ConfigId = usize;

/// A Turing machine tape: cells around the head, unbounded both ways.
///
/// Cells that were never written read as [`BLANK`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: usize,
}

impl Tape {
    /// A tape holding `content` with the head on its first cell.
    pub fn new(content: &[Symbol]) -> Self {
        let mut cells: VecDeque<Symbol> = content.iter().copied().collect();
        if cells.is_empty() {
            cells.push_back(BLANK);
        }
        Self { cells, head: 0 }
    }

    pub fn blank() -> Self {
        Self::new(&[])
    }

    /// Symbol under the head.
    pub fn read(&self) -> Symbol {
        self.cells.get(self.head).copied().unwrap_or(BLANK)
    }

    /// Head position relative to the leftmost stored cell.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Whether the head sits on a stored cell.
    pub(crate) fn is_consistent(&self) -> bool {
        self.head < self.cells.len()
    }

    /// Tape contents with leading and trailing blanks removed.
    pub fn contents(&self) -> String {
        let text: String = self.cells.iter().collect();
        text.trim_matches(BLANK).to_string()
    }

    /// A new tape with `op` written and the head moved.
    pub(crate) fn apply(&self, op: &TapeOp) -> Self {
        let mut next = self.clone();
        next.cells[next.head] = op.write;
        match op.movement {
            Move::Left => {
                if next.head == 0 {
                    next.cells.push_front(BLANK);
                } else {
                    next.head -= 1;
                }
            }
            Move::Right => {
                next.head += 1;
                if next.head == next.cells.len() {
                    next.cells.push_back(BLANK);
                }
            }
            Move::Stay => {}
        }
        next
    }
}

/// One node of the simulation search tree.
///
/// Besides the current state, a configuration carries whatever auxiliary
/// store its machine kind needs: how much of the shared input has been
/// consumed, the pushdown stack (top last), Turing tapes, and the output
/// a transducer has emitted so far. Unused stores stay empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    state: StateId,
    parent: Option<ConfigId>,
    consumed: usize,
    stack: Vec<Symbol>,
    tapes: Vec<Tape>,
    output: String,
}

impl Configuration {
    /// A root configuration: nothing consumed, no parent.
    pub(crate) fn root(state: StateId) -> Self {
        Self {
            state,
            parent: None,
            consumed: 0,
            stack: Vec::new(),
            tapes: Vec::new(),
            output: String::new(),
        }
    }

    pub(crate) fn with_stack(mut self, stack: Vec<Symbol>) -> Self {
        self.stack = stack;
        self
    }

    pub(crate) fn with_tapes(mut self, tapes: Vec<Tape>) -> Self {
        self.tapes = tapes;
        self
    }

    pub(crate) fn with_output(mut self, output: String) -> Self {
        self.output = output;
        self
    }

    /// A successor of `self` (stored at `id`) sitting in `state`.
    ///
    /// The successor inherits every store; callers adjust the ones the
    /// transition touches.
    pub(crate) fn successor(&self, id: ConfigId, state: StateId) -> Self {
        Self {
            state,
            parent: Some(id),
            ..self.clone()
        }
    }

    pub(crate) fn consume(mut self, symbols: usize) -> Self {
        self.consumed += symbols;
        self
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn parent(&self) -> Option<ConfigId> {
        self.parent
    }

    /// Number of input symbols consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The part of `input` this configuration has not consumed yet.
    pub fn remaining<'i>(&self, input: &'i [Symbol]) -> &'i [Symbol] {
        input.get(self.consumed..).unwrap_or(&[])
    }

    /// Pushdown stack, bottom first.
    pub fn stack(&self) -> &[Symbol] {
        &self.stack
    }

    pub fn stack_top(&self) -> Option<Symbol> {
        self.stack.last().copied()
    }

    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    pub(crate) fn tapes_mut(&mut self) -> &mut Vec<Tape> {
        &mut self.tapes
    }

    pub(crate) fn stack_mut(&mut self) -> &mut Vec<Symbol> {
        &mut self.stack
    }

    pub(crate) fn output_mut(&mut self) -> &mut String {
        &mut self.output
    }

    /// Output emitted so far by a Mealy or Moore machine.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// A copy without the parent link; equal detached copies behave
    /// identically from here on.
    pub(crate) fn detached(&self) -> Self {
        self.reparent(None)
    }

    fn reparent(&self, parent: Option<ConfigId>) -> Self {
        Self {
            parent,
            ..self.clone()
        }
    }
}

/// Arena holding every configuration a simulation has created.
///
/// Parents are always stored before their children, so a parent index is
/// strictly smaller than its child's index and every parent chain ends at
/// a root.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationTree {
    nodes: Vec<Configuration>,
}

impl ConfigurationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, configuration: Configuration) -> ConfigId {
        self.nodes.push(configuration);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: ConfigId) -> Option<&Configuration> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &Configuration)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// The first configuration whose parent is not stored before it,
    /// together with that parent.
    ///
    /// A tree built by stepping never has one; a decoded tree might.
    pub(crate) fn broken_parent(&self) -> Option<(ConfigId, ConfigId)> {
        self.iter().find_map(|(id, node)| match node.parent {
            Some(parent) if parent >= id => Some((id, parent)),
            _ => None,
        })
    }

    /// Configurations from the root down to `id`, inclusive.
    ///
    /// Empty if `id` is not in the tree.
    pub fn path(&self, id: ConfigId) -> Vec<&Configuration> {
        let mut path = Vec::new();
        let mut cursor = self.nodes.get(id).map(|_| id);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            path.push(node);
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    /// Number of ancestors of `id`.
    pub fn depth(&self, id: ConfigId) -> usize {
        self.path(id).len().saturating_sub(1)
    }

    /// Children of `id`, in creation order.
    pub fn children(&self, id: ConfigId) -> Vec<ConfigId> {
        self.iter()
            .filter(|(_, node)| node.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Drop every configuration that is neither in `keep` nor an ancestor
    /// of one in `keep`.
    ///
    /// Returns the mapping from old to new ids of the surviving nodes;
    /// relative order and parent links are preserved.
    pub fn retain_ancestors(&mut self, keep: &[ConfigId]) -> BTreeMap<ConfigId, ConfigId> {
        let mut alive = BTreeSet::new();
        for &leaf in keep {
            let mut cursor = self.nodes.get(leaf).map(|_| leaf);
            while let Some(current) = cursor {
                if !alive.insert(current) {
                    break;
                }
                cursor = self.nodes[current].parent;
            }
        }

        let mut remap = BTreeMap::new();
        let mut nodes = Vec::with_capacity(alive.len());
        for old in alive {
            let node = &self.nodes[old];
            let parent = node.parent.and_then(|p| remap.get(&p).copied());
            remap.insert(old, nodes.len());
            nodes.push(node.reparent(parent));
        }
        self.nodes = nodes;
        remap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tape_reads_blank_when_empty() {
        let tape = Tape::blank();
        assert_eq!(tape.read(), BLANK);
        assert_eq!(tape.contents(), "");
    }

    #[test]
    fn tape_extends_in_both_directions() {
        let tape = Tape::new(&['a', 'b']);
        let left = tape.apply(&TapeOp::new('a', 'x', Move::Left));
        assert_eq!(left.read(), BLANK);
        assert_eq!(left.head(), 0);
        assert_eq!(left.contents(), "xb");

        let right = Tape::new(&['a'])
            .apply(&TapeOp::new('a', 'y', Move::Right))
            .apply(&TapeOp::new(BLANK, 'z', Move::Right));
        assert_eq!(right.contents(), "yz");
        assert_eq!(right.read(), BLANK);
    }

    #[test]
    fn remaining_input_tracks_consumption() {
        let input = ['a', 'b', 'c'];
        let root = Configuration::root(0);
        let next = root.successor(0, 1).consume(2);
        assert_eq!(root.remaining(&input), &['a', 'b', 'c']);
        assert_eq!(next.remaining(&input), &['c']);
        assert_eq!(next.parent(), Some(0));
    }

    #[test]
    fn path_walks_to_root() {
        let mut tree = ConfigurationTree::new();
        let root = tree.push(Configuration::root(0));
        let child = tree.push(tree.get(root).unwrap().successor(root, 1).consume(1));
        let grandchild = tree.push(tree.get(child).unwrap().successor(child, 2).consume(1));

        let states: Vec<_> = tree.path(grandchild).iter().map(|c| c.state()).collect();
        assert_eq!(states, vec![0, 1, 2]);
        assert_eq!(tree.depth(grandchild), 2);
        assert_eq!(tree.children(root), vec![child]);
        assert!(tree.path(99).is_empty());
    }

    #[test]
    fn retain_ancestors_reclaims_dead_branches() {
        let mut tree = ConfigurationTree::new();
        let root = tree.push(Configuration::root(0));
        let dead = tree.push(Configuration::root(0).successor(root, 5));
        let live = tree.push(Configuration::root(0).successor(root, 6));
        let leaf = tree.push(Configuration::root(0).successor(live, 7));

        let remap = tree.retain_ancestors(&[leaf]);

        assert_eq!(tree.len(), 3);
        assert!(!remap.contains_key(&dead));
        let new_leaf = remap[&leaf];
        let states: Vec<_> = tree.path(new_leaf).iter().map(|c| c.state()).collect();
        assert_eq!(states, vec![0, 6, 7]);
    }
}
