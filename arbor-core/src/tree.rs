//! Materialized shrink trees for inspecting and testing shrinking behavior.

use crate::shrinkable::Candidate;

pub mod render;

/// Payload of a shrink-tree node: a real value, or the marker left behind
/// when the node budget ran out before the subtree could be explored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {
    Value(T),
    Truncated,
}

/// A materialized shrink tree: one explored value and the candidates below it.
///
/// Purely derived, throw-away data built on demand from a generated
/// candidate; it holds no ownership over the producer or random source that
/// created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkTree<T> {
    pub node: Node<T>,
    pub children: Vec<ShrinkTree<T>>,
}

impl<T> ShrinkTree<T> {
    fn truncated() -> Self {
        ShrinkTree {
            node: Node::Truncated,
            children: Vec::new(),
        }
    }

    /// Visit every node in pre-order, depth-first, left-to-right.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Node<T>),
    {
        visit(&self.node);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Map a function over the tree's values, leaving sentinels in place.
    pub fn map<U, F>(self, f: F) -> ShrinkTree<U>
    where
        F: Fn(T) -> U + Clone,
    {
        ShrinkTree {
            node: match self.node {
                Node::Value(value) => Node::Value(f(value)),
                Node::Truncated => Node::Truncated,
            },
            children: self
                .children
                .into_iter()
                .map(|child| child.map(f.clone()))
                .collect(),
        }
    }

    /// Count the explored (non-sentinel) nodes.
    pub fn count_values(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if matches!(node, Node::Value(_)) {
                count += 1;
            }
        });
        count
    }
}

/// A node budget shared across one whole tree construction.
///
/// The budget bounds the total node count globally, not per branch, which is
/// what guarantees termination over conceptually infinite shrink sequences.
#[derive(Debug, Clone, Copy)]
pub struct NodeBudget {
    remaining: Option<usize>,
}

impl NodeBudget {
    /// No limit: the whole tree is materialized.
    pub fn unbounded() -> Self {
        NodeBudget { remaining: None }
    }

    /// Materialize at most `max_nodes` values in total.
    pub fn limited(max_nodes: usize) -> Self {
        NodeBudget {
            remaining: Some(max_nodes),
        }
    }

    fn consume(&mut self) {
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(1);
        }
    }

    fn exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// Materialize the shrink tree reachable from `candidate`.
///
/// The budget is decremented once per explored node. When it runs out while a
/// node's candidates are being enumerated, a single [`Node::Truncated`] leaf
/// is appended and the remaining siblings at that level are not explored.
/// Exceeding the budget is a controlled outcome, never an error.
pub fn build_shrink_tree<T: Clone + 'static>(
    candidate: &Candidate<T>,
    budget: &mut NodeBudget,
) -> ShrinkTree<T> {
    budget.consume();
    let mut children = Vec::new();
    for next in candidate.shrink_step() {
        if budget.exhausted() {
            children.push(ShrinkTree::truncated());
            break;
        }
        children.push(build_shrink_tree(&next, budget));
    }
    ShrinkTree {
        node: Node::Value(candidate.value().clone()),
        children,
    }
}
