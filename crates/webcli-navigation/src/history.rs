//! Back/forward history
//!
//! Nodes live in an arena and link to each other by [`NodeId`]. History never
//! branches: visiting a new address from the middle of the chain drops the old
//! forward branch, and since the live chain is always contiguous in the arena
//! that branch is reclaimed by truncation.

use serde::{Deserialize, Serialize};

/// Index of a node in the history arena.
///
/// Only valid while that node stays in the live chain. Visiting a new address
/// from the middle of the chain truncates the forward branch and reuses its
/// slots, so an id held from before the visit may name a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationNode {
    pub address: String,
    pub previous: Option<NodeId>,
    pub next: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct History {
    nodes: Vec<NavigationNode>,
    current: NodeId,
}

impl History {
    /// Start a history holding only the home address.
    pub fn new(home: impl Into<String>) -> Self {
        Self {
            nodes: vec![NavigationNode {
                address: home.into(),
                previous: None,
                next: None,
            }],
            current: NodeId(0),
        }
    }

    /// Record a navigation to `address` and make it current.
    ///
    /// Any forward entries from the current position are discarded.
    pub fn visit(&mut self, address: impl Into<String>) -> NodeId {
        let address = address.into();
        let from = self.current;

        let dropped = self.nodes.len() - (from.0 + 1);
        self.nodes.truncate(from.0 + 1);

        let id = NodeId(self.nodes.len());
        self.nodes.push(NavigationNode {
            address,
            previous: Some(from),
            next: None,
        });
        self.nodes[from.0].next = Some(id);
        self.current = id;

        tracing::debug!(
            node = id.0,
            address = %self.nodes[id.0].address,
            dropped,
            "History visit"
        );

        id
    }

    /// Step back one entry. Returns the address to load, or `None` when
    /// already at the oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        let previous = self.node(self.current).previous?;
        self.current = previous;
        Some(self.current_address())
    }

    /// Step forward one entry. Returns the address to load, or `None` when
    /// already at the newest entry.
    pub fn forward(&mut self) -> Option<&str> {
        let next = self.node(self.current).next?;
        self.current = next;
        Some(self.current_address())
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_address(&self) -> &str {
        &self.node(self.current).address
    }

    pub fn node(&self, id: NodeId) -> &NavigationNode {
        &self.nodes[id.0]
    }

    pub fn can_go_back(&self) -> bool {
        self.node(self.current).previous.is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.node(self.current).next.is_some()
    }

    /// Number of reachable entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the home entry is never removed. Pairs with
    /// [`History::len`] as clippy's `len_without_is_empty` expects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Addresses from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.address.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let history = History::new("home.example");
        assert_eq!(history.current_address(), "home.example");
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new("a");
        history.visit("b");
        history.visit("c");

        assert_eq!(history.back(), Some("b"));
        assert_eq!(history.back(), Some("a"));
        assert_eq!(history.back(), None);
        assert_eq!(history.current_address(), "a");

        assert_eq!(history.forward(), Some("b"));
        assert_eq!(history.forward(), Some("c"));
        assert_eq!(history.forward(), None);
        assert_eq!(history.current_address(), "c");
    }

    #[test]
    fn test_visit_discards_forward_branch() {
        let mut history = History::new("a");
        history.visit("b");
        history.visit("c");
        assert_eq!(history.back(), Some("b"));

        let d = history.visit("d");
        assert_eq!(history.current(), d);
        assert_eq!(history.forward(), None);
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["a", "b", "d"]);

        assert_eq!(history.back(), Some("b"));
        assert_eq!(history.forward(), Some("d"));
    }

    #[test]
    fn test_links_stay_consistent() {
        let mut history = History::new("a");
        let b = history.visit("b");
        history.visit("c");
        history.back();
        history.back();
        let e = history.visit("e");

        let a = history.node(e).previous.unwrap();
        assert_eq!(history.node(a).address, "a");
        assert_eq!(history.node(a).next, Some(e));
        assert_eq!(history.node(e).next, None);
        assert_eq!(history.len(), 2);
        // `b`'s slot was reclaimed and reused by `e`.
        assert_eq!(b, e);
    }
}
