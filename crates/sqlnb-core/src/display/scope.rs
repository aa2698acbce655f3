use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of view numbers for one page.
///
/// Clones share the same counter, so composers built from clones of one
/// sequence never hand out the same root id.
#[derive(Debug, Clone, Default)]
pub struct ViewSequence(Arc<AtomicU64>);

impl ViewSequence {
    /// Next view number, starting at 1.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Identifier namespace of one rendered view.
///
/// Every id handed out is prefixed with the view's root id and carries a
/// counter that only grows, so ids never repeat inside a view and two views
/// with different sequence numbers never share an id.
#[derive(Debug, Clone)]
pub struct ViewScope {
    root: String,
    next: u64,
}

impl ViewScope {
    pub fn new(sequence: u64) -> Self {
        Self {
            root: format!("sqlnb-v{}", sequence),
            next: 0,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn next_id(&mut self, role: &str) -> String {
        self.next += 1;
        format!("{}-{}{}", self.root, role, self.next)
    }

    pub fn next_node_id(&mut self) -> NodeId {
        NodeId(self.next_id("j"))
    }
}

/// Identity of a composite JSON node; correlates its toggle with its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn toggle_id(&self) -> String {
        format!("{}-t", self.0)
    }

    pub fn body_id(&self) -> String {
        format!("{}-b", self.0)
    }

    pub fn close_id(&self) -> String {
        format!("{}-c", self.0)
    }

    pub fn placeholder_id(&self) -> String {
        format!("{}-p", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
