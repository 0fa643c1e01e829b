use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};

/// Non-owning handle to a directory registered in a [`DirectoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DirectoryId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub parent: Option<DirectoryId>,
    pub name: String,
}

/// Shared registry of directory names and parent links.
///
/// Directories own their bindings; the tree only records who hangs below
/// whom so qualified names can be composed without parent pointers. A node
/// lives as long as its directory: dropping a [`NamingDirectory`] unregisters
/// it, and children of a removed node keep their (now stale) parent id.
///
/// [`NamingDirectory`]: super::NamingDirectory
#[derive(Debug)]
pub struct DirectoryTree {
    nodes: DashMap<DirectoryId, DirectoryNode>,
    next_id: AtomicU32,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn register(&self, parent: Option<DirectoryId>, name: &str) -> DirectoryId {
        // The counter wraps; ids still held by live nodes are skipped.
        loop {
            let id = DirectoryId(self.next_id.fetch_add(1, Ordering::SeqCst));
            if let Entry::Vacant(slot) = self.nodes.entry(id) {
                slot.insert(DirectoryNode {
                    parent,
                    name: name.to_string(),
                });
                return id;
            }
        }
    }

    pub fn unregister(&self, id: DirectoryId) -> Option<DirectoryNode> {
        self.nodes.remove(&id).map(|(_, node)| node)
    }

    pub fn contains(&self, id: DirectoryId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: DirectoryId) -> Option<DirectoryNode> {
        self.nodes.get(&id).map(|n| n.clone())
    }

    pub fn parent_of(&self, id: DirectoryId) -> Option<DirectoryId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: DirectoryId) -> Vec<DirectoryId> {
        let mut children: Vec<DirectoryId> = self
            .nodes
            .iter()
            .filter(|entry| entry.value().parent == Some(id))
            .map(|entry| *entry.key())
            .collect();
        children.sort();
        children
    }

    /// Names from the root down to `id`.
    pub fn path(&self, id: DirectoryId) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = Some(id);

        while let Some(curr_id) = current {
            match self.node(curr_id) {
                Some(node) => {
                    current = node.parent;
                    parts.push(node.name);
                }
                None => break,
            }
        }

        parts.reverse();
        parts
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
