//! Index-linked node arena owned by one resolution pass.

use crate::ProfileRegistry;

pub(super) type NodeId = usize;

#[derive(Debug, Clone)]
pub(super) struct ProfileNode {
    pub name: String,
    pub is_engine: bool,
    pub parent: Option<NodeId>,
    pub child: Option<NodeId>,
    pub depth: usize,
}

/// Nodes are never removed; abandoned candidates simply stay unlinked.
#[derive(Debug, Default)]
pub(super) struct NodeArena {
    nodes: Vec<ProfileNode>,
}

impl NodeArena {
    pub fn alloc(&mut self, registry: &ProfileRegistry, name: &str) -> NodeId {
        self.nodes.push(ProfileNode {
            name: name.to_string(),
            is_engine: registry.get(name).is_some_and(|d| d.is_engine()),
            parent: None,
            child: None,
            depth: 0,
        });
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &ProfileNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ProfileNode {
        &mut self.nodes[id]
    }

    /// Child-link path starting at `root`.
    pub fn path_from(&self, root: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = Some(root);
        while let Some(id) = cursor {
            // Links form a path; more hops than nodes means a corrupted link.
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(id);
            cursor = self.nodes[id].child;
        }
        path
    }

    /// Number of child hops below `root`.
    pub fn depth_below(&self, root: NodeId) -> usize {
        self.path_from(root).len().saturating_sub(1)
    }

    /// Topmost ancestor of `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut root = id;
        let mut hops = 0;
        while let Some(parent) = self.nodes[root].parent {
            hops += 1;
            if hops > self.nodes.len() {
                break;
            }
            root = parent;
        }
        root
    }

    /// Makes `parent` the direct parent of `child`.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].child = Some(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Allocates `name` and splices it between `id` and its current parent.
    pub fn insert_above(&mut self, registry: &ProfileRegistry, id: NodeId, name: &str) -> NodeId {
        let inserted = self.alloc(registry, name);
        let previous_parent = self.nodes[id].parent;
        self.nodes[inserted].parent = previous_parent;
        if let Some(parent) = previous_parent {
            self.nodes[parent].child = Some(inserted);
        }
        self.link(inserted, id);
        inserted
    }

    /// Assigns depths along the path from `root`.
    pub fn assign_depths(&mut self, root: NodeId) {
        for (depth, id) in self.path_from(root).into_iter().enumerate() {
            self.nodes[id].depth = depth;
        }
    }
}
