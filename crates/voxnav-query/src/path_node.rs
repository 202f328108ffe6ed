//! Query-scoped path nodes and the pool that recycles them

use voxnav::{CellRef, CELL_NEIGHBOR_COUNT};

/// Node flags for search state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags(u8);

impl NodeFlags {
    /// Growth found no live neighbor from this node
    pub const CLOSED: NodeFlags = NodeFlags(0x01);
    /// Scratch flag used while computing hop counts
    pub const CHECKED: NodeFlags = NodeFlags(0x02);

    pub fn contains(&self, flag: NodeFlags) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn insert(&mut self, flag: NodeFlags) {
        self.0 |= flag.0;
    }

    pub fn remove(&mut self, flag: NodeFlags) {
        self.0 &= !flag.0;
    }
}

/// Node index type
pub type NodeIndex = u32;

/// Null node index constant
pub const NULL_NODE: NodeIndex = NodeIndex::MAX;

/// Capacity of a node's local neighbor list
pub const MAX_NODE_NEIGHBORS: usize = 2 * CELL_NEIGHBOR_COUNT;

/// A cell taking part in one path query
#[derive(Debug, Clone)]
pub struct PathNode {
    /// Cell this node wraps
    pub cell: CellRef,
    /// Growth heuristic cost
    pub weight: f32,
    /// Hop count to the destination, `None` until reached
    pub steps: Option<u32>,
    /// Node flags
    pub flags: NodeFlags,
    neighbors: [NodeIndex; MAX_NODE_NEIGHBORS],
    neighbor_count: usize,
}

impl PathNode {
    /// Creates a new node
    pub fn new(cell: CellRef, weight: f32) -> Self {
        Self {
            cell,
            weight,
            steps: None,
            flags: NodeFlags::default(),
            neighbors: [NULL_NODE; MAX_NODE_NEIGHBORS],
            neighbor_count: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(NodeFlags::CLOSED)
    }

    pub fn is_checked(&self) -> bool {
        self.flags.contains(NodeFlags::CHECKED)
    }

    /// Local graph neighbors in insertion order
    pub fn neighbors(&self) -> &[NodeIndex] {
        &self.neighbors[..self.neighbor_count]
    }

    pub fn has_neighbor(&self, node: NodeIndex) -> bool {
        self.neighbors().contains(&node)
    }

    /// Appends a local neighbor
    ///
    /// Returns `false` if the node is already listed or the list is full.
    pub fn add_neighbor(&mut self, node: NodeIndex) -> bool {
        if self.neighbor_count >= MAX_NODE_NEIGHBORS || self.has_neighbor(node) {
            return false;
        }
        self.neighbors[self.neighbor_count] = node;
        self.neighbor_count += 1;
        true
    }

    /// Forgets hop counts and local links before a new optimization pass
    pub fn reset_for_optimization(&mut self) {
        self.steps = None;
        self.neighbor_count = 0;
        self.flags.remove(NodeFlags::CHECKED);
    }
}

/// Pool of path nodes with a cell lookup table
///
/// Node storage is kept between queries and only grows, so repeated
/// queries stop allocating once the longest search has been seen.
#[derive(Debug)]
pub struct PathNodePool {
    /// Node storage; only the first `node_count` entries are live
    nodes: Vec<PathNode>,
    /// First node index for each hash bucket
    first: Vec<NodeIndex>,
    /// Next node index in hash chain
    next: Vec<NodeIndex>,
    max_nodes: usize,
    hash_size: usize,
    node_count: usize,
}

impl PathNodePool {
    /// Creates a pool holding at most `max_nodes` live nodes
    pub fn new(max_nodes: usize) -> Self {
        let hash_size = (max_nodes / 4).clamp(16, 4096).next_power_of_two();
        Self {
            nodes: Vec::new(),
            first: vec![NULL_NODE; hash_size],
            next: Vec::new(),
            max_nodes,
            hash_size,
            node_count: 0,
        }
    }

    /// Clears the pool, keeping its storage
    pub fn clear(&mut self) {
        self.first.fill(NULL_NODE);
        self.node_count = 0;
    }

    pub fn len(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Appends a node for `cell`
    ///
    /// Returns `None` when the pool is full. Cells are not deduplicated; use
    /// [`PathNodePool::find`] first where that matters.
    pub fn push(&mut self, cell: CellRef, weight: f32) -> Option<NodeIndex> {
        if self.node_count >= self.max_nodes {
            return None;
        }

        let idx = self.node_count;
        let node = PathNode::new(cell, weight);
        if idx < self.nodes.len() {
            self.nodes[idx] = node;
        } else {
            self.nodes.push(node);
        }

        let hash = Self::hash_ref(cell) & (self.hash_size - 1);
        if idx < self.next.len() {
            self.next[idx] = self.first[hash];
        } else {
            self.next.push(self.first[hash]);
        }
        self.first[hash] = idx as NodeIndex;

        self.node_count += 1;
        Some(idx as NodeIndex)
    }

    /// Finds the node wrapping `cell`
    pub fn find(&self, cell: CellRef) -> Option<NodeIndex> {
        let hash = Self::hash_ref(cell) & (self.hash_size - 1);
        let mut idx = self.first[hash];

        while idx != NULL_NODE {
            let node_idx = idx as usize;
            if node_idx >= self.node_count {
                break;
            }
            if self.nodes[node_idx].cell == cell {
                return Some(idx);
            }
            idx = self.next[node_idx];
        }

        None
    }

    pub fn contains_cell(&self, cell: CellRef) -> bool {
        self.find(cell).is_some()
    }

    /// Gets a live node
    ///
    /// Panics if `idx` is not below [`PathNodePool::len`].
    pub fn node(&self, idx: NodeIndex) -> &PathNode {
        &self.nodes()[idx as usize]
    }

    /// Gets a live node mutably
    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut PathNode {
        &mut self.nodes_mut()[idx as usize]
    }

    /// Live nodes in insertion order
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes[..self.node_count]
    }

    pub fn nodes_mut(&mut self) -> &mut [PathNode] {
        &mut self.nodes[..self.node_count]
    }

    /// Links two nodes in both directions
    ///
    /// Returns `false` if they were already linked, are the same node, or a
    /// neighbor list is full.
    pub fn link(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b || self.node(a).has_neighbor(b) {
            return false;
        }
        if !self.node_mut(a).add_neighbor(b) {
            return false;
        }
        if !self.node_mut(b).add_neighbor(a) {
            log::warn!("Local neighbor list of path node {} is full", b);
            return false;
        }
        true
    }

    /// Resets every live node for a new optimization pass
    pub fn reset_for_optimization(&mut self) {
        for node in self.nodes_mut() {
            node.reset_for_optimization();
        }
    }

    /// Hashes a cell ref
    fn hash_ref(cell: CellRef) -> usize {
        let a = cell.id() as usize;
        a ^ (a >> 16)
    }
}
