//! Grid cells (voxels) and their adjacency links

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::neighbors::CELL_NEIGHBOR_COUNT;

/// Reference to a cell by its position in the grid's linear storage
///
/// The index is `x * ny * nz + y * nz + z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef(u32);

impl CellRef {
    /// Creates a new cell reference from a linear index
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Gets the linear index
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Gets the linear index as a `usize` for slice access
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CellRef {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// One voxel of a baked grid
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Stable reference (linear index) of this cell
    pub index: CellRef,
    /// World-space centroid
    pub center: Vec3,
    /// Set at bake time from the occupancy sampler
    pub static_blocked: bool,
    /// Set between queries by external occupancy updates
    pub dynamic_blocked: bool,
    /// Adjacent cells by slot, see [`crate::neighbors::NEIGHBOR_OFFSETS`]
    pub neighbors: [Option<CellRef>; CELL_NEIGHBOR_COUNT],
}

impl Cell {
    /// Creates an unlinked, unblocked cell
    pub fn new(index: CellRef, center: Vec3) -> Self {
        Self {
            index,
            center,
            static_blocked: false,
            dynamic_blocked: false,
            neighbors: [None; CELL_NEIGHBOR_COUNT],
        }
    }

    /// A cell is traversable only when neither occupancy flag is set
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.static_blocked || self.dynamic_blocked
    }

    /// Gets the neighbor stored in `slot`
    #[inline]
    pub fn neighbor(&self, slot: usize) -> Option<CellRef> {
        self.neighbors.get(slot).copied().flatten()
    }

    /// Iterates over present neighbors in slot order
    pub fn neighbor_refs(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.neighbors.iter().filter_map(|n| *n)
    }

    /// Slot under which `other` is linked, if it is adjacent
    pub fn slot_of(&self, other: CellRef) -> Option<usize> {
        self.neighbors.iter().position(|n| *n == Some(other))
    }

    /// Checks whether `other` is one of the 26 neighbors
    #[inline]
    pub fn is_neighbor(&self, other: CellRef) -> bool {
        self.slot_of(other).is_some()
    }

    /// Number of linked neighbors (26 for interior cells)
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref() {
        let r = CellRef::new(42);
        assert_eq!(r.id(), 42);
        assert_eq!(r.index(), 42usize);
        assert_eq!(CellRef::from(42), r);
    }

    #[test]
    fn test_blocked_flags_combine() {
        let mut cell = Cell::new(CellRef::new(0), Vec3::ZERO);
        assert!(!cell.is_blocked());

        cell.dynamic_blocked = true;
        assert!(cell.is_blocked());

        cell.dynamic_blocked = false;
        cell.static_blocked = true;
        assert!(cell.is_blocked());
    }

    #[test]
    fn test_neighbor_lookup() {
        let mut cell = Cell::new(CellRef::new(0), Vec3::ZERO);
        cell.neighbors[6] = Some(CellRef::new(9));
        cell.neighbors[17] = Some(CellRef::new(3));

        assert_eq!(cell.neighbor(6), Some(CellRef::new(9)));
        assert_eq!(cell.neighbor(0), None);
        assert_eq!(cell.neighbor(99), None);
        assert_eq!(cell.slot_of(CellRef::new(3)), Some(17));
        assert!(cell.is_neighbor(CellRef::new(9)));
        assert!(!cell.is_neighbor(CellRef::new(1)));
        assert_eq!(cell.neighbor_count(), 2);

        let refs: Vec<_> = cell.neighbor_refs().collect();
        assert_eq!(refs, vec![CellRef::new(9), CellRef::new(3)]);
    }
}
