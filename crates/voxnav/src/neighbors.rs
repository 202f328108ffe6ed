//! 26-connectivity neighbor slot table
//!
//! Each cell stores its neighbors in a fixed array of 26 slots. The slot
//! numbering is part of the grid format: slot `s` always holds the cell at
//! `NEIGHBOR_OFFSETS[s]`, and the neighbor stores us back at
//! `OPPOSITE_SLOT[s]`.
//!
//! Only the 13 slots in `FORWARD_SLOTS` are looked up while wiring; the
//! remaining 13 are filled by mirroring, so every adjacent pair is linked
//! exactly once.

/// Number of neighbor slots per cell
pub const CELL_NEIGHBOR_COUNT: usize = 26;

/// Grid-coordinate offset `(dx, dy, dz)` for every neighbor slot
pub const NEIGHBOR_OFFSETS: [[i32; 3]; CELL_NEIGHBOR_COUNT] = [
    [0, 0, -1],   // 0
    [-1, 0, -1],  // 1
    [-1, 0, 0],   // 2
    [-1, 0, 1],   // 3
    [0, 0, 1],    // 4
    [1, 0, 1],    // 5
    [1, 0, 0],    // 6
    [1, 0, -1],   // 7
    [0, -1, 0],   // 8
    [0, -1, -1],  // 9
    [-1, -1, -1], // 10
    [-1, -1, 0],  // 11
    [-1, -1, 1],  // 12
    [0, -1, 1],   // 13
    [1, -1, 1],   // 14
    [1, -1, 0],   // 15
    [1, -1, -1],  // 16
    [0, 1, 0],    // 17
    [0, 1, -1],   // 18
    [-1, 1, -1],  // 19
    [-1, 1, 0],   // 20
    [-1, 1, 1],   // 21
    [0, 1, 1],    // 22
    [1, 1, 1],    // 23
    [1, 1, 0],    // 24
    [1, 1, -1],   // 25
];

/// Slot holding the inverse offset of each slot
pub const OPPOSITE_SLOT: [usize; CELL_NEIGHBOR_COUNT] = [
    4, 5, 6, 7, 0, 1, 2, 3, 17, 22, 23, 24, 25, 18, 19, 20, 21, 8, 13, 14, 15, 16, 9, 10, 11, 12,
];

/// Slots resolved directly while wiring; their opposites are mirrored
pub const FORWARD_SLOTS: [usize; 13] = [0, 1, 2, 3, 8, 9, 10, 11, 12, 18, 19, 20, 21];

/// Finds the slot whose offset equals `(dx, dy, dz)`
pub fn slot_for_offset(dx: i32, dy: i32, dz: i32) -> Option<usize> {
    NEIGHBOR_OFFSETS
        .iter()
        .position(|offset| *offset == [dx, dy, dz])
}
