//! Marching cubes lookup tables.
//!
//! These encode the standard 256-case enumeration. Corner `i` sits at
//! [`CORNER_OFFSETS`]`[i]` relative to the cell origin, and bit `i` of a case
//! index is set when that corner's density is below the iso level.
//!
//! Every pair in [`EDGE_TO_CORNERS`] is ordered along the positive axis
//! direction. A grid edge shared by neighbouring cells is therefore always
//! interpolated from the same endpoint, which keeps shared vertices
//! bit-identical.

#![allow(clippy::unreadable_literal)]

/// Number of corner-sign configurations of a cube.
pub const CASE_COUNT: usize = 256;

/// Upper bound on triangles emitted by a single cell.
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// Number of cube edges.
pub const EDGE_COUNT: usize = 12;

/// Corner positions relative to the cell origin.
pub const CORNER_OFFSETS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner pair connected by each edge.
pub const EDGE_TO_CORNERS: [[u8; 2]; EDGE_COUNT] = [
    [0, 1],
    [1, 2],
    [3, 2],
    [0, 3],
    [4, 5],
    [5, 6],
    [7, 6],
    [4, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Triangles emitted per case.
#[rustfmt::skip]
pub static CASE_TO_TRIANGLE_COUNT: [u8; CASE_COUNT] = [
    0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 2,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 3,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 3,
    2, 3, 3, 2, 3, 4, 4, 3, 3, 4, 4, 3, 4, 5, 5, 2,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 3,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 4,
    2, 3, 3, 4, 3, 4, 2, 3, 3, 4, 4, 5, 4, 5, 3, 2,
    3, 4, 4, 3, 4, 5, 3, 2, 4, 5, 5, 4, 5, 2, 4, 1,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 3,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 2, 4, 3, 4, 3, 5, 2,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 4,
    3, 4, 4, 3, 4, 5, 5, 4, 4, 3, 5, 2, 5, 4, 2, 1,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 2, 3, 3, 2,
    3, 4, 4, 5, 4, 5, 5, 2, 4, 3, 5, 4, 3, 2, 4, 1,
    3, 4, 4, 5, 4, 5, 3, 4, 4, 5, 5, 2, 3, 4, 2, 1,
    2, 3, 3, 2, 3, 4, 2, 1, 3, 2, 4, 1, 2, 1, 1, 0,
];

/// Edge triples per case. Slots past [`CASE_TO_TRIANGLE_COUNT`] are zero and
/// never read.
#[rustfmt::skip]
pub static CASE_TO_EDGES: [[[u8; 3]; MAX_TRIANGLES_PER_CELL]; CASE_COUNT] = [
    [[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 1, 9], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 8, 3], [9, 8, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [1, 2, 10], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 2, 10], [0, 2, 9], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 8, 3], [2, 10, 8], [10, 9, 8], [0, 0, 0], [0, 0, 0]],
    [[3, 11, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 11, 2], [8, 11, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 9, 0], [2, 3, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 11, 2], [1, 9, 11], [9, 8, 11], [0, 0, 0], [0, 0, 0]],
    [[3, 10, 1], [11, 10, 3], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 10, 1], [0, 8, 10], [8, 11, 10], [0, 0, 0], [0, 0, 0]],
    [[3, 9, 0], [3, 11, 9], [11, 10, 9], [0, 0, 0], [0, 0, 0]],
    [[9, 8, 10], [10, 8, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 7, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 3, 0], [7, 3, 4], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 1, 9], [8, 4, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 1, 9], [4, 7, 1], [7, 3, 1], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [8, 4, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 4, 7], [3, 0, 4], [1, 2, 10], [0, 0, 0], [0, 0, 0]],
    [[9, 2, 10], [9, 0, 2], [8, 4, 7], [0, 0, 0], [0, 0, 0]],
    [[2, 10, 9], [2, 9, 7], [2, 7, 3], [7, 9, 4], [0, 0, 0]],
    [[8, 4, 7], [3, 11, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[11, 4, 7], [11, 2, 4], [2, 0, 4], [0, 0, 0], [0, 0, 0]],
    [[9, 0, 1], [8, 4, 7], [2, 3, 11], [0, 0, 0], [0, 0, 0]],
    [[4, 7, 11], [9, 4, 11], [9, 11, 2], [9, 2, 1], [0, 0, 0]],
    [[3, 10, 1], [3, 11, 10], [7, 8, 4], [0, 0, 0], [0, 0, 0]],
    [[1, 11, 10], [1, 4, 11], [1, 0, 4], [7, 11, 4], [0, 0, 0]],
    [[4, 7, 8], [9, 0, 11], [9, 11, 10], [11, 0, 3], [0, 0, 0]],
    [[4, 7, 11], [4, 11, 9], [9, 11, 10], [0, 0, 0], [0, 0, 0]],
    [[9, 5, 4], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 5, 4], [0, 8, 3], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 5, 4], [1, 5, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[8, 5, 4], [8, 3, 5], [3, 1, 5], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [9, 5, 4], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 0, 8], [1, 2, 10], [4, 9, 5], [0, 0, 0], [0, 0, 0]],
    [[5, 2, 10], [5, 4, 2], [4, 0, 2], [0, 0, 0], [0, 0, 0]],
    [[2, 10, 5], [3, 2, 5], [3, 5, 4], [3, 4, 8], [0, 0, 0]],
    [[9, 5, 4], [2, 3, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 11, 2], [0, 8, 11], [4, 9, 5], [0, 0, 0], [0, 0, 0]],
    [[0, 5, 4], [0, 1, 5], [2, 3, 11], [0, 0, 0], [0, 0, 0]],
    [[2, 1, 5], [2, 5, 8], [2, 8, 11], [4, 8, 5], [0, 0, 0]],
    [[10, 3, 11], [10, 1, 3], [9, 5, 4], [0, 0, 0], [0, 0, 0]],
    [[4, 9, 5], [0, 8, 1], [8, 10, 1], [8, 11, 10], [0, 0, 0]],
    [[5, 4, 0], [5, 0, 11], [5, 11, 10], [11, 0, 3], [0, 0, 0]],
    [[5, 4, 8], [5, 8, 10], [10, 8, 11], [0, 0, 0], [0, 0, 0]],
    [[9, 7, 8], [5, 7, 9], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 3, 0], [9, 5, 3], [5, 7, 3], [0, 0, 0], [0, 0, 0]],
    [[0, 7, 8], [0, 1, 7], [1, 5, 7], [0, 0, 0], [0, 0, 0]],
    [[1, 5, 3], [3, 5, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 7, 8], [9, 5, 7], [10, 1, 2], [0, 0, 0], [0, 0, 0]],
    [[10, 1, 2], [9, 5, 0], [5, 3, 0], [5, 7, 3], [0, 0, 0]],
    [[8, 0, 2], [8, 2, 5], [8, 5, 7], [10, 5, 2], [0, 0, 0]],
    [[2, 10, 5], [2, 5, 3], [3, 5, 7], [0, 0, 0], [0, 0, 0]],
    [[7, 9, 5], [7, 8, 9], [3, 11, 2], [0, 0, 0], [0, 0, 0]],
    [[9, 5, 7], [9, 7, 2], [9, 2, 0], [2, 7, 11], [0, 0, 0]],
    [[2, 3, 11], [0, 1, 8], [1, 7, 8], [1, 5, 7], [0, 0, 0]],
    [[11, 2, 1], [11, 1, 7], [7, 1, 5], [0, 0, 0], [0, 0, 0]],
    [[9, 5, 8], [8, 5, 7], [10, 1, 3], [10, 3, 11], [0, 0, 0]],
    [[5, 7, 0], [5, 0, 9], [7, 11, 0], [1, 0, 10], [11, 10, 0]],
    [[11, 10, 0], [11, 0, 3], [10, 5, 0], [8, 0, 7], [5, 7, 0]],
    [[11, 10, 5], [7, 11, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[10, 6, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [5, 10, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 0, 1], [5, 10, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 8, 3], [1, 9, 8], [5, 10, 6], [0, 0, 0], [0, 0, 0]],
    [[1, 6, 5], [2, 6, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 6, 5], [1, 2, 6], [3, 0, 8], [0, 0, 0], [0, 0, 0]],
    [[9, 6, 5], [9, 0, 6], [0, 2, 6], [0, 0, 0], [0, 0, 0]],
    [[5, 9, 8], [5, 8, 2], [5, 2, 6], [3, 2, 8], [0, 0, 0]],
    [[2, 3, 11], [10, 6, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[11, 0, 8], [11, 2, 0], [10, 6, 5], [0, 0, 0], [0, 0, 0]],
    [[0, 1, 9], [2, 3, 11], [5, 10, 6], [0, 0, 0], [0, 0, 0]],
    [[5, 10, 6], [1, 9, 2], [9, 11, 2], [9, 8, 11], [0, 0, 0]],
    [[6, 3, 11], [6, 5, 3], [5, 1, 3], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 11], [0, 11, 5], [0, 5, 1], [5, 11, 6], [0, 0, 0]],
    [[3, 11, 6], [0, 3, 6], [0, 6, 5], [0, 5, 9], [0, 0, 0]],
    [[6, 5, 9], [6, 9, 11], [11, 9, 8], [0, 0, 0], [0, 0, 0]],
    [[5, 10, 6], [4, 7, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 3, 0], [4, 7, 3], [6, 5, 10], [0, 0, 0], [0, 0, 0]],
    [[1, 9, 0], [5, 10, 6], [8, 4, 7], [0, 0, 0], [0, 0, 0]],
    [[10, 6, 5], [1, 9, 7], [1, 7, 3], [7, 9, 4], [0, 0, 0]],
    [[6, 1, 2], [6, 5, 1], [4, 7, 8], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 5], [5, 2, 6], [3, 0, 4], [3, 4, 7], [0, 0, 0]],
    [[8, 4, 7], [9, 0, 5], [0, 6, 5], [0, 2, 6], [0, 0, 0]],
    [[7, 3, 9], [7, 9, 4], [3, 2, 9], [5, 9, 6], [2, 6, 9]],
    [[3, 11, 2], [7, 8, 4], [10, 6, 5], [0, 0, 0], [0, 0, 0]],
    [[5, 10, 6], [4, 7, 2], [4, 2, 0], [2, 7, 11], [0, 0, 0]],
    [[0, 1, 9], [4, 7, 8], [2, 3, 11], [5, 10, 6], [0, 0, 0]],
    [[9, 2, 1], [9, 11, 2], [9, 4, 11], [7, 11, 4], [5, 10, 6]],
    [[8, 4, 7], [3, 11, 5], [3, 5, 1], [5, 11, 6], [0, 0, 0]],
    [[5, 1, 11], [5, 11, 6], [1, 0, 11], [7, 11, 4], [0, 4, 11]],
    [[0, 5, 9], [0, 6, 5], [0, 3, 6], [11, 6, 3], [8, 4, 7]],
    [[6, 5, 9], [6, 9, 11], [4, 7, 9], [7, 11, 9], [0, 0, 0]],
    [[10, 4, 9], [6, 4, 10], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 10, 6], [4, 9, 10], [0, 8, 3], [0, 0, 0], [0, 0, 0]],
    [[10, 0, 1], [10, 6, 0], [6, 4, 0], [0, 0, 0], [0, 0, 0]],
    [[8, 3, 1], [8, 1, 6], [8, 6, 4], [6, 1, 10], [0, 0, 0]],
    [[1, 4, 9], [1, 2, 4], [2, 6, 4], [0, 0, 0], [0, 0, 0]],
    [[3, 0, 8], [1, 2, 9], [2, 4, 9], [2, 6, 4], [0, 0, 0]],
    [[0, 2, 4], [4, 2, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[8, 3, 2], [8, 2, 4], [4, 2, 6], [0, 0, 0], [0, 0, 0]],
    [[10, 4, 9], [10, 6, 4], [11, 2, 3], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 2], [2, 8, 11], [4, 9, 10], [4, 10, 6], [0, 0, 0]],
    [[3, 11, 2], [0, 1, 6], [0, 6, 4], [6, 1, 10], [0, 0, 0]],
    [[6, 4, 1], [6, 1, 10], [4, 8, 1], [2, 1, 11], [8, 11, 1]],
    [[9, 6, 4], [9, 3, 6], [9, 1, 3], [11, 6, 3], [0, 0, 0]],
    [[8, 11, 1], [8, 1, 0], [11, 6, 1], [9, 1, 4], [6, 4, 1]],
    [[3, 11, 6], [3, 6, 0], [0, 6, 4], [0, 0, 0], [0, 0, 0]],
    [[6, 4, 8], [11, 6, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[7, 10, 6], [7, 8, 10], [8, 9, 10], [0, 0, 0], [0, 0, 0]],
    [[0, 7, 3], [0, 10, 7], [0, 9, 10], [6, 7, 10], [0, 0, 0]],
    [[10, 6, 7], [1, 10, 7], [1, 7, 8], [1, 8, 0], [0, 0, 0]],
    [[10, 6, 7], [10, 7, 1], [1, 7, 3], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 6], [1, 6, 8], [1, 8, 9], [8, 6, 7], [0, 0, 0]],
    [[2, 6, 9], [2, 9, 1], [6, 7, 9], [0, 9, 3], [7, 3, 9]],
    [[7, 8, 0], [7, 0, 6], [6, 0, 2], [0, 0, 0], [0, 0, 0]],
    [[7, 3, 2], [6, 7, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 3, 11], [10, 6, 8], [10, 8, 9], [8, 6, 7], [0, 0, 0]],
    [[2, 0, 7], [2, 7, 11], [0, 9, 7], [6, 7, 10], [9, 10, 7]],
    [[1, 8, 0], [1, 7, 8], [1, 10, 7], [6, 7, 10], [2, 3, 11]],
    [[11, 2, 1], [11, 1, 7], [10, 6, 1], [6, 7, 1], [0, 0, 0]],
    [[8, 9, 6], [8, 6, 7], [9, 1, 6], [11, 6, 3], [1, 3, 6]],
    [[0, 9, 1], [11, 6, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[7, 8, 0], [7, 0, 6], [3, 11, 0], [11, 6, 0], [0, 0, 0]],
    [[7, 11, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[7, 6, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 0, 8], [11, 7, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 1, 9], [11, 7, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[8, 1, 9], [8, 3, 1], [11, 7, 6], [0, 0, 0], [0, 0, 0]],
    [[10, 1, 2], [6, 11, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [3, 0, 8], [6, 11, 7], [0, 0, 0], [0, 0, 0]],
    [[2, 9, 0], [2, 10, 9], [6, 11, 7], [0, 0, 0], [0, 0, 0]],
    [[6, 11, 7], [2, 10, 3], [10, 8, 3], [10, 9, 8], [0, 0, 0]],
    [[7, 2, 3], [6, 2, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[7, 0, 8], [7, 6, 0], [6, 2, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 7, 6], [2, 3, 7], [0, 1, 9], [0, 0, 0], [0, 0, 0]],
    [[1, 6, 2], [1, 8, 6], [1, 9, 8], [8, 7, 6], [0, 0, 0]],
    [[10, 7, 6], [10, 1, 7], [1, 3, 7], [0, 0, 0], [0, 0, 0]],
    [[10, 7, 6], [1, 7, 10], [1, 8, 7], [1, 0, 8], [0, 0, 0]],
    [[0, 3, 7], [0, 7, 10], [0, 10, 9], [6, 10, 7], [0, 0, 0]],
    [[7, 6, 10], [7, 10, 8], [8, 10, 9], [0, 0, 0], [0, 0, 0]],
    [[6, 8, 4], [11, 8, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 6, 11], [3, 0, 6], [0, 4, 6], [0, 0, 0], [0, 0, 0]],
    [[8, 6, 11], [8, 4, 6], [9, 0, 1], [0, 0, 0], [0, 0, 0]],
    [[9, 4, 6], [9, 6, 3], [9, 3, 1], [11, 3, 6], [0, 0, 0]],
    [[6, 8, 4], [6, 11, 8], [2, 10, 1], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [3, 0, 11], [0, 6, 11], [0, 4, 6], [0, 0, 0]],
    [[4, 11, 8], [4, 6, 11], [0, 2, 9], [2, 10, 9], [0, 0, 0]],
    [[10, 9, 3], [10, 3, 2], [9, 4, 3], [11, 3, 6], [4, 6, 3]],
    [[8, 2, 3], [8, 4, 2], [4, 6, 2], [0, 0, 0], [0, 0, 0]],
    [[0, 4, 2], [4, 6, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 9, 0], [2, 3, 4], [2, 4, 6], [4, 3, 8], [0, 0, 0]],
    [[1, 9, 4], [1, 4, 2], [2, 4, 6], [0, 0, 0], [0, 0, 0]],
    [[8, 1, 3], [8, 6, 1], [8, 4, 6], [6, 10, 1], [0, 0, 0]],
    [[10, 1, 0], [10, 0, 6], [6, 0, 4], [0, 0, 0], [0, 0, 0]],
    [[4, 6, 3], [4, 3, 8], [6, 10, 3], [0, 3, 9], [10, 9, 3]],
    [[10, 9, 4], [6, 10, 4], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 9, 5], [7, 6, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [4, 9, 5], [11, 7, 6], [0, 0, 0], [0, 0, 0]],
    [[5, 0, 1], [5, 4, 0], [7, 6, 11], [0, 0, 0], [0, 0, 0]],
    [[11, 7, 6], [8, 3, 4], [3, 5, 4], [3, 1, 5], [0, 0, 0]],
    [[9, 5, 4], [10, 1, 2], [7, 6, 11], [0, 0, 0], [0, 0, 0]],
    [[6, 11, 7], [1, 2, 10], [0, 8, 3], [4, 9, 5], [0, 0, 0]],
    [[7, 6, 11], [5, 4, 10], [4, 2, 10], [4, 0, 2], [0, 0, 0]],
    [[3, 4, 8], [3, 5, 4], [3, 2, 5], [10, 5, 2], [11, 7, 6]],
    [[7, 2, 3], [7, 6, 2], [5, 4, 9], [0, 0, 0], [0, 0, 0]],
    [[9, 5, 4], [0, 8, 6], [0, 6, 2], [6, 8, 7], [0, 0, 0]],
    [[3, 6, 2], [3, 7, 6], [1, 5, 0], [5, 4, 0], [0, 0, 0]],
    [[6, 2, 8], [6, 8, 7], [2, 1, 8], [4, 8, 5], [1, 5, 8]],
    [[9, 5, 4], [10, 1, 6], [1, 7, 6], [1, 3, 7], [0, 0, 0]],
    [[1, 6, 10], [1, 7, 6], [1, 0, 7], [8, 7, 0], [9, 5, 4]],
    [[4, 0, 10], [4, 10, 5], [0, 3, 10], [6, 10, 7], [3, 7, 10]],
    [[7, 6, 10], [7, 10, 8], [5, 4, 10], [4, 8, 10], [0, 0, 0]],
    [[6, 9, 5], [6, 11, 9], [11, 8, 9], [0, 0, 0], [0, 0, 0]],
    [[3, 6, 11], [0, 6, 3], [0, 5, 6], [0, 9, 5], [0, 0, 0]],
    [[0, 11, 8], [0, 5, 11], [0, 1, 5], [5, 6, 11], [0, 0, 0]],
    [[6, 11, 3], [6, 3, 5], [5, 3, 1], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 10], [9, 5, 11], [9, 11, 8], [11, 5, 6], [0, 0, 0]],
    [[0, 11, 3], [0, 6, 11], [0, 9, 6], [5, 6, 9], [1, 2, 10]],
    [[11, 8, 5], [11, 5, 6], [8, 0, 5], [10, 5, 2], [0, 2, 5]],
    [[6, 11, 3], [6, 3, 5], [2, 10, 3], [10, 5, 3], [0, 0, 0]],
    [[5, 8, 9], [5, 2, 8], [5, 6, 2], [3, 8, 2], [0, 0, 0]],
    [[9, 5, 6], [9, 6, 0], [0, 6, 2], [0, 0, 0], [0, 0, 0]],
    [[1, 5, 8], [1, 8, 0], [5, 6, 8], [3, 8, 2], [6, 2, 8]],
    [[1, 5, 6], [2, 1, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 3, 6], [1, 6, 10], [3, 8, 6], [5, 6, 9], [8, 9, 6]],
    [[10, 1, 0], [10, 0, 6], [9, 5, 0], [5, 6, 0], [0, 0, 0]],
    [[0, 3, 8], [5, 6, 10], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[10, 5, 6], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[11, 5, 10], [7, 5, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[11, 5, 10], [11, 7, 5], [8, 3, 0], [0, 0, 0], [0, 0, 0]],
    [[5, 11, 7], [5, 10, 11], [1, 9, 0], [0, 0, 0], [0, 0, 0]],
    [[10, 7, 5], [10, 11, 7], [9, 8, 1], [8, 3, 1], [0, 0, 0]],
    [[11, 1, 2], [11, 7, 1], [7, 5, 1], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [1, 2, 7], [1, 7, 5], [7, 2, 11], [0, 0, 0]],
    [[9, 7, 5], [9, 2, 7], [9, 0, 2], [2, 11, 7], [0, 0, 0]],
    [[7, 5, 2], [7, 2, 11], [5, 9, 2], [3, 2, 8], [9, 8, 2]],
    [[2, 5, 10], [2, 3, 5], [3, 7, 5], [0, 0, 0], [0, 0, 0]],
    [[8, 2, 0], [8, 5, 2], [8, 7, 5], [10, 2, 5], [0, 0, 0]],
    [[9, 0, 1], [5, 10, 3], [5, 3, 7], [3, 10, 2], [0, 0, 0]],
    [[9, 8, 2], [9, 2, 1], [8, 7, 2], [10, 2, 5], [7, 5, 2]],
    [[1, 3, 5], [3, 7, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 7], [0, 7, 1], [1, 7, 5], [0, 0, 0], [0, 0, 0]],
    [[9, 0, 3], [9, 3, 5], [5, 3, 7], [0, 0, 0], [0, 0, 0]],
    [[9, 8, 7], [5, 9, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[5, 8, 4], [5, 10, 8], [10, 11, 8], [0, 0, 0], [0, 0, 0]],
    [[5, 0, 4], [5, 11, 0], [5, 10, 11], [11, 3, 0], [0, 0, 0]],
    [[0, 1, 9], [8, 4, 10], [8, 10, 11], [10, 4, 5], [0, 0, 0]],
    [[10, 11, 4], [10, 4, 5], [11, 3, 4], [9, 4, 1], [3, 1, 4]],
    [[2, 5, 1], [2, 8, 5], [2, 11, 8], [4, 5, 8], [0, 0, 0]],
    [[0, 4, 11], [0, 11, 3], [4, 5, 11], [2, 11, 1], [5, 1, 11]],
    [[0, 2, 5], [0, 5, 9], [2, 11, 5], [4, 5, 8], [11, 8, 5]],
    [[9, 4, 5], [2, 11, 3], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 5, 10], [3, 5, 2], [3, 4, 5], [3, 8, 4], [0, 0, 0]],
    [[5, 10, 2], [5, 2, 4], [4, 2, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 10, 2], [3, 5, 10], [3, 8, 5], [4, 5, 8], [0, 1, 9]],
    [[5, 10, 2], [5, 2, 4], [1, 9, 2], [9, 4, 2], [0, 0, 0]],
    [[8, 4, 5], [8, 5, 3], [3, 5, 1], [0, 0, 0], [0, 0, 0]],
    [[0, 4, 5], [1, 0, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[8, 4, 5], [8, 5, 3], [9, 0, 5], [0, 3, 5], [0, 0, 0]],
    [[9, 4, 5], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 11, 7], [4, 9, 11], [9, 10, 11], [0, 0, 0], [0, 0, 0]],
    [[0, 8, 3], [4, 9, 7], [9, 11, 7], [9, 10, 11], [0, 0, 0]],
    [[1, 10, 11], [1, 11, 4], [1, 4, 0], [7, 4, 11], [0, 0, 0]],
    [[3, 1, 4], [3, 4, 8], [1, 10, 4], [7, 4, 11], [10, 11, 4]],
    [[4, 11, 7], [9, 11, 4], [9, 2, 11], [9, 1, 2], [0, 0, 0]],
    [[9, 7, 4], [9, 11, 7], [9, 1, 11], [2, 11, 1], [0, 8, 3]],
    [[11, 7, 4], [11, 4, 2], [2, 4, 0], [0, 0, 0], [0, 0, 0]],
    [[11, 7, 4], [11, 4, 2], [8, 3, 4], [3, 2, 4], [0, 0, 0]],
    [[2, 9, 10], [2, 7, 9], [2, 3, 7], [7, 4, 9], [0, 0, 0]],
    [[9, 10, 7], [9, 7, 4], [10, 2, 7], [8, 7, 0], [2, 0, 7]],
    [[3, 7, 10], [3, 10, 2], [7, 4, 10], [1, 10, 0], [4, 0, 10]],
    [[1, 10, 2], [8, 7, 4], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 9, 1], [4, 1, 7], [7, 1, 3], [0, 0, 0], [0, 0, 0]],
    [[4, 9, 1], [4, 1, 7], [0, 8, 1], [8, 7, 1], [0, 0, 0]],
    [[4, 0, 3], [7, 4, 3], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[4, 8, 7], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[9, 10, 8], [10, 11, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 0, 9], [3, 9, 11], [11, 9, 10], [0, 0, 0], [0, 0, 0]],
    [[0, 1, 10], [0, 10, 8], [8, 10, 11], [0, 0, 0], [0, 0, 0]],
    [[3, 1, 10], [11, 3, 10], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 2, 11], [1, 11, 9], [9, 11, 8], [0, 0, 0], [0, 0, 0]],
    [[3, 0, 9], [3, 9, 11], [1, 2, 9], [2, 11, 9], [0, 0, 0]],
    [[0, 2, 11], [8, 0, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[3, 2, 11], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 3, 8], [2, 8, 10], [10, 8, 9], [0, 0, 0], [0, 0, 0]],
    [[9, 10, 2], [0, 9, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[2, 3, 8], [2, 8, 10], [0, 1, 8], [1, 10, 8], [0, 0, 0]],
    [[1, 10, 2], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[1, 3, 8], [9, 1, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 9, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 3, 8], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
];

/// Number of triangles emitted for `case`.
#[inline]
#[must_use]
pub fn triangle_count(case: u8) -> usize {
    usize::from(CASE_TO_TRIANGLE_COUNT[usize::from(case)])
}

/// Edge triples of the triangles emitted for `case`.
#[inline]
#[must_use]
pub fn case_triangles(case: u8) -> &'static [[u8; 3]] {
    &CASE_TO_EDGES[usize::from(case)][..triangle_count(case)]
}

/// Flattens [`CASE_TO_TRIANGLE_COUNT`] for upload as a `u32` storage array.
#[must_use]
pub fn triangle_counts_u32() -> Vec<u32> {
    CASE_TO_TRIANGLE_COUNT.iter().map(|&n| u32::from(n)).collect()
}

/// Flattens [`CASE_TO_EDGES`] as `case * 15 + triangle * 3 + vertex`.
#[must_use]
pub fn case_edges_u32() -> Vec<u32> {
    CASE_TO_EDGES
        .iter()
        .flatten()
        .flatten()
        .map(|&e| u32::from(e))
        .collect()
}

/// Flattens [`EDGE_TO_CORNERS`] as `edge * 2 + end`.
#[must_use]
pub fn edge_corners_u32() -> Vec<u32> {
    EDGE_TO_CORNERS
        .iter()
        .flatten()
        .map(|&c| u32::from(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_cases_are_empty() {
        assert_eq!(triangle_count(0), 0);
        assert_eq!(triangle_count(255), 0);
        assert!(case_triangles(0).is_empty());
        assert!(case_triangles(255).is_empty());
    }

    #[test]
    fn test_counts_within_bounds() {
        for case in 0..=255_u8 {
            assert!(triangle_count(case) <= MAX_TRIANGLES_PER_CELL);
        }
        // Only the two uniform cases are empty.
        let empty = (0..=255_u8).filter(|&c| triangle_count(c) == 0).count();
        assert_eq!(empty, 2);
    }

    #[test]
    fn test_edge_indices_in_range() {
        for case in 0..=255_u8 {
            for tri in case_triangles(case) {
                assert!(tri.iter().all(|&e| usize::from(e) < EDGE_COUNT));
                assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
            }
        }
    }

    #[test]
    fn test_edges_only_cross_sign_changes() {
        // Every edge used by a case must connect one corner below and one above.
        for case in 0..=255_u8 {
            for tri in case_triangles(case) {
                for &edge in tri {
                    let [a, b] = EDGE_TO_CORNERS[usize::from(edge)];
                    let below_a = case & (1 << a) != 0;
                    let below_b = case & (1 << b) != 0;
                    assert_ne!(below_a, below_b, "case {case} uses non-crossing edge {edge}");
                }
            }
        }
    }

    #[test]
    fn test_edges_are_axis_aligned_and_positive() {
        for [a, b] in EDGE_TO_CORNERS {
            let pa = CORNER_OFFSETS[usize::from(a)];
            let pb = CORNER_OFFSETS[usize::from(b)];
            let diff: Vec<i64> = (0..3).map(|i| i64::from(pb[i]) - i64::from(pa[i])).collect();
            assert_eq!(diff.iter().sum::<i64>(), 1);
            assert_eq!(diff.iter().filter(|&&d| d != 0).count(), 1);
        }
    }

    #[test]
    fn test_known_cases() {
        assert_eq!(case_triangles(1), &[[0, 8, 3]]);
        assert_eq!(case_triangles(3), &[[1, 8, 3], [9, 8, 1]]);
        assert_eq!(triangle_count(0x7e), 4);
    }

    #[test]
    fn test_flattened_layouts() {
        let counts = triangle_counts_u32();
        let edges = case_edges_u32();
        let corners = edge_corners_u32();
        assert_eq!(counts.len(), CASE_COUNT);
        assert_eq!(edges.len(), CASE_COUNT * MAX_TRIANGLES_PER_CELL * 3);
        assert_eq!(corners.len(), EDGE_COUNT * 2);
        assert_eq!(edges[15 + 1], 8);
        assert_eq!(corners[2 * 2], 3);
    }
}
