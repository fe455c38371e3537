//! Uniform spatial hash for SPH neighbor queries.
//!
//! Particles are bucketed by hashed grid cell into a list of
//! `(index, key)` entries sorted by key; a start-index table gives the
//! first entry for each occupied key. The table is rebuilt from scratch
//! every step, and queries walk the fixed 3x3 block of cells around a
//! point. Distinct cells may hash to the same key, so callers must still
//! distance-test every candidate.

use glam::Vec2;

/// Offsets of the 3x3 cell block visited by every neighbor query.
pub const CELL_OFFSETS: [(i32, i32); 9] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Marks a start-table slot whose key has no entries.
pub const NO_ENTRY: u32 = u32::MAX;

/// One bucketed particle: its index and the hash key of its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub index: u32,
    pub key: u32,
}

/// Grid cell containing a point, on an infinite lattice of `cell_size`
/// squares anchored at the origin.
#[inline]
pub fn cell_coord(point: Vec2, cell_size: f32) -> (i32, i32) {
    (
        (point.x / cell_size).floor() as i32,
        (point.y / cell_size).floor() as i32,
    )
}

/// Hash a cell coordinate. Multiplication wraps, so far-apart cells fold
/// onto the full u32 range before the key modulo is applied.
#[inline]
pub fn hash_cell(cell: (i32, i32)) -> u32 {
    let a = (cell.0 as u32).wrapping_mul(15823);
    let b = (cell.1 as u32).wrapping_mul(9737333);
    a.wrapping_add(b)
}

/// Sorted-entry spatial hash over a fixed cell size.
#[derive(Debug, Default)]
pub struct SpatialLookup {
    cell_size: f32,
    entries: Vec<Entry>,
    start_indices: Vec<u32>,
}

impl SpatialLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebucket every position. The key table is sized to the particle
    /// count, so `positions` must be non-empty.
    pub fn rebuild(&mut self, positions: &[Vec2], cell_size: f32) {
        assert!(!positions.is_empty(), "spatial lookup requires at least one particle");

        let count = positions.len();
        self.cell_size = cell_size;
        self.entries.clear();
        self.entries.reserve(count);
        self.start_indices.clear();
        self.start_indices.resize(count, NO_ENTRY);

        for (index, &position) in positions.iter().enumerate() {
            let key = self.key_from_hash(hash_cell(cell_coord(position, cell_size)));
            self.entries.push(Entry { index: index as u32, key });
        }
        self.entries.sort_unstable_by_key(|entry| entry.key);

        for i in 0..count {
            let key = self.entries[i].key;
            let key_prev = if i == 0 { NO_ENTRY } else { self.entries[i - 1].key };
            if key != key_prev {
                self.start_indices[key as usize] = i as u32;
            }
        }
    }

    /// Indices of every particle bucketed in the 3x3 cell block around
    /// `point`. Valid only after [`rebuild`](Self::rebuild).
    pub fn neighbors(&self, point: Vec2) -> impl Iterator<Item = usize> + '_ {
        let center = cell_coord(point, self.cell_size);
        CELL_OFFSETS
            .iter()
            .flat_map(move |&(dx, dy)| self.cell_entries((center.0 + dx, center.1 + dy)))
    }

    /// Indices of every particle whose cell hashes to the same key as
    /// `cell` (collisions included).
    fn cell_entries(&self, cell: (i32, i32)) -> impl Iterator<Item = usize> + '_ {
        let key = self.key_from_hash(hash_cell(cell));
        let start = (self.start_indices[key as usize] as usize).min(self.entries.len());
        self.entries[start..]
            .iter()
            .take_while(move |entry| entry.key == key)
            .map(|entry| entry.index as usize)
    }

    #[inline]
    fn key_from_hash(&self, hash: u32) -> u32 {
        debug_assert!(!self.start_indices.is_empty(), "lookup queried before rebuild");
        hash % self.start_indices.len() as u32
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn start_indices(&self) -> &[u32] {
        &self.start_indices
    }
}
