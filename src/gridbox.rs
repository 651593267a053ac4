//! Inclusive i/j/k sub-ranges and the ambient BOX/ENDBOX scope they form.

use crate::dims::Dims;
use crate::error::GridError;

/// An inclusive, 0-based i/j/k sub-range of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxRange {
    /// First i index (inclusive).
    pub i1: usize,
    /// Last i index (inclusive).
    pub i2: usize,
    /// First j index (inclusive).
    pub j1: usize,
    /// Last j index (inclusive).
    pub j2: usize,
    /// First k index (inclusive).
    pub k1: usize,
    /// Last k index (inclusive).
    pub k2: usize,
}

impl BoxRange {
    /// The full-grid box.
    pub fn full(dims: &Dims) -> Self {
        Self { i1: 0, i2: dims.nx() - 1, j1: 0, j2: dims.ny() - 1, k1: 0, k2: dims.nz() - 1 }
    }

    /// Build from the source format's six 1-based inclusive integers,
    /// validating order and extents.
    pub fn from_one_based(
        dims: &Dims,
        vals: [i64; 6],
    ) -> Result<Self, GridError> {
        let [i1, i2, j1, j2, k1, k2] = vals;
        let axis = |lo: i64, hi: i64, n: usize, name: &str| -> Result<(usize, usize), GridError> {
            if lo < 1 || hi < lo || hi as usize > n {
                return Err(GridError::InvalidBox(format!(
                    "{name} range {lo}..{hi} outside 1..{n}"
                )));
            }
            Ok(((lo - 1) as usize, (hi - 1) as usize))
        };
        let (i1, i2) = axis(i1, i2, dims.nx(), "i")?;
        let (j1, j2) = axis(j1, j2, dims.ny(), "j")?;
        let (k1, k2) = axis(k1, k2, dims.nz(), "k")?;
        Ok(Self { i1, i2, j1, j2, k1, k2 })
    }

    /// Number of cells covered by the box.
    pub fn volume(&self) -> usize {
        (self.i2 - self.i1 + 1) * (self.j2 - self.j1 + 1) * (self.k2 - self.k1 + 1)
    }

    /// Whether the box covers the given cell.
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i >= self.i1 && i <= self.i2 && j >= self.j1 && j <= self.j2 && k >= self.k1 && k <= self.k2
    }

    /// Global cell indices covered by the box, in the source format's
    /// natural nested loop order: k outer, j middle, i inner (i fastest,
    /// matching the global ordering).
    pub fn global_indices(&self, dims: &Dims) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.volume());
        for k in self.k1..=self.k2 {
            for j in self.j1..=self.j2 {
                for i in self.i1..=self.i2 {
                    // In-range by construction.
                    out.push(i + j * dims.nx() + k * dims.nx() * dims.ny());
                }
            }
        }
        out
    }
}

/// Tracks the ambient box while replaying deck keywords. BOX replaces the
/// current range wholesale, ENDBOX restores the full grid.
#[derive(Debug, Clone)]
pub struct BoxManager {
    dims: Dims,
    current: Option<BoxRange>,
}

impl BoxManager {
    /// Start with no box set (full-grid scope).
    pub fn new(dims: Dims) -> Self {
        Self { dims, current: None }
    }

    /// Apply a BOX keyword: replace (not merge) the ambient range.
    pub fn set_box(&mut self, range: BoxRange) {
        self.current = Some(range);
    }

    /// Apply an ENDBOX keyword.
    pub fn end_box(&mut self) {
        self.current = None;
    }

    /// The range scoping the next assignment keyword.
    pub fn active(&self) -> BoxRange {
        self.current.unwrap_or_else(|| BoxRange::full(&self.dims))
    }

    /// Grid extents the manager validates against.
    pub fn dims(&self) -> &Dims {
        &self.dims
    }
}
