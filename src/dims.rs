//! Logical grid extents and the canonical 3D <-> linear index mapping.

use crate::error::GridError;

/// Logical extents of a structured grid plus the canonical cell ordering
/// `idx = i + j*nx + k*nx*ny` (i fastest-varying).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Dims {
    /// Construct extents; each axis must be at least 1.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::IndexOutOfRange(format!(
                "extents must be positive, got ({nx},{ny},{nz})"
            )));
        }
        Ok(Self { nx, ny, nz })
    }

    /// Number of cells along the i axis.
    pub fn nx(&self) -> usize {
        self.nx
    }
    /// Number of cells along the j axis.
    pub fn ny(&self) -> usize {
        self.ny
    }
    /// Number of cells along the k axis.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of cells, active or not.
    pub fn cartesian_size(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Map an (i,j,k) triple to the global cell index.
    pub fn global_index(&self, i: usize, j: usize, k: usize) -> Result<usize, GridError> {
        if i >= self.nx || j >= self.ny || k >= self.nz {
            return Err(GridError::IndexOutOfRange(format!(
                "cell ({i},{j},{k}) outside extents ({},{},{})",
                self.nx, self.ny, self.nz
            )));
        }
        Ok(i + j * self.nx + k * self.nx * self.ny)
    }

    /// Map a global cell index back to its (i,j,k) triple.
    pub fn ijk(&self, global: usize) -> Result<[usize; 3], GridError> {
        if global >= self.cartesian_size() {
            return Err(GridError::IndexOutOfRange(format!(
                "global index {global} outside cartesian size {}",
                self.cartesian_size()
            )));
        }
        let i = global % self.nx;
        let j = (global / self.nx) % self.ny;
        let k = global / (self.nx * self.ny);
        Ok([i, j, k])
    }
}
