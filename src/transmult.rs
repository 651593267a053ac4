//! Per-cell, per-face transmissibility multipliers.
//!
//! The model snapshots the six directional multiplier fields (1.0 when
//! the deck never assigns one) and folds every fault face into them, so a
//! lookup is a single indexed read. Fault multipliers compose with the
//! directional field and with each other by multiplication; re-specifying
//! a fault's multiplier was already resolved to last-write-wins inside
//! [`FaultCollection`].

use std::collections::HashMap;

use crate::dims::Dims;
use crate::error::GridError;
use crate::fault::{FaceDir, FaultCollection};
use crate::props::GridProperties;

/// Resolved face-multiplier lookup for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TransMult {
    dims: Dims,
    /// Per-direction dense fields; absent directions default to 1.0.
    fields: HashMap<FaceDir, Vec<f64>>,
}

impl TransMult {
    /// Build from the directional multiplier properties and the resolved
    /// fault collection.
    pub fn new(dims: Dims, props: &GridProperties, faults: &FaultCollection) -> Self {
        let mut fields: HashMap<FaceDir, Vec<f64>> = HashMap::new();
        for dir in FaceDir::ALL {
            if let Ok(prop) = props.get_double_grid_property(dir.mult_keyword()) {
                fields.insert(dir, prop.data().to_vec());
            }
        }
        let mut tm = Self { dims, fields };
        tm.apply_faults(faults);
        tm
    }

    fn apply_faults(&mut self, faults: &FaultCollection) {
        let dims = self.dims;
        for fault in faults.iter() {
            for face in fault.faces() {
                let field = self
                    .fields
                    .entry(face.dir)
                    .or_insert_with(|| vec![1.0; dims.cartesian_size()]);
                for g in face.range.global_indices(&dims) {
                    field[g] *= fault.trans_mult();
                }
            }
        }
    }

    /// Multiplier for one face of the cell at (i,j,k); 1.0 when nothing
    /// applies. Out-of-range cells are invalid-argument.
    pub fn multiplier(&self, i: usize, j: usize, k: usize, dir: FaceDir) -> Result<f64, GridError> {
        let g = self.dims.global_index(i, j, k)?;
        self.multiplier_global(g, dir)
    }

    /// Multiplier by global cell index.
    pub fn multiplier_global(&self, global: usize, dir: FaceDir) -> Result<f64, GridError> {
        if global >= self.dims.cartesian_size() {
            return Err(GridError::IndexOutOfRange(format!(
                "global index {global} outside cartesian size {}",
                self.dims.cartesian_size()
            )));
        }
        Ok(self.fields.get(&dir).map_or(1.0, |f| f[global]))
    }
}
