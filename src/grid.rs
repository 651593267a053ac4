//! The resolved grid: extents, geometry, active mask, pinch/minpv settings.

pub mod egrid;

use crate::actnum;
use crate::context::ParseContext;
use crate::deck::Deck;
use crate::dims::Dims;
use crate::error::GridError;
use crate::geometry::{self, CartesianGeometry, CellGeometry};

pub use crate::actnum::MinpvMode;

/// A structured reservoir grid resolved from a deck (or reloaded from a
/// binary grid file). Immutable after construction except for
/// [`Grid::reset_actnum`], which requires exclusive access.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dims: Dims,
    geometry: Option<CellGeometry>,
    /// `None` means all cells active (absence of ACTNUM).
    actnum: Option<Vec<bool>>,
    pinch: Option<f64>,
    minpv_mode: MinpvMode,
    minpv_value: f64,
}

impl Grid {
    /// A unit-spacing cartesian grid with the given extents, all active.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        let dims = Dims::new(nx, ny, nz)?;
        Ok(Self {
            dims,
            geometry: Some(CellGeometry::Cartesian(CartesianGeometry::unit(&dims))),
            actnum: None,
            pinch: None,
            minpv_mode: MinpvMode::Inactive,
            minpv_value: 0.0,
        })
    }

    /// A grid with extents only: indexing and activity queries work,
    /// geometry queries fail with a logic error.
    pub fn dimensions_only(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        let dims = Dims::new(nx, ny, nz)?;
        Ok(Self {
            dims,
            geometry: None,
            actnum: None,
            pinch: None,
            minpv_mode: MinpvMode::Inactive,
            minpv_value: 0.0,
        })
    }

    /// Build a grid from a deck under the given leniency policy.
    ///
    /// Construction mode priority: corner-point, then cartesian, then
    /// dimensions-only. Extents come from DIMENS, or SPECGRID when DIMENS
    /// is absent; missing both is invalid-argument.
    pub fn from_deck(deck: &Deck, ctx: &mut ParseContext) -> Result<Self, GridError> {
        let dims = dims_from_deck(deck)?;
        let geometry = geometry::build_geometry(deck, &dims, ctx)?;
        let actnum = actnum::resolve_actnum(deck, &dims, ctx)?;
        let pinch = actnum::parse_pinch(deck)?;
        let (minpv_mode, minpv_value) = actnum::parse_minpv(deck)?;
        Ok(Self { dims, geometry, actnum, pinch, minpv_mode, minpv_value })
    }

    /// [`Grid::from_deck`] with the strict (all-fatal) policy.
    pub fn from_deck_strict(deck: &Deck) -> Result<Self, GridError> {
        Self::from_deck(deck, &mut ParseContext::strict())
    }

    /// Number of cells along the i axis.
    pub fn nx(&self) -> usize {
        self.dims.nx()
    }
    /// Number of cells along the j axis.
    pub fn ny(&self) -> usize {
        self.dims.ny()
    }
    /// Number of cells along the k axis.
    pub fn nz(&self) -> usize {
        self.dims.nz()
    }
    /// Total cell count, active or not.
    pub fn cartesian_size(&self) -> usize {
        self.dims.cartesian_size()
    }
    /// The grid extents and index mapping.
    pub fn dims(&self) -> &Dims {
        &self.dims
    }

    /// Whether the grid carries cell geometry (false for dimensions-only).
    pub fn has_cell_info(&self) -> bool {
        self.geometry.is_some()
    }

    /// Map (i,j,k) to the global cell index.
    pub fn global_index(&self, i: usize, j: usize, k: usize) -> Result<usize, GridError> {
        self.dims.global_index(i, j, k)
    }

    /// Map a global cell index to (i,j,k).
    pub fn ijk(&self, global: usize) -> Result<[usize; 3], GridError> {
        self.dims.ijk(global)
    }

    /// Whether the cell is active.
    pub fn cell_active(&self, i: usize, j: usize, k: usize) -> Result<bool, GridError> {
        let g = self.dims.global_index(i, j, k)?;
        Ok(self.actnum.as_ref().map_or(true, |m| m[g]))
    }

    /// Number of active cells after all overrides.
    pub fn num_active(&self) -> usize {
        match &self.actnum {
            None => self.dims.cartesian_size(),
            Some(mask) => mask.iter().filter(|&&a| a).count(),
        }
    }

    /// Cell volume by global index.
    pub fn cell_volume_global(&self, global: usize) -> Result<f64, GridError> {
        self.require_geometry()?.volume(&self.dims, global)
    }

    /// Cell volume by (i,j,k).
    pub fn cell_volume(&self, i: usize, j: usize, k: usize) -> Result<f64, GridError> {
        let g = self.dims.global_index(i, j, k)?;
        self.cell_volume_global(g)
    }

    /// Cell center position by global index.
    pub fn cell_center_global(&self, global: usize) -> Result<[f64; 3], GridError> {
        self.require_geometry()?.center(&self.dims, global)
    }

    /// Cell center position by (i,j,k).
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Result<[f64; 3], GridError> {
        let g = self.dims.global_index(i, j, k)?;
        self.cell_center_global(g)
    }

    /// Vertical cell thickness by global index, for pinch-out policies.
    pub fn cell_thickness(&self, global: usize) -> Result<f64, GridError> {
        self.require_geometry()?.thickness(&self.dims, global)
    }

    /// Whether a PINCH threshold was configured.
    pub fn is_pinch_active(&self) -> bool {
        self.pinch.is_some()
    }

    /// The PINCH threshold thickness; logic error when pinch is inactive.
    pub fn pinch_threshold_thickness(&self) -> Result<f64, GridError> {
        self.pinch.ok_or(GridError::PinchInactive)
    }

    /// The configured pore-volume cutoff mode.
    pub fn minpv_mode(&self) -> MinpvMode {
        self.minpv_mode
    }

    /// The configured pore-volume cutoff value (0.0 when inactive).
    pub fn minpv_value(&self) -> f64 {
        self.minpv_value
    }

    /// Export the active mask: clears `buffer` and, unless every cell is
    /// active, writes one 0/1 int per cell.
    pub fn export_actnum(&self, buffer: &mut Vec<i32>) {
        buffer.clear();
        if self.num_active() == self.cartesian_size() {
            return;
        }
        if let Some(mask) = &self.actnum {
            buffer.extend(mask.iter().map(|&a| i32::from(a)));
        }
    }

    /// Replace the active mask wholesale. `Some` must carry exactly one
    /// int per cell (nonzero = active); `None` restores the all-active
    /// default. The one permitted post-construction mutation.
    pub fn reset_actnum(&mut self, actnum: Option<&[i32]>) -> Result<(), GridError> {
        match actnum {
            None => {
                self.actnum = None;
                Ok(())
            }
            Some(values) => {
                if values.len() != self.cartesian_size() {
                    return Err(GridError::SizeMismatch {
                        keyword: "ACTNUM".to_string(),
                        expected: self.cartesian_size(),
                        got: values.len(),
                    });
                }
                self.actnum = Some(values.iter().map(|&v| v != 0).collect());
                Ok(())
            }
        }
    }

    /// Apply the configured pore-volume cutoff to a per-cell pore-volume
    /// array and return the pruned 0/1 mask, suitable for
    /// [`Grid::reset_actnum`]. With the cutoff inactive the current mask
    /// is returned unchanged.
    pub fn min_pv_filtered_actnum(&self, pore_volume: &[f64]) -> Result<Vec<i32>, GridError> {
        let n = self.cartesian_size();
        if pore_volume.len() != n {
            return Err(GridError::SizeMismatch {
                keyword: "PORV".to_string(),
                expected: n,
                got: pore_volume.len(),
            });
        }
        let mut out: Vec<i32> = match &self.actnum {
            None => vec![1; n],
            Some(mask) => mask.iter().map(|&a| i32::from(a)).collect(),
        };
        if self.minpv_mode != MinpvMode::Inactive {
            for (flag, &pv) in out.iter_mut().zip(pore_volume) {
                if pv < self.minpv_value {
                    *flag = 0;
                }
            }
        }
        Ok(out)
    }

    fn require_geometry(&self) -> Result<&CellGeometry, GridError> {
        self.geometry.as_ref().ok_or(GridError::NoCellInfo)
    }
}

fn dims_from_deck(deck: &Deck) -> Result<Dims, GridError> {
    let kw = deck
        .keyword("DIMENS")
        .or_else(|| deck.keyword("SPECGRID"))
        .ok_or_else(|| GridError::MissingKeyword("DIMENS or SPECGRID".to_string()))?;
    let data = kw.data_i64()?;
    if data.len() < 3 {
        return Err(GridError::SizeMismatch {
            keyword: kw.name().to_string(),
            expected: 3,
            got: data.len(),
        });
    }
    if data[..3].iter().any(|&v| v < 1) {
        return Err(GridError::IndexOutOfRange(format!(
            "{}: extents must be positive, got {:?}",
            kw.name(),
            &data[..3]
        )));
    }
    Dims::new(data[0] as usize, data[1] as usize, data[2] as usize)
}
