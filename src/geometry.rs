//! Per-cell geometry: tagged variant chosen once at construction.
//!
//! Three mutually exclusive input modes feed this module: corner-point
//! (COORD + ZCORN), cartesian (per-axis or per-cell spacing plus a TOPS or
//! DEPTHZ depth reference) and dimensions-only (no geometry stored at all,
//! represented as `None` on the grid). Cartesian input is normalized to
//! per-cell spacing plus per-cell top depth so that equivalent spacing
//! given through different keywords compares structurally equal.

use crate::context::{ParseContext, GRID_GEOMETRY};
use crate::deck::Deck;
use crate::dims::Dims;
use crate::error::GridError;

/// Cell geometry for a grid that carries cell information.
#[derive(Debug, Clone, PartialEq)]
pub enum CellGeometry {
    /// Regular cartesian spacing, normalized to per-cell arrays.
    Cartesian(CartesianGeometry),
    /// Corner-point description: coordinate pillars plus corner depths.
    CornerPoint(CornerPointGeometry),
}

/// Normalized cartesian geometry: per-cell spacing along each axis and the
/// per-cell top depth, each of cartesian-size length.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianGeometry {
    /// Cell extent along i, per cell.
    pub dx: Vec<f64>,
    /// Cell extent along j, per cell.
    pub dy: Vec<f64>,
    /// Cell extent along k, per cell.
    pub dz: Vec<f64>,
    /// Depth of the cell top, per cell (layer 0 seeded from TOPS or
    /// DEPTHZ, deeper layers accumulated from `dz`).
    pub z0: Vec<f64>,
}

/// Raw corner-point arrays in the source format's layout.
///
/// `coord` holds `6*(nx+1)*(ny+1)` values: per pillar, the (x,y,z) of its
/// top and bottom point. `zcorn` holds `8*nx*ny*nz` corner depths; the
/// corner `(i2,j2,k2)` of cell `(i,j,k)` lives at
/// `(2i+i2) + 2nx*(2j+j2) + 4*nx*ny*(2k+k2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerPointGeometry {
    /// Coordinate-line (pillar) samples.
    pub coord: Vec<f64>,
    /// Per-cell corner depths.
    pub zcorn: Vec<f64>,
}

impl CartesianGeometry {
    /// Unit-spacing geometry with the top layer at depth zero.
    pub fn unit(dims: &Dims) -> Self {
        let n = dims.cartesian_size();
        let mut z0 = vec![0.0; n];
        let layer = dims.nx() * dims.ny();
        for g in 0..n {
            z0[g] = (g / layer) as f64;
        }
        Self { dx: vec![1.0; n], dy: vec![1.0; n], dz: vec![1.0; n], z0 }
    }

    fn volume(&self, g: usize) -> f64 {
        self.dx[g] * self.dy[g] * self.dz[g]
    }

    fn center(&self, dims: &Dims, i: usize, j: usize, k: usize, g: usize) -> [f64; 3] {
        let mut x = 0.0;
        for ii in 0..i {
            x += self.dx[ii + j * dims.nx() + k * dims.nx() * dims.ny()];
        }
        x += self.dx[g] * 0.5;
        let mut y = 0.0;
        for jj in 0..j {
            y += self.dy[i + jj * dims.nx() + k * dims.nx() * dims.ny()];
        }
        y += self.dy[g] * 0.5;
        let z = self.z0[g] + self.dz[g] * 0.5;
        [x, y, z]
    }
}

impl CornerPointGeometry {
    /// Validate array lengths against the extents.
    pub fn new(dims: &Dims, coord: Vec<f64>, zcorn: Vec<f64>) -> Result<Self, GridError> {
        let coord_len = 6 * (dims.nx() + 1) * (dims.ny() + 1);
        if coord.len() != coord_len {
            return Err(GridError::SizeMismatch {
                keyword: "COORD".to_string(),
                expected: coord_len,
                got: coord.len(),
            });
        }
        let zcorn_len = 8 * dims.cartesian_size();
        if zcorn.len() != zcorn_len {
            return Err(GridError::SizeMismatch {
                keyword: "ZCORN".to_string(),
                expected: zcorn_len,
                got: zcorn.len(),
            });
        }
        Ok(Self { coord, zcorn })
    }

    /// Corner depth for corner `(i2,j2,k2)` of cell `(i,j,k)`.
    fn corner_depth(&self, dims: &Dims, i: usize, j: usize, k: usize, c: [usize; 3]) -> f64 {
        let nx = dims.nx();
        let ny = dims.ny();
        let idx = (2 * i + c[0]) + 2 * nx * (2 * j + c[1]) + 4 * nx * ny * (2 * k + c[2]);
        self.zcorn[idx]
    }

    /// Position of one cell corner: (x,y) interpolated along the pillar at
    /// the corner's depth.
    fn corner(&self, dims: &Dims, i: usize, j: usize, k: usize, c: [usize; 3]) -> [f64; 3] {
        let z = self.corner_depth(dims, i, j, k, c);
        let pillar = 6 * ((i + c[0]) + (j + c[1]) * (dims.nx() + 1));
        let top = &self.coord[pillar..pillar + 3];
        let bot = &self.coord[pillar + 3..pillar + 6];
        let dz = bot[2] - top[2];
        let t = if dz.abs() < 1e-12 { 0.0 } else { (z - top[2]) / dz };
        [top[0] + t * (bot[0] - top[0]), top[1] + t * (bot[1] - top[1]), z]
    }

    /// The eight corner positions, indexed by `i2 + 2*j2 + 4*k2`.
    fn corners(&self, dims: &Dims, i: usize, j: usize, k: usize) -> [[f64; 3]; 8] {
        let mut out = [[0.0; 3]; 8];
        for k2 in 0..2 {
            for j2 in 0..2 {
                for i2 in 0..2 {
                    out[i2 + 2 * j2 + 4 * k2] = self.corner(dims, i, j, k, [i2, j2, k2]);
                }
            }
        }
        out
    }

    fn volume(&self, dims: &Dims, i: usize, j: usize, k: usize) -> f64 {
        let c = self.corners(dims, i, j, k);
        // Six tetrahedra around the main diagonal c0-c7.
        const TETS: [[usize; 4]; 6] = [
            [0, 1, 5, 7],
            [0, 5, 4, 7],
            [0, 4, 6, 7],
            [0, 6, 2, 7],
            [0, 2, 3, 7],
            [0, 3, 1, 7],
        ];
        let mut vol = 0.0;
        for t in TETS {
            vol += signed_tet_volume(c[t[0]], c[t[1]], c[t[2]], c[t[3]]);
        }
        vol.abs()
    }

    fn center(&self, dims: &Dims, i: usize, j: usize, k: usize) -> [f64; 3] {
        let c = self.corners(dims, i, j, k);
        let mut acc = [0.0; 3];
        for p in &c {
            acc[0] += p[0];
            acc[1] += p[1];
            acc[2] += p[2];
        }
        [acc[0] / 8.0, acc[1] / 8.0, acc[2] / 8.0]
    }

    fn thickness(&self, dims: &Dims, i: usize, j: usize, k: usize) -> f64 {
        let mut acc = 0.0;
        for j2 in 0..2 {
            for i2 in 0..2 {
                let top = self.corner_depth(dims, i, j, k, [i2, j2, 0]);
                let bot = self.corner_depth(dims, i, j, k, [i2, j2, 1]);
                acc += bot - top;
            }
        }
        acc / 4.0
    }
}

fn signed_tet_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let w = [d[0] - a[0], d[1] - a[1], d[2] - a[2]];
    let det = u[0] * (v[1] * w[2] - v[2] * w[1]) - u[1] * (v[0] * w[2] - v[2] * w[0])
        + u[2] * (v[0] * w[1] - v[1] * w[0]);
    det / 6.0
}

impl CellGeometry {
    /// Cell volume by global index.
    pub fn volume(&self, dims: &Dims, g: usize) -> Result<f64, GridError> {
        let [i, j, k] = dims.ijk(g)?;
        Ok(match self {
            CellGeometry::Cartesian(c) => c.volume(g),
            CellGeometry::CornerPoint(cp) => cp.volume(dims, i, j, k),
        })
    }

    /// Cell center position by global index.
    pub fn center(&self, dims: &Dims, g: usize) -> Result<[f64; 3], GridError> {
        let [i, j, k] = dims.ijk(g)?;
        Ok(match self {
            CellGeometry::Cartesian(c) => c.center(dims, i, j, k, g),
            CellGeometry::CornerPoint(cp) => cp.center(dims, i, j, k),
        })
    }

    /// Vertical cell thickness by global index (feeds the PINCH policy).
    pub fn thickness(&self, dims: &Dims, g: usize) -> Result<f64, GridError> {
        let [i, j, k] = dims.ijk(g)?;
        Ok(match self {
            CellGeometry::Cartesian(c) => c.dz[g],
            CellGeometry::CornerPoint(cp) => cp.thickness(dims, i, j, k),
        })
    }
}

/// Keywords that put the deck in cartesian mode when corner-point data is
/// absent.
const CARTESIAN_KEYWORDS: [&str; 8] = ["DX", "DXV", "DY", "DYV", "DZ", "DZV", "TOPS", "DEPTHZ"];

/// Select the construction mode from the keywords present and build the
/// geometry. Returns `None` for a dimensions-only grid; returns `None`
/// with a recorded warning when malformed geometry is downgraded through
/// the `grid-geometry` leniency flag.
pub fn build_geometry(
    deck: &Deck,
    dims: &Dims,
    ctx: &mut ParseContext,
) -> Result<Option<CellGeometry>, GridError> {
    let has_corner = deck.has_keyword("COORD") || deck.has_keyword("ZCORN");
    let has_cartesian = CARTESIAN_KEYWORDS.iter().any(|kw| deck.has_keyword(kw));

    let built = if has_corner {
        build_corner_point(deck, dims)
    } else if has_cartesian {
        build_cartesian(deck, dims)
    } else {
        return Ok(None);
    };

    match built {
        Ok(g) => Ok(Some(g)),
        Err(err) => {
            // Downgrade to a dimensions-only grid when the caller opted in.
            ctx.handle(GRID_GEOMETRY, err)?;
            Ok(None)
        }
    }
}

fn build_corner_point(deck: &Deck, dims: &Dims) -> Result<CellGeometry, GridError> {
    let coord = deck
        .keyword("COORD")
        .ok_or_else(|| GridError::MissingKeyword("COORD".to_string()))?
        .data_f64()?;
    let zcorn = deck
        .keyword("ZCORN")
        .ok_or_else(|| GridError::MissingKeyword("ZCORN".to_string()))?
        .data_f64()?;
    Ok(CellGeometry::CornerPoint(CornerPointGeometry::new(dims, coord, zcorn)?))
}

fn build_cartesian(deck: &Deck, dims: &Dims) -> Result<CellGeometry, GridError> {
    let n = dims.cartesian_size();
    let dx = axis_spacing(deck, dims, "DX", "DXV", Axis::I)?;
    let dy = axis_spacing(deck, dims, "DY", "DYV", Axis::J)?;
    let dz = axis_spacing(deck, dims, "DZ", "DZV", Axis::K)?;

    let mut z0 = vec![0.0; n];
    let layer = dims.nx() * dims.ny();
    if let Some(kw) = deck.keyword("TOPS") {
        let tops = sized_data(kw.data_f64()?, layer, "TOPS")?;
        z0[..layer].copy_from_slice(&tops);
    } else if let Some(kw) = deck.keyword("DEPTHZ") {
        let nodes_x = dims.nx() + 1;
        let depthz = sized_data(kw.data_f64()?, nodes_x * (dims.ny() + 1), "DEPTHZ")?;
        for j in 0..dims.ny() {
            for i in 0..dims.nx() {
                let z = (depthz[i + j * nodes_x]
                    + depthz[i + 1 + j * nodes_x]
                    + depthz[i + (j + 1) * nodes_x]
                    + depthz[i + 1 + (j + 1) * nodes_x])
                    / 4.0;
                z0[i + j * dims.nx()] = z;
            }
        }
    } else {
        return Err(GridError::MissingKeyword("TOPS or DEPTHZ".to_string()));
    }
    for g in layer..n {
        z0[g] = z0[g - layer] + dz[g - layer];
    }

    Ok(CellGeometry::Cartesian(CartesianGeometry { dx, dy, dz, z0 }))
}

enum Axis {
    I,
    J,
    K,
}

/// Fetch one axis's spacing, from either the per-cell or the per-axis
/// keyword, expanded to a per-cell array.
fn axis_spacing(
    deck: &Deck,
    dims: &Dims,
    cell_kw: &str,
    vector_kw: &str,
    axis: Axis,
) -> Result<Vec<f64>, GridError> {
    if let Some(kw) = deck.keyword(cell_kw) {
        return sized_data(kw.data_f64()?, dims.cartesian_size(), cell_kw);
    }
    let kw = deck
        .keyword(vector_kw)
        .ok_or_else(|| GridError::MissingKeyword(format!("{cell_kw} or {vector_kw}")))?;
    let axis_len = match axis {
        Axis::I => dims.nx(),
        Axis::J => dims.ny(),
        Axis::K => dims.nz(),
    };
    let v = sized_data(kw.data_f64()?, axis_len, vector_kw)?;
    let n = dims.cartesian_size();
    let mut out = Vec::with_capacity(n);
    for g in 0..n {
        let i = g % dims.nx();
        let j = (g / dims.nx()) % dims.ny();
        let k = g / (dims.nx() * dims.ny());
        out.push(match axis {
            Axis::I => v[i],
            Axis::J => v[j],
            Axis::K => v[k],
        });
    }
    Ok(out)
}

fn sized_data(data: Vec<f64>, expected: usize, keyword: &str) -> Result<Vec<f64>, GridError> {
    if data.len() != expected {
        return Err(GridError::SizeMismatch {
            keyword: keyword.to_string(),
            expected,
            got: data.len(),
        });
    }
    Ok(data)
}
