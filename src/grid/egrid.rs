//! Binary grid file read/write for [`Grid`].
//!
//! The format is self-identifying (magic + version) and carries extents,
//! geometry arrays, the active mask and the pinch/minpv settings, enough
//! to reconstruct a structurally equal grid with no access to the deck.
//! All scalars are little-endian; floating-point samples round-trip
//! bit-for-bit. Writes go to a sibling temporary file and are renamed into
//! place so a failed write never leaves a partial file at the target path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::{Grid, MinpvMode};
use crate::dims::Dims;
use crate::error::GridError;
use crate::geometry::{CartesianGeometry, CellGeometry, CornerPointGeometry};

const MAGIC: &[u8; 7] = b"EGRDRS\0";
const VERSION: u32 = 1;

const GEOM_NONE: u8 = 0;
const GEOM_CARTESIAN: u8 = 1;
const GEOM_CORNER_POINT: u8 = 2;

impl Grid {
    /// Write the resolved grid to a compact little-endian binary file.
    pub fn save_egrid<P: AsRef<Path>>(&self, path: P) -> Result<(), GridError> {
        let path = path.as_ref();
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        let result = self.write_to(&tmp);
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp);
            return result;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), GridError> {
        let mut f = File::create(path)?;
        f.write_all(MAGIC)?;
        f.write_all(&VERSION.to_le_bytes())?;
        f.write_all(&(self.dims.nx() as u32).to_le_bytes())?;
        f.write_all(&(self.dims.ny() as u32).to_le_bytes())?;
        f.write_all(&(self.dims.nz() as u32).to_le_bytes())?;

        match &self.geometry {
            None => f.write_all(&[GEOM_NONE])?,
            Some(CellGeometry::Cartesian(c)) => {
                f.write_all(&[GEOM_CARTESIAN])?;
                for arr in [&c.dx, &c.dy, &c.dz, &c.z0] {
                    write_f64s(&mut f, arr)?;
                }
            }
            Some(CellGeometry::CornerPoint(cp)) => {
                f.write_all(&[GEOM_CORNER_POINT])?;
                write_f64s(&mut f, &cp.coord)?;
                write_f64s(&mut f, &cp.zcorn)?;
            }
        }

        match &self.actnum {
            None => f.write_all(&[0u8])?,
            Some(mask) => {
                f.write_all(&[1u8])?;
                for &a in mask {
                    f.write_all(&[u8::from(a)])?;
                }
            }
        }

        match self.pinch {
            None => f.write_all(&[0u8])?,
            Some(t) => {
                f.write_all(&[1u8])?;
                f.write_all(&t.to_le_bytes())?;
            }
        }

        let mode = match self.minpv_mode {
            MinpvMode::Inactive => 0u8,
            MinpvMode::Standard => 1u8,
            MinpvMode::Fill => 2u8,
        };
        f.write_all(&[mode])?;
        f.write_all(&self.minpv_value.to_le_bytes())?;
        f.flush()?;
        Ok(())
    }

    /// Reconstruct a grid from a binary grid file. A nonexistent,
    /// truncated or foreign file fails with an invalid-argument error.
    pub fn load_egrid<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let mut f = File::open(path)?;
        let mut magic = [0u8; 7];
        f.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(GridError::BadHeader);
        }
        if read_u32(&mut f)? != VERSION {
            return Err(GridError::BadHeader);
        }
        let nx = read_u32(&mut f)? as usize;
        let ny = read_u32(&mut f)? as usize;
        let nz = read_u32(&mut f)? as usize;
        let dims = Dims::new(nx, ny, nz).map_err(|_| GridError::BadLength)?;
        let n = dims.cartesian_size();

        let geometry = match read_u8(&mut f)? {
            GEOM_NONE => None,
            GEOM_CARTESIAN => {
                let dx = read_f64s(&mut f, n)?;
                let dy = read_f64s(&mut f, n)?;
                let dz = read_f64s(&mut f, n)?;
                let z0 = read_f64s(&mut f, n)?;
                Some(CellGeometry::Cartesian(CartesianGeometry { dx, dy, dz, z0 }))
            }
            GEOM_CORNER_POINT => {
                let coord = read_f64s(&mut f, 6 * (nx + 1) * (ny + 1))?;
                let zcorn = read_f64s(&mut f, 8 * n)?;
                Some(CellGeometry::CornerPoint(CornerPointGeometry { coord, zcorn }))
            }
            _ => return Err(GridError::BadHeader),
        };

        let actnum = match read_u8(&mut f)? {
            0 => None,
            1 => {
                let mut bytes = vec![0u8; n];
                f.read_exact(&mut bytes)?;
                Some(bytes.into_iter().map(|b| b != 0).collect())
            }
            _ => return Err(GridError::BadLength),
        };

        let pinch = match read_u8(&mut f)? {
            0 => None,
            1 => Some(read_f64(&mut f)?),
            _ => return Err(GridError::BadLength),
        };

        let minpv_mode = match read_u8(&mut f)? {
            0 => MinpvMode::Inactive,
            1 => MinpvMode::Standard,
            2 => MinpvMode::Fill,
            _ => return Err(GridError::BadLength),
        };
        let minpv_value = read_f64(&mut f)?;

        // Trailing bytes mean this is not one of our files.
        let mut probe = [0u8; 1];
        if f.read(&mut probe)? != 0 {
            return Err(GridError::BadLength);
        }

        Ok(Grid { dims, geometry, actnum, pinch, minpv_mode, minpv_value })
    }
}

fn write_f64s(f: &mut File, values: &[f64]) -> Result<(), GridError> {
    for v in values {
        f.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn read_u8<R: Read>(r: &mut R) -> Result<u8, GridError> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)?;
    Ok(b[0])
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32, GridError> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

fn read_f64<R: Read>(r: &mut R) -> Result<f64, GridError> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b)?;
    Ok(f64::from_le_bytes(b))
}

fn read_f64s<R: Read>(r: &mut R, count: usize) -> Result<Vec<f64>, GridError> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_f64(r)?);
    }
    Ok(out)
}
