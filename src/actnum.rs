//! Active-cell resolution: layered ACTNUM overrides replayed in deck order.
//!
//! The mask starts all-active and each override rewrites only the cells it
//! touches, so overlapping box-scoped assignments resolve to last write
//! wins per cell. PINCH and MINPV/MINPVFIL are parsed here as settings;
//! folding them into the mask is an explicit consumer decision (see
//! `Grid::min_pv_filtered_actnum` and `Grid::cell_thickness`).

use crate::context::{fit_data, ParseContext};
use crate::deck::{Deck, Keyword};
use crate::dims::Dims;
use crate::error::GridError;
use crate::gridbox::{BoxManager, BoxRange};

/// Minimum pore-volume cutoff policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinpvMode {
    /// No cutoff configured (default).
    Inactive,
    /// Standard cutoff from the MINPV keyword.
    Standard,
    /// Fill-mode cutoff from the MINPVFIL keyword.
    Fill,
}

/// Threshold used when PINCH is given without an operand.
pub const DEFAULT_PINCH_THICKNESS: f64 = 0.001;

/// Replay ACTNUM-affecting keywords (BOX/ENDBOX scope, ACTNUM data,
/// EQUALS records naming ACTNUM) into one mask. Returns `None` when the
/// deck never touches activity: absence of ACTNUM means all active.
pub fn resolve_actnum(
    deck: &Deck,
    dims: &Dims,
    ctx: &mut ParseContext,
) -> Result<Option<Vec<bool>>, GridError> {
    let mut boxes = BoxManager::new(*dims);
    let mut mask: Option<Vec<bool>> = None;

    for kw in deck.iter() {
        match kw.name() {
            "BOX" => boxes.set_box(box_from_keyword(kw, dims)?),
            "ENDBOX" => boxes.end_box(),
            "ACTNUM" => {
                let target = boxes.active();
                let values = fit_data(ctx, "ACTNUM", kw.data_i64()?, target.volume())?;
                let mask = mask.get_or_insert_with(|| vec![true; dims.cartesian_size()]);
                for (g, v) in target.global_indices(dims).into_iter().zip(values) {
                    mask[g] = v != 0;
                }
            }
            "EQUALS" => {
                for rec in kw.records() {
                    let Some(name) = rec.item(0) else { continue };
                    if name.as_str("EQUALS")? != "ACTNUM" {
                        continue;
                    }
                    let value = rec
                        .item(1)
                        .ok_or_else(|| GridError::MissingValue("EQUALS ACTNUM".to_string()))?
                        .as_int("EQUALS")?;
                    let target = if rec.len() >= 8 {
                        let mut vals = [0i64; 6];
                        for (slot, item) in vals.iter_mut().zip(&rec.0[2..8]) {
                            *slot = item.as_int("EQUALS")?;
                        }
                        BoxRange::from_one_based(dims, vals)?
                    } else {
                        boxes.active()
                    };
                    let mask = mask.get_or_insert_with(|| vec![true; dims.cartesian_size()]);
                    for g in target.global_indices(dims) {
                        mask[g] = value != 0;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(mask)
}

/// Parse the optional PINCH threshold.
pub fn parse_pinch(deck: &Deck) -> Result<Option<f64>, GridError> {
    let Some(kw) = deck.keyword("PINCH") else { return Ok(None) };
    let data = kw.data_f64()?;
    Ok(Some(data.first().copied().unwrap_or(DEFAULT_PINCH_THICKNESS)))
}

/// Parse the optional MINPV/MINPVFIL cutoff. Specifying both keywords, or
/// a cutoff keyword without its numeric operand, is invalid-argument.
pub fn parse_minpv(deck: &Deck) -> Result<(MinpvMode, f64), GridError> {
    let std_kw = deck.keyword("MINPV");
    let fil_kw = deck.keyword("MINPVFIL");
    match (std_kw, fil_kw) {
        (Some(_), Some(_)) => Err(GridError::ConflictingKeywords(
            "MINPV".to_string(),
            "MINPVFIL".to_string(),
        )),
        (Some(kw), None) => Ok((MinpvMode::Standard, required_value(kw)?)),
        (None, Some(kw)) => Ok((MinpvMode::Fill, required_value(kw)?)),
        (None, None) => Ok((MinpvMode::Inactive, 0.0)),
    }
}

fn required_value(kw: &Keyword) -> Result<f64, GridError> {
    kw.data_f64()?
        .first()
        .copied()
        .ok_or_else(|| GridError::MissingValue(kw.name().to_string()))
}

fn box_from_keyword(kw: &Keyword, dims: &Dims) -> Result<BoxRange, GridError> {
    let data = kw.data_i64()?;
    if data.len() < 6 {
        return Err(GridError::SizeMismatch {
            keyword: "BOX".to_string(),
            expected: 6,
            got: data.len(),
        });
    }
    BoxRange::from_one_based(dims, [data[0], data[1], data[2], data[3], data[4], data[5]])
}
