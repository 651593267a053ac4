//! Named faults: oriented cell-face ranges with a transmissibility
//! multiplier, updated last-write-wins by MULTFLT records.

use smallvec::SmallVec;
use std::collections::HashMap;

use crate::deck::Deck;
use crate::dims::Dims;
use crate::error::GridError;
use crate::gridbox::BoxRange;

/// One of the six cell face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDir {
    /// Face toward increasing i.
    XPlus,
    /// Face toward decreasing i.
    XMinus,
    /// Face toward increasing j.
    YPlus,
    /// Face toward decreasing j.
    YMinus,
    /// Face toward increasing k.
    ZPlus,
    /// Face toward decreasing k.
    ZMinus,
}

impl FaceDir {
    /// All six directions, in the source format's MULTX..MULTZ- order.
    pub const ALL: [FaceDir; 6] = [
        FaceDir::XPlus,
        FaceDir::XMinus,
        FaceDir::YPlus,
        FaceDir::YMinus,
        FaceDir::ZPlus,
        FaceDir::ZMinus,
    ];

    /// Parse a face string from a FAULTS record. Both the axis letters
    /// (X/Y/Z) and the logical-index letters (I/J/K) are accepted, with
    /// an optional trailing `-`.
    pub fn from_face_str(s: &str) -> Result<Self, GridError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" | "I" | "X+" | "I+" => Ok(FaceDir::XPlus),
            "X-" | "I-" => Ok(FaceDir::XMinus),
            "Y" | "J" | "Y+" | "J+" => Ok(FaceDir::YPlus),
            "Y-" | "J-" => Ok(FaceDir::YMinus),
            "Z" | "K" | "Z+" | "K+" => Ok(FaceDir::ZPlus),
            "Z-" | "K-" => Ok(FaceDir::ZMinus),
            other => Err(GridError::BadItem {
                keyword: "FAULTS".to_string(),
                message: format!("unrecognized face direction {other:?}"),
            }),
        }
    }

    /// The directional multiplier keyword for this face.
    pub fn mult_keyword(&self) -> &'static str {
        match self {
            FaceDir::XPlus => "MULTX",
            FaceDir::XMinus => "MULTX-",
            FaceDir::YPlus => "MULTY",
            FaceDir::YMinus => "MULTY-",
            FaceDir::ZPlus => "MULTZ",
            FaceDir::ZMinus => "MULTZ-",
        }
    }
}

/// An oriented range of cell faces belonging to a fault.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultFace {
    /// Cells whose `dir` face lies on the fault.
    pub range: BoxRange,
    /// Which face of each covered cell.
    pub dir: FaceDir,
}

/// A named fault: its faces plus the current transmissibility multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    name: String,
    faces: SmallVec<[FaultFace; 2]>,
    trans_mult: f64,
}

impl Fault {
    /// Fault name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All face ranges of this fault.
    pub fn faces(&self) -> &[FaultFace] {
        &self.faces
    }

    /// Current transmissibility multiplier (1.0 until MULTFLT sets it).
    pub fn trans_mult(&self) -> f64 {
        self.trans_mult
    }

    /// Whether any face range covers the given cell/direction.
    pub fn covers(&self, i: usize, j: usize, k: usize, dir: FaceDir) -> bool {
        self.faces.iter().any(|f| f.dir == dir && f.range.contains(i, j, k))
    }
}

/// All faults of a deck, in definition order, addressable by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaultCollection {
    faults: Vec<Fault>,
    by_name: HashMap<String, usize>,
}

impl FaultCollection {
    /// Collect FAULTS definitions and apply MULTFLT updates in file
    /// order. A fault name spanning several FAULTS records accumulates
    /// faces; re-specifying a multiplier overwrites the previous value.
    pub fn from_deck(deck: &Deck, dims: &Dims) -> Result<Self, GridError> {
        let mut out = Self::default();
        for kw in deck.iter() {
            match kw.name() {
                "FAULTS" => {
                    for rec in kw.records() {
                        if rec.is_empty() {
                            continue;
                        }
                        if rec.len() < 8 {
                            return Err(GridError::BadItem {
                                keyword: "FAULTS".to_string(),
                                message: format!("record needs 8 items, got {}", rec.len()),
                            });
                        }
                        let name = rec.0[0].as_str("FAULTS")?.to_string();
                        let mut vals = [0i64; 6];
                        for (slot, item) in vals.iter_mut().zip(&rec.0[1..7]) {
                            *slot = item.as_int("FAULTS")?;
                        }
                        let range = BoxRange::from_one_based(dims, vals)?;
                        let dir = FaceDir::from_face_str(rec.0[7].as_str("FAULTS")?)?;
                        out.add_face(&name, FaultFace { range, dir });
                    }
                }
                "MULTFLT" => {
                    for rec in kw.records() {
                        if rec.is_empty() {
                            continue;
                        }
                        let name = rec.0[0].as_str("MULTFLT")?;
                        let mult = rec
                            .item(1)
                            .ok_or_else(|| GridError::MissingValue(format!("MULTFLT {name}")))?
                            .as_double("MULTFLT")?;
                        out.set_trans_mult(name, mult)?;
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn add_face(&mut self, name: &str, face: FaultFace) {
        match self.by_name.get(name) {
            Some(&idx) => self.faults[idx].faces.push(face),
            None => {
                self.by_name.insert(name.to_string(), self.faults.len());
                self.faults.push(Fault {
                    name: name.to_string(),
                    faces: SmallVec::from_elem(face, 1),
                    trans_mult: 1.0,
                });
            }
        }
    }

    /// Overwrite a fault's multiplier; unknown names are invalid-argument.
    pub fn set_trans_mult(&mut self, name: &str, mult: f64) -> Result<(), GridError> {
        let idx = self
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| GridError::UnknownFault(name.to_string()))?;
        self.faults[idx].trans_mult = mult;
        Ok(())
    }

    /// Whether a fault with this name was defined.
    pub fn has_fault(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The named fault; invalid-argument when undefined.
    pub fn get_fault(&self, name: &str) -> Result<&Fault, GridError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.faults[idx])
            .ok_or_else(|| GridError::UnknownFault(name.to_string()))
    }

    /// All faults in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.faults.iter()
    }

    /// Number of defined faults.
    pub fn len(&self) -> usize {
        self.faults.len()
    }

    /// Whether no fault was defined.
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}
