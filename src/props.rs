//! Dense per-cell property store with box-scoped assignment and the
//! default-region keyword selection.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::context::{fit_data, ParseContext};
use crate::deck::{Deck, Record};
use crate::dims::Dims;
use crate::error::GridError;
use crate::gridbox::{BoxManager, BoxRange};

/// Type filter for [`GridProperties::supports_grid_property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Integer-valued keywords only.
    Int,
    /// Double-valued keywords only.
    Double,
    /// Either value type.
    Any,
}

/// A dense per-cell scalar property, one value per cell of the full
/// cartesian grid (inactive cells included).
#[derive(Debug, Clone, PartialEq)]
pub struct GridProperty<T> {
    name: String,
    data: Vec<T>,
}

impl<T: Copy> GridProperty<T> {
    fn filled(name: &str, value: T, size: usize) -> Self {
        Self { name: name.to_string(), data: vec![value; size] }
    }

    /// Keyword name this property was assigned under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of values (always the full cartesian size).
    pub fn cartesian_size(&self) -> usize {
        self.data.len()
    }

    /// Value at a global cell index; out of range is invalid-argument.
    pub fn iget(&self, index: usize) -> Result<T, GridError> {
        self.data.get(index).copied().ok_or_else(|| {
            GridError::IndexOutOfRange(format!(
                "{}: index {index} outside cartesian size {}",
                self.name,
                self.data.len()
            ))
        })
    }

    /// The full data slice in global cell order.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

/// Integer keywords the store recognizes, with their default fill.
const INT_KEYWORDS: [(&str, i32); 8] = [
    ("ACTNUM", 1),
    ("SATNUM", 1),
    ("FIPNUM", 1),
    ("EQLNUM", 1),
    ("PVTNUM", 1),
    ("IMBNUM", 1),
    ("FLUXNUM", 1),
    ("MULTNUM", 1),
];

/// Double keywords the store recognizes, with their default fill.
/// TOPS is absent on purpose: it is layer-sized geometry input, not a
/// per-cell property.
const DOUBLE_KEYWORDS: [(&str, f64); 15] = [
    ("PORO", 0.0),
    ("NTG", 1.0),
    ("PERMX", 0.0),
    ("PERMY", 0.0),
    ("PERMZ", 0.0),
    ("SWAT", 0.0),
    ("SGAS", 0.0),
    ("MULTX", 1.0),
    ("MULTX-", 1.0),
    ("MULTY", 1.0),
    ("MULTY-", 1.0),
    ("MULTZ", 1.0),
    ("MULTZ-", 1.0),
    ("MULTPV", 1.0),
    ("PORV", 0.0),
];

fn int_default(name: &str) -> Option<i32> {
    INT_KEYWORDS.iter().find(|(kw, _)| *kw == name).map(|(_, d)| *d)
}

fn double_default(name: &str) -> Option<f64> {
    DOUBLE_KEYWORDS.iter().find(|(kw, _)| *kw == name).map(|(_, d)| *d)
}

/// Fallback default-region keyword when the grid-options opt-in is absent.
const DEFAULT_REGION_FALLBACK: &str = "FLUXNUM";
/// Default-region keyword selected by the GRIDOPTS opt-in.
const DEFAULT_REGION_GRIDOPTS: &str = "MULTNUM";

/// Store of all grid properties assigned by one deck, plus the resolved
/// default-region keyword. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GridProperties {
    dims: Dims,
    int_props: HashMap<String, GridProperty<i32>>,
    double_props: HashMap<String, GridProperty<f64>>,
    deck_assigned: HashSet<String>,
    default_region: String,
}

impl GridProperties {
    /// Replay the deck's property assignments (full-grid or box-scoped
    /// data keywords, EQUALS records) into dense arrays and resolve the
    /// default-region keyword.
    pub fn from_deck(deck: &Deck, dims: Dims, ctx: &mut ParseContext) -> Result<Self, GridError> {
        let mut store = Self {
            dims,
            int_props: HashMap::new(),
            double_props: HashMap::new(),
            deck_assigned: HashSet::new(),
            default_region: resolve_default_region(deck).to_string(),
        };

        let mut boxes = BoxManager::new(dims);
        for kw in deck.iter() {
            match kw.name() {
                "BOX" => {
                    let data = kw.data_i64()?;
                    if data.len() < 6 {
                        return Err(GridError::SizeMismatch {
                            keyword: "BOX".to_string(),
                            expected: 6,
                            got: data.len(),
                        });
                    }
                    boxes.set_box(BoxRange::from_one_based(
                        &dims,
                        [data[0], data[1], data[2], data[3], data[4], data[5]],
                    )?);
                }
                "ENDBOX" => boxes.end_box(),
                "EQUALS" => {
                    for rec in kw.records() {
                        store.apply_equals(rec, &boxes)?;
                    }
                }
                name => {
                    if int_default(name).is_some() {
                        let target = boxes.active();
                        let values = fit_data(ctx, name, kw.data_i64()?, target.volume())?;
                        let prop = store.materialize_int(name);
                        for (g, v) in target.global_indices(&dims).into_iter().zip(values) {
                            prop.data[g] = v as i32;
                        }
                        store.deck_assigned.insert(name.to_string());
                    } else if double_default(name).is_some() {
                        let target = boxes.active();
                        let values = fit_data(ctx, name, kw.data_f64()?, target.volume())?;
                        let prop = store.materialize_double(name);
                        for (g, v) in target.global_indices(&dims).into_iter().zip(values) {
                            prop.data[g] = v;
                        }
                        store.deck_assigned.insert(name.to_string());
                    }
                }
            }
        }

        // The default-region property must exist even when the deck never
        // assigns it, so identity lookups always resolve.
        let default_region = store.default_region.clone();
        store.materialize_int(&default_region);
        Ok(store)
    }

    fn apply_equals(&mut self, rec: &Record, boxes: &BoxManager) -> Result<(), GridError> {
        let Some(name_item) = rec.item(0) else { return Ok(()) };
        let name = name_item.as_str("EQUALS")?.to_string();
        let is_int = int_default(&name).is_some();
        let is_double = double_default(&name).is_some();
        if !is_int && !is_double {
            return Ok(());
        }
        let value = rec
            .item(1)
            .ok_or_else(|| GridError::MissingValue(format!("EQUALS {name}")))?;
        let target = if rec.len() >= 8 {
            let mut vals = [0i64; 6];
            for (slot, item) in vals.iter_mut().zip(&rec.0[2..8]) {
                *slot = item.as_int("EQUALS")?;
            }
            BoxRange::from_one_based(&self.dims, vals)?
        } else {
            boxes.active()
        };
        if is_int {
            let v = value.as_int("EQUALS")? as i32;
            let dims = self.dims;
            let prop = self.materialize_int(&name);
            for g in target.global_indices(&dims) {
                prop.data[g] = v;
            }
        } else {
            let v = value.as_double("EQUALS")?;
            let dims = self.dims;
            let prop = self.materialize_double(&name);
            for g in target.global_indices(&dims) {
                prop.data[g] = v;
            }
        }
        self.deck_assigned.insert(name);
        Ok(())
    }

    fn materialize_int(&mut self, name: &str) -> &mut GridProperty<i32> {
        let size = self.dims.cartesian_size();
        self.int_props.entry(name.to_string()).or_insert_with(|| {
            GridProperty::filled(name, int_default(name).unwrap_or(0), size)
        })
    }

    fn materialize_double(&mut self, name: &str) -> &mut GridProperty<f64> {
        let size = self.dims.cartesian_size();
        self.double_props.entry(name.to_string()).or_insert_with(|| {
            GridProperty::filled(name, double_default(name).unwrap_or(0.0), size)
        })
    }

    /// Non-throwing probe: whether the keyword is recognized under the
    /// given type filter. Callers branch on this before committing to a
    /// typed getter.
    pub fn supports_grid_property(&self, name: &str, kind: PropertyKind) -> bool {
        match kind {
            PropertyKind::Int => int_default(name).is_some(),
            PropertyKind::Double => double_default(name).is_some(),
            PropertyKind::Any => int_default(name).is_some() || double_default(name).is_some(),
        }
    }

    /// Whether the deck itself assigned this integer keyword (as opposed
    /// to a property materialized with defaults).
    pub fn has_deck_int_property(&self, name: &str) -> bool {
        self.deck_assigned.contains(name) && self.int_props.contains_key(name)
    }

    /// The named integer property; invalid-argument when the keyword is
    /// unsupported or was never assigned for this deck.
    pub fn get_int_grid_property(&self, name: &str) -> Result<&GridProperty<i32>, GridError> {
        self.int_props
            .get(name)
            .ok_or_else(|| GridError::UnknownProperty(name.to_string()))
    }

    /// The named double property; invalid-argument when the keyword is
    /// unsupported or was never assigned for this deck.
    pub fn get_double_grid_property(&self, name: &str) -> Result<&GridProperty<f64>, GridError> {
        self.double_props
            .get(name)
            .ok_or_else(|| GridError::UnknownProperty(name.to_string()))
    }

    /// The keyword designated as the default region property: the
    /// grid-options opt-in names it, otherwise the fixed fallback.
    pub fn default_region_keyword(&self) -> &str {
        &self.default_region
    }

    /// Distinct values actually present in the named integer property,
    /// sorted ascending; empty for unknown or unassigned keywords.
    pub fn get_regions(&self, name: &str) -> Vec<i32> {
        match self.int_props.get(name) {
            None => Vec::new(),
            Some(prop) => {
                let set: BTreeSet<i32> = prop.data.iter().copied().collect();
                set.into_iter().collect()
            }
        }
    }
}

/// GRIDOPTS selects the default region keyword: a leading "YES" opts into
/// MULTNUM, an operand naming a supported region keyword selects that
/// keyword directly, anything else keeps the FLUXNUM fallback.
fn resolve_default_region(deck: &Deck) -> &'static str {
    let Some(kw) = deck.keyword("GRIDOPTS") else { return DEFAULT_REGION_FALLBACK };
    let operand = kw.records().first().and_then(|rec| rec.item(0)).and_then(|item| match item {
        crate::deck::Item::Str(s) => Some(s.to_ascii_uppercase()),
        _ => None,
    });
    let Some(operand) = operand else { return DEFAULT_REGION_FALLBACK };
    if operand == "YES" {
        return DEFAULT_REGION_GRIDOPTS;
    }
    INT_KEYWORDS
        .iter()
        .map(|(name, _)| *name)
        .find(|name| *name == operand)
        .unwrap_or(DEFAULT_REGION_FALLBACK)
}
