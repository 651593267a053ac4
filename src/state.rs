//! Construction pipeline and owner of the resolved model.

use crate::context::ParseContext;
use crate::deck::Deck;
use crate::error::GridError;
use crate::fault::FaultCollection;
use crate::grid::Grid;
use crate::props::GridProperties;
use crate::transmult::TransMult;

/// Owns the fully resolved model for one deck: grid, property store,
/// faults and the transmissibility model, built synchronously in that
/// order. Shared read-only with consumers; the only mutation afterwards
/// is [`ReservoirState::grid_mut`] + `reset_actnum`, which requires
/// exclusive access.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirState {
    grid: Grid,
    properties: GridProperties,
    faults: FaultCollection,
    trans_mult: TransMult,
}

impl ReservoirState {
    /// Resolve a deck under the given leniency policy.
    pub fn from_deck(deck: &Deck, ctx: &mut ParseContext) -> Result<Self, GridError> {
        let grid = Grid::from_deck(deck, ctx)?;
        let properties = GridProperties::from_deck(deck, *grid.dims(), ctx)?;
        let faults = FaultCollection::from_deck(deck, grid.dims())?;
        let trans_mult = TransMult::new(*grid.dims(), &properties, &faults);
        log::debug!(
            "resolved deck: {}x{}x{} cells, {} active, {} faults",
            grid.nx(),
            grid.ny(),
            grid.nz(),
            grid.num_active(),
            faults.len()
        );
        Ok(Self { grid, properties, faults, trans_mult })
    }

    /// [`ReservoirState::from_deck`] with the strict (all-fatal) policy.
    pub fn from_deck_strict(deck: &Deck) -> Result<Self, GridError> {
        Self::from_deck(deck, &mut ParseContext::strict())
    }

    /// The resolved input grid.
    pub fn input_grid(&self) -> &Grid {
        &self.grid
    }

    /// Exclusive access to the grid for `reset_actnum`.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The per-cell property store.
    pub fn properties(&self) -> &GridProperties {
        &self.properties
    }

    /// The fault collection.
    pub fn faults(&self) -> &FaultCollection {
        &self.faults
    }

    /// The face-multiplier model.
    pub fn trans_mult(&self) -> &TransMult {
        &self.trans_mult
    }

    /// Distinct values of a region keyword; empty for unknown keywords.
    pub fn get_regions(&self, keyword: &str) -> Vec<i32> {
        self.properties.get_regions(keyword)
    }
}
