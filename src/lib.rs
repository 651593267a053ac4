//! Grid and property model for eclipse-style reservoir decks.
//!
//! The crate consumes a structured keyword/record deck (tokenization is the
//! caller's job) and resolves it into a read-only model: grid geometry and
//! extents, the active-cell mask, dense per-cell properties, fault and
//! directional transmissibility multipliers, and a binary grid file format
//! for round-tripping the resolved grid without the deck.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod actnum;
pub mod context;
pub mod deck;
pub mod dims;
pub mod error;
pub mod fault;
pub mod geometry;
pub mod grid;
pub mod gridbox;
pub mod props;
pub mod state;
pub mod transmult;

pub use context::ParseContext;
pub use deck::{Deck, Item, Keyword, Record};
pub use dims::Dims;
pub use error::{ErrorKind, GridError};
pub use fault::{FaceDir, Fault, FaultCollection};
pub use grid::{Grid, MinpvMode};
pub use props::{GridProperties, GridProperty, PropertyKind};
pub use state::ReservoirState;
pub use transmult::TransMult;

/// Returns the crate version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
