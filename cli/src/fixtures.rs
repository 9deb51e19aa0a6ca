//! The small named groups `smallkgb`/`smallblock`/... operate on.
//!
//! True KGB construction is an external collaborator (§6.1); these are the same hand-tabulated
//! toy pairs `klv_kgb::fixtures` uses for its own tests, given names a CLI user can type.

use anyhow::Result;
use klv_block::TableDualInvolutionMap;
use klv_kgb::{fixtures, InMemoryKgb, Kgb};

use crate::error::CliError;

pub const KNOWN_NAMES: &str = "a1-split, a1-compact";

/// Resolves a name to its real-side KGB, dual-side KGB, and the table pairing their involutions.
pub fn resolve(name: &str) -> Result<(InMemoryKgb, InMemoryKgb, TableDualInvolutionMap)> {
    match name {
        "a1-split" => {
            let (real, dual) = fixtures::toy_rank1_type_i_pair();
            let map = TableDualInvolutionMap::new(vec![
                (real.involution(0), dual.involution(0)),
                (real.involution(2), dual.involution(1)),
            ]);
            Ok((real, dual, map))
        }
        "a1-compact" => {
            let (real, dual) = fixtures::toy_rank1_compact_pair();
            let map = TableDualInvolutionMap::new(vec![(real.involution(0), dual.involution(0))]);
            Ok((real, dual, map))
        }
        other => Err(CliError::UnknownFixture {
            name: other.to_string(),
            known: KNOWN_NAMES,
        }
        .into()),
    }
}
