//! The KL-matrix file (§6.3): per `y`, the primitive row as poly-store indices.

use std::io::{Read, Write};

use klv_block::Block;
use klv_engine::KlStore;

use crate::error::CodecError;
use crate::wire::{read_u32, write_u32};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatrixDump {
    /// `rows[y]` is the poly-store index for each `x` primitive w.r.t. `y`, in the same order as
    /// [`klv_engine::primitive_row`].
    pub rows: Vec<Vec<u32>>,
}

impl MatrixDump {
    /// Requires `store` to have every row up to `block.size() - 1` filled.
    pub fn from_store(block: &Block, store: &KlStore) -> Self {
        let rows = (0..block.size() as u32)
            .map(|y| {
                let row = store.row(y).expect("matrix dump requires a fully filled store");
                (0..row.len()).map(|i| row.get(i) as u32).collect()
            })
            .collect();
        MatrixDump { rows }
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), CodecError> {
        for row in &self.rows {
            write_u32(w, row.len() as u32)?;
            for &idx in row {
                write_u32(w, idx)?;
            }
        }
        Ok(())
    }

    /// Reads `size` rows (the caller supplies this from the preceding block file's header).
    pub fn read(r: &mut impl Read, size: usize) -> Result<Self, CodecError> {
        let mut rows = Vec::with_capacity(size);
        for _ in 0..size {
            let count = read_u32(r)?;
            let mut row = Vec::with_capacity(count as usize);
            for _ in 0..count {
                row.push(read_u32(r)?);
            }
            rows.push(row);
        }
        Ok(MatrixDump { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_block::{build_block, TableDualInvolutionMap};
    use klv_kgb::{fixtures, Kgb};

    #[test]
    fn round_trips() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        let block = build_block(&real, &dual, &map).unwrap();
        let mut store = KlStore::new(block.size());
        klv_engine::fill(&mut store, &block, (block.size() - 1) as u32).unwrap();

        let dump = MatrixDump::from_store(&block, &store);
        let mut bytes = Vec::new();
        dump.write(&mut bytes).unwrap();
        let reloaded = MatrixDump::read(&mut bytes.as_slice(), block.size()).unwrap();
        assert_eq!(dump, reloaded);
    }
}
