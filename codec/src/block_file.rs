//! The block-file dump (§6.2).
//!
//! Per block element `z`: a 1-byte length, then per generator `s`: a 1-byte descent kind, the
//! `cross`/`cayley`/`inverse_cayley` targets, and a "best good ascent" witness used by external
//! consumers to reconstruct the Bruhat order without re-running the classifier. The witness is
//! [`UNDEF_BLOCK`] when `s` is a descent of `z` (the field does not apply) and [`NO_GOOD_ASCENT`]
//! when `s` is a RealNonparity ascent (an ascent with no single well-defined image).
//!
//! `inverse_cayley` is carried alongside `cayley` so that [`BlockDump::to_block`] can rebuild a
//! [`Block`] usable by the KL engine and Bruhat order, both of which read inverse-Cayley targets
//! directly rather than re-deriving them by scanning for preimages.

use std::io::{Read, Write};

use klv_block::{Block, UNDEF_BLOCK};
use klv_kgb::DescentKind;

use crate::error::CodecError;
use crate::wire::{read_u32, read_u8, write_u32, write_u8};

pub const MAGIC: u32 = 0x06AB_DCF0;
/// Sentinel for an ascent generator (RealNonparity) that has no single well-defined image.
pub const NO_GOOD_ASCENT: u32 = UNDEF_BLOCK - 1;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockDump {
    pub rank: u32,
    pub size: u32,
    pub length: Vec<u8>,
    pub descent: Vec<Vec<DescentKind>>,
    pub cross: Vec<Vec<u32>>,
    pub cayley_first: Vec<Vec<u32>>,
    pub cayley_second: Vec<Vec<u32>>,
    pub inverse_cayley_first: Vec<Vec<u32>>,
    pub inverse_cayley_second: Vec<Vec<u32>>,
    pub best_good_ascent: Vec<Vec<u32>>,
}

fn best_good_ascent(block: &Block, s: usize, z: u32) -> u32 {
    match block.descent(s, z) {
        DescentKind::ComplexAscent => block.cross(s, z),
        DescentKind::ImaginaryTypeI | DescentKind::ImaginaryTypeII => block.cayley(s, z).0,
        DescentKind::RealNonparity => NO_GOOD_ASCENT,
        _ => UNDEF_BLOCK,
    }
}

impl BlockDump {
    pub fn from_block(block: &Block) -> Self {
        let n = block.size() as u32;
        let rank = block.rank();
        let mut length = Vec::with_capacity(n as usize);
        let mut descent = Vec::with_capacity(n as usize);
        let mut cross = Vec::with_capacity(n as usize);
        let mut cayley_first = Vec::with_capacity(n as usize);
        let mut cayley_second = Vec::with_capacity(n as usize);
        let mut inverse_cayley_first = Vec::with_capacity(n as usize);
        let mut inverse_cayley_second = Vec::with_capacity(n as usize);
        let mut best_good_ascent_rows = Vec::with_capacity(n as usize);

        for z in 0..n {
            length.push(block.length(z) as u8);
            let mut d_row = Vec::with_capacity(rank);
            let mut cross_row = Vec::with_capacity(rank);
            let mut c1_row = Vec::with_capacity(rank);
            let mut c2_row = Vec::with_capacity(rank);
            let mut ic1_row = Vec::with_capacity(rank);
            let mut ic2_row = Vec::with_capacity(rank);
            let mut good_row = Vec::with_capacity(rank);
            for s in 0..rank {
                d_row.push(block.descent(s, z));
                cross_row.push(block.cross(s, z));
                let (c1, c2) = block.cayley(s, z);
                c1_row.push(c1);
                c2_row.push(c2);
                let (ic1, ic2) = block.inverse_cayley(s, z);
                ic1_row.push(ic1);
                ic2_row.push(ic2);
                good_row.push(best_good_ascent(block, s, z));
            }
            descent.push(d_row);
            cross.push(cross_row);
            cayley_first.push(c1_row);
            cayley_second.push(c2_row);
            inverse_cayley_first.push(ic1_row);
            inverse_cayley_second.push(ic2_row);
            best_good_ascent_rows.push(good_row);
        }

        BlockDump {
            rank: rank as u32,
            size: n,
            length,
            descent,
            cross,
            cayley_first,
            cayley_second,
            inverse_cayley_first,
            inverse_cayley_second,
            best_good_ascent: best_good_ascent_rows,
        }
    }

    /// Rebuilds a [`Block`] from this dump, usable by the KL engine, W-graph extractor and Bruhat
    /// order (see [`Block::from_dump_parts`] for what is and isn't reconstructed).
    pub fn to_block(&self) -> Block {
        let n = self.size as usize;
        let rank = self.rank as usize;
        let length = self.length.iter().map(|&l| l as u32).collect();
        let cayley = (0..n)
            .map(|z| (0..rank).map(|s| (self.cayley_first[z][s], self.cayley_second[z][s])).collect())
            .collect();
        let inverse_cayley = (0..n)
            .map(|z| {
                (0..rank)
                    .map(|s| (self.inverse_cayley_first[z][s], self.inverse_cayley_second[z][s]))
                    .collect()
            })
            .collect();
        Block::from_dump_parts(rank, length, self.descent.clone(), self.cross.clone(), cayley, inverse_cayley)
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), CodecError> {
        write_u32(w, MAGIC)?;
        write_u32(w, self.rank)?;
        write_u32(w, self.size)?;
        let rank = self.rank as usize;
        for z in 0..self.size as usize {
            write_u8(w, self.length[z])?;
            for s in 0..rank {
                write_u8(w, self.descent[z][s].to_byte())?;
                write_u32(w, self.cross[z][s])?;
                write_u32(w, self.cayley_first[z][s])?;
                write_u32(w, self.cayley_second[z][s])?;
                write_u32(w, self.inverse_cayley_first[z][s])?;
                write_u32(w, self.inverse_cayley_second[z][s])?;
                write_u32(w, self.best_good_ascent[z][s])?;
            }
        }
        Ok(())
    }

    pub fn read(r: &mut impl Read) -> Result<Self, CodecError> {
        let magic = read_u32(r)?;
        if magic != MAGIC {
            return Err(CodecError::BadMagic { expected: MAGIC, found: magic });
        }
        let rank = read_u32(r)?;
        let size = read_u32(r)?;
        let mut length = Vec::with_capacity(size as usize);
        let mut descent = Vec::with_capacity(size as usize);
        let mut cross = Vec::with_capacity(size as usize);
        let mut cayley_first = Vec::with_capacity(size as usize);
        let mut cayley_second = Vec::with_capacity(size as usize);
        let mut inverse_cayley_first = Vec::with_capacity(size as usize);
        let mut inverse_cayley_second = Vec::with_capacity(size as usize);
        let mut best_good_ascent_rows = Vec::with_capacity(size as usize);

        for _ in 0..size {
            length.push(read_u8(r)?);
            let mut d_row = Vec::with_capacity(rank as usize);
            let mut cross_row = Vec::with_capacity(rank as usize);
            let mut c1_row = Vec::with_capacity(rank as usize);
            let mut c2_row = Vec::with_capacity(rank as usize);
            let mut ic1_row = Vec::with_capacity(rank as usize);
            let mut ic2_row = Vec::with_capacity(rank as usize);
            let mut good_row = Vec::with_capacity(rank as usize);
            for _ in 0..rank {
                let byte = read_u8(r)?;
                let kind = DescentKind::from_byte(byte).ok_or(CodecError::BadDescentByte(byte))?;
                d_row.push(kind);
                cross_row.push(read_u32(r)?);
                c1_row.push(read_u32(r)?);
                c2_row.push(read_u32(r)?);
                ic1_row.push(read_u32(r)?);
                ic2_row.push(read_u32(r)?);
                good_row.push(read_u32(r)?);
            }
            descent.push(d_row);
            cross.push(cross_row);
            cayley_first.push(c1_row);
            cayley_second.push(c2_row);
            inverse_cayley_first.push(ic1_row);
            inverse_cayley_second.push(ic2_row);
            best_good_ascent_rows.push(good_row);
        }

        Ok(BlockDump {
            rank,
            size,
            length,
            descent,
            cross,
            cayley_first,
            cayley_second,
            inverse_cayley_first,
            inverse_cayley_second,
            best_good_ascent: best_good_ascent_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_block::{build_block, TableDualInvolutionMap};
    use klv_kgb::fixtures;

    #[test]
    fn round_trips_byte_for_byte() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        use klv_kgb::Kgb;
        let block = build_block(&real, &dual, &map).unwrap();
        let dump = BlockDump::from_block(&block);

        let mut bytes = Vec::new();
        dump.write(&mut bytes).unwrap();
        let reloaded = BlockDump::read(&mut bytes.as_slice()).unwrap();
        assert_eq!(dump, reloaded);

        let mut bytes2 = Vec::new();
        reloaded.write(&mut bytes2).unwrap();
        assert_eq!(bytes, bytes2);
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = [0u8; 12];
        let err = BlockDump::read(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, CodecError::BadMagic { .. }));
    }

    #[test]
    fn to_block_is_usable_by_the_kl_engine() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        use klv_kgb::Kgb;
        let block = build_block(&real, &dual, &map).unwrap();
        let dump = BlockDump::from_block(&block);
        let rebuilt = dump.to_block();

        assert_eq!(rebuilt.size(), block.size());
        for z in 0..block.size() as u32 {
            assert_eq!(rebuilt.length(z), block.length(z));
            for s in 0..block.rank() {
                assert_eq!(rebuilt.descent(s, z), block.descent(s, z));
                assert_eq!(rebuilt.cross(s, z), block.cross(s, z));
                assert_eq!(rebuilt.cayley(s, z), block.cayley(s, z));
                assert_eq!(rebuilt.inverse_cayley(s, z), block.inverse_cayley(s, z));
            }
        }

        let mut store = klv_engine::KlStore::new(rebuilt.size());
        klv_engine::fill(&mut store, &rebuilt, (rebuilt.size() - 1) as u32).unwrap();
        assert_eq!(store.mu(0, 2), 1);
    }
}
