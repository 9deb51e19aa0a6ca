#![deny(missing_debug_implementations)]

//! Combines two one-sided KGB views (a real-side view and its dual) into a block: the set of
//! pairs `z = (x, y)` compatible under the descent classifier, together with cross and Cayley
//! tables, length, and involution support computed per block element.

pub mod dual;
pub mod error;

pub use dual::{DualInvolutionMap, TableDualInvolutionMap};
pub use error::BlockError;

use klv_kgb::{classify, DescentKind, Kgb};
use klv_util::BitSet64;

/// Sentinel block index marking an undefined cross/Cayley target.
pub const UNDEF_BLOCK: u32 = u32::MAX;

/// A fully built block: struct-of-arrays storage indexed by block element `z`.
#[derive(Debug)]
pub struct Block {
    rank: usize,
    x: Vec<u32>,
    y: Vec<u32>,
    length: Vec<u32>,
    descent: Vec<Vec<DescentKind>>,
    cross: Vec<Vec<u32>>,
    cayley: Vec<Vec<(u32, u32)>>,
    inverse_cayley: Vec<Vec<(u32, u32)>>,
    involution_support: Vec<BitSet64>,
    first_z_of_x: Vec<u32>,
    y_base_of_x: Vec<u32>,
}

impl Block {
    pub fn size(&self) -> usize {
        self.x.len()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn x(&self, z: u32) -> u32 {
        self.x[z as usize]
    }

    pub fn y(&self, z: u32) -> u32 {
        self.y[z as usize]
    }

    pub fn length(&self, z: u32) -> u32 {
        self.length[z as usize]
    }

    pub fn descent(&self, s: usize, z: u32) -> DescentKind {
        self.descent[z as usize][s]
    }

    pub fn cross(&self, s: usize, z: u32) -> u32 {
        self.cross[z as usize][s]
    }

    pub fn cayley(&self, s: usize, z: u32) -> (u32, u32) {
        self.cayley[z as usize][s]
    }

    pub fn inverse_cayley(&self, s: usize, z: u32) -> (u32, u32) {
        self.inverse_cayley[z as usize][s]
    }

    pub fn involution_support(&self, z: u32) -> BitSet64 {
        self.involution_support[z as usize]
    }

    /// Rebuilds a [`Block`] from per-element tables alone (length, descent, cross, Cayley and
    /// inverse-Cayley), as recovered from a block-file dump (§6.2). The KL engine, W-graph
    /// extractor and Bruhat order only ever read these tables, never the KGB coordinates `x`/`y`
    /// or [`Block::element`], so a dump-rebuilt block leaves those unusable (`x`/`y` read back as
    /// [`UNDEF_BLOCK`], `element` always returns [`UNDEF_BLOCK`]) rather than reconstructing
    /// coordinates the dump never recorded.
    pub fn from_dump_parts(
        rank: usize,
        length: Vec<u32>,
        descent: Vec<Vec<DescentKind>>,
        cross: Vec<Vec<u32>>,
        cayley: Vec<Vec<(u32, u32)>>,
        inverse_cayley: Vec<Vec<(u32, u32)>>,
    ) -> Block {
        let n = length.len();
        let involution_support = (0..n)
            .map(|z| {
                let mut support = BitSet64::EMPTY;
                for s in 0..rank {
                    if descent[z][s].is_descent() {
                        support.insert(s);
                    }
                }
                support
            })
            .collect();
        Block {
            rank,
            x: vec![UNDEF_BLOCK; n],
            y: vec![UNDEF_BLOCK; n],
            length,
            descent,
            cross,
            cayley,
            inverse_cayley,
            involution_support,
            first_z_of_x: vec![UNDEF_BLOCK; n + 1],
            y_base_of_x: vec![0; n],
        }
    }

    /// `O(1)` lookup of the block element with the given `(x, y)` pair, or [`UNDEF_BLOCK`] if no
    /// such element exists in this block.
    pub fn element(&self, x: u32, y: u32) -> u32 {
        let base = self.first_z_of_x[x as usize];
        let next = self.first_z_of_x[x as usize + 1];
        if base == next {
            return UNDEF_BLOCK;
        }
        let y_base = self.y_base_of_x[x as usize];
        if y < y_base {
            return UNDEF_BLOCK;
        }
        let offset = y - y_base;
        let z = base + offset;
        if z < next {
            z
        } else {
            UNDEF_BLOCK
        }
    }
}

/// Builds a [`Block`] from a real-side KGB view, its dual, and the map pairing their involutions.
///
/// Follows the real side's involution enumeration (`nth_involution`/`nr_involutions`) stratum by
/// stratum; within a stratum, every `x` in the real packet is paired with every `y` in the dual
/// packet, in packet order. This keeps `x` weakly increasing across the whole block and makes
/// [`Block::element`] an array lookup rather than a hash probe.
pub fn build_block(
    real: &dyn Kgb,
    dual: &dyn Kgb,
    dual_map: &dyn DualInvolutionMap,
) -> Result<Block, BlockError> {
    if real.rank() != dual.rank() {
        return Err(BlockError::RankMismatch {
            real: real.rank(),
            dual: dual.rank(),
        });
    }
    let rank = real.rank();

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut first_z_of_x = vec![UNDEF_BLOCK; real.size() + 1];
    let mut y_base_of_x = vec![0u32; real.size()];

    for i in 0..real.nr_involutions() {
        let real_inv = real.nth_involution(i);
        let dual_inv = dual_map.dual_of(&real_inv);
        let real_packet = real.tau_packet(&real_inv);
        let dual_packet = dual.tau_packet(&dual_inv);
        if dual_packet.is_empty() {
            return Err(BlockError::EmptyDualPacket { stratum: i });
        }
        for rx in real_packet.clone() {
            first_z_of_x[rx as usize] = x.len() as u32;
            y_base_of_x[rx as usize] = dual_packet.start;
            for dy in dual_packet.clone() {
                x.push(rx);
                y.push(dy);
            }
        }
    }
    let n = x.len() as u32;
    for slot in first_z_of_x.iter_mut() {
        if *slot == UNDEF_BLOCK {
            *slot = n;
        }
    }
    *first_z_of_x.last_mut().unwrap() = n;

    let length: Vec<u32> = x.iter().map(|&rx| real.length(rx)).collect();

    let mut descent = vec![Vec::with_capacity(rank); n as usize];
    let mut cross = vec![vec![UNDEF_BLOCK; rank]; n as usize];
    let mut cayley = vec![vec![(UNDEF_BLOCK, UNDEF_BLOCK); rank]; n as usize];
    let mut inverse_cayley = vec![vec![(UNDEF_BLOCK, UNDEF_BLOCK); rank]; n as usize];
    let mut involution_support = vec![BitSet64::EMPTY; n as usize];

    let element = |rx: u32, dy: u32| -> u32 {
        if rx == klv_kgb::UNDEF_KGB || dy == klv_kgb::UNDEF_KGB {
            return UNDEF_BLOCK;
        }
        if rx as usize >= first_z_of_x.len() - 1 {
            return UNDEF_BLOCK;
        }
        let base = first_z_of_x[rx as usize];
        let next = first_z_of_x[rx as usize + 1];
        if base == next {
            return UNDEF_BLOCK;
        }
        let y_base = y_base_of_x[rx as usize];
        if dy < y_base {
            return UNDEF_BLOCK;
        }
        let offset = dy - y_base;
        let z = base + offset;
        if z < next {
            z
        } else {
            UNDEF_BLOCK
        }
    };

    for z in 0..n {
        let rx = x[z as usize];
        let dy = y[z as usize];
        let mut support = BitSet64::EMPTY;
        for s in 0..rank {
            let kind = classify(real, dual, s, rx, dy);
            descent[z as usize].push(kind);
            if kind.is_descent() {
                support.insert(s);
            }

            cross[z as usize][s] = element(real.cross(s, rx), dual.cross(s, dy));

            match kind {
                DescentKind::ImaginaryTypeI | DescentKind::ImaginaryTypeII => {
                    let x_image = real.cayley(s, rx);
                    let (y1, y2) = dual.inverse_cayley(s, dy);
                    let first = element(x_image, y1);
                    let second = if kind == DescentKind::ImaginaryTypeII {
                        element(x_image, y2)
                    } else {
                        UNDEF_BLOCK
                    };
                    cayley[z as usize][s] = (first, second);
                }
                DescentKind::RealTypeI | DescentKind::RealTypeII => {
                    let y_image = dual.cayley(s, dy);
                    let (x1, x2) = real.inverse_cayley(s, rx);
                    let first = element(x1, y_image);
                    let second = if kind == DescentKind::RealTypeI {
                        element(x2, y_image)
                    } else {
                        UNDEF_BLOCK
                    };
                    inverse_cayley[z as usize][s] = (first, second);
                }
                _ => {}
            }
        }
        involution_support[z as usize] = support;
    }

    Ok(Block {
        rank,
        x,
        y,
        length,
        descent,
        cross,
        cayley,
        inverse_cayley,
        involution_support,
        first_z_of_x,
        y_base_of_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_kgb::fixtures;

    #[test]
    fn type_i_block_has_three_elements_in_length_order() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        let block = build_block(&real, &dual, &map).unwrap();

        assert_eq!(block.size(), 3);
        assert_eq!(block.length(0), 0);
        assert_eq!(block.length(1), 0);
        assert_eq!(block.length(2), 1);

        assert_eq!(block.element(0, 0), 0);
        assert_eq!(block.element(1, 0), 1);
        assert_eq!(block.element(2, 1), 2);
        assert_eq!(block.element(0, 1), UNDEF_BLOCK);
    }

    #[test]
    fn type_i_cross_is_involutive_and_cayley_reciprocal() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        let block = build_block(&real, &dual, &map).unwrap();

        assert_eq!(block.cross(0, 0), 1);
        assert_eq!(block.cross(0, 1), 0);
        assert_eq!(block.cross(0, 2), 2);

        assert_eq!(block.descent(0, 0), DescentKind::ImaginaryTypeI);
        assert_eq!(block.descent(0, 1), DescentKind::ImaginaryTypeI);
        assert_eq!(block.descent(0, 2), DescentKind::RealTypeI);

        assert_eq!(block.cayley(0, 0), (2, UNDEF_BLOCK));
        assert_eq!(block.cayley(0, 1), (2, UNDEF_BLOCK));
        assert_eq!(block.inverse_cayley(0, 2), (0, 1));
    }

    #[test]
    fn compact_block_is_a_single_element() {
        let (real, dual) = fixtures::toy_rank1_compact_pair();
        let map = TableDualInvolutionMap::new(vec![(real.involution(0), dual.involution(0))]);
        let block = build_block(&real, &dual, &map).unwrap();
        assert_eq!(block.size(), 1);
        assert_eq!(block.descent(0, 0), DescentKind::ImaginaryCompact);
        assert!(block.involution_support(0).contains(0));
    }

    #[test]
    fn rank_mismatch_is_rejected() {
        use klv_kgb::{ElementData, InMemoryKgb, Status};

        let (real, _) = fixtures::toy_rank1_type_i_pair();
        let dual2 = InMemoryKgb::new(
            2,
            vec![ElementData {
                length: 0,
                involution: real.involution(0),
                cartan_class: 0,
                per_generator: vec![
                    (Status::ImaginaryCompact, 0, klv_kgb::UNDEF_KGB, true),
                    (Status::ImaginaryCompact, 0, klv_kgb::UNDEF_KGB, true),
                ],
            }],
        );
        let map = TableDualInvolutionMap::new(vec![(real.involution(0), dual2.involution(0))]);
        let err = build_block(&real, &dual2, &map).unwrap_err();
        assert_eq!(err, BlockError::RankMismatch { real: 1, dual: 2 });
    }
}
