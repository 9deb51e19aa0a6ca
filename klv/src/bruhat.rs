//! The Bruhat order Hasse diagram (§4.8) and its transitive-closure comparison bitmap.

use klv_block::Block;
use klv_kgb::DescentKind;

/// Ascent images of `z` at `s`, or an empty list if `s` is not an ascent of `z`.
fn ascent_images(block: &Block, s: usize, z: u32) -> Vec<u32> {
    match block.descent(s, z) {
        DescentKind::ComplexAscent => vec![block.cross(s, z)],
        DescentKind::ImaginaryTypeI => vec![block.cayley(s, z).0],
        DescentKind::ImaginaryTypeII => {
            let (a, b) = block.cayley(s, z);
            vec![a, b]
        }
        _ => Vec::new(),
    }
}

/// For each predecessor `z'` of `w` in the diagram built so far, include the ascent image of `z'`
/// at `s` if `s` is an ascent of `z'` (§4.8's `insertAscents`).
fn insert_ascents(block: &Block, covers: &[Vec<u32>], w: u32, s: usize) -> Vec<u32> {
    covers[w as usize]
        .iter()
        .flat_map(|&zp| ascent_images(block, s, zp))
        .collect()
}

fn covers_of(block: &Block, covers: &[Vec<u32>], z: u32) -> Vec<u32> {
    let good = (0..block.rank()).find(|&s| block.descent(s, z).is_strict_descent());
    let mut set = match good {
        None => {
            let mut set = Vec::new();
            for s in 0..block.rank() {
                if block.descent(s, z) == DescentKind::RealTypeII {
                    let (a, _) = block.inverse_cayley(s, z);
                    set.push(a);
                }
            }
            set
        }
        Some(s) => match block.descent(s, z) {
            DescentKind::ComplexDescent => {
                let w = block.cross(s, z);
                let mut set = vec![w];
                set.extend(insert_ascents(block, covers, w, s));
                set
            }
            DescentKind::RealTypeI => {
                let (x1, x2) = block.inverse_cayley(s, z);
                let mut set = vec![x1, x2];
                set.extend(insert_ascents(block, covers, x1, s));
                set
            }
            other => unreachable!("strict-good descent was neither ComplexDescent nor RealTypeI: {other:?}"),
        },
    };
    set.sort_unstable();
    set.dedup();
    set
}

/// The Hasse diagram of the Bruhat order on a block, plus its transitive closure.
#[derive(Clone, Debug)]
pub struct BruhatOrder {
    covers: Vec<Vec<u32>>,
    leq: Vec<Vec<bool>>,
}

impl BruhatOrder {
    pub fn build(block: &Block) -> Self {
        let n = block.size();
        let mut covers: Vec<Vec<u32>> = vec![Vec::new(); n];
        for z in 0..n as u32 {
            covers[z as usize] = covers_of(block, &covers, z);
        }

        let mut leq = vec![vec![false; n]; n];
        for z in 0..n {
            leq[z][z] = true;
            for &w in &covers[z] {
                let below_w = leq[w as usize].clone();
                for (x, is_below) in below_w.into_iter().enumerate() {
                    if is_below {
                        leq[z][x] = true;
                    }
                }
            }
        }

        BruhatOrder { covers, leq }
    }

    /// The immediate predecessors (covers) of `z` in the Hasse diagram.
    pub fn covers(&self, z: u32) -> &[u32] {
        &self.covers[z as usize]
    }

    /// `x <= y` in the Bruhat order.
    pub fn leq(&self, x: u32, y: u32) -> bool {
        self.leq[y as usize][x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_block::{build_block, TableDualInvolutionMap};
    use klv_kgb::fixtures;

    #[test]
    fn type_i_block_hasse_diagram() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        let block = build_block(&real, &dual, &map).unwrap();

        let order = BruhatOrder::build(&block);
        assert!(order.covers(0).is_empty());
        assert!(order.covers(1).is_empty());
        assert_eq!(order.covers(2), &[0, 1]);

        assert!(order.leq(0, 2));
        assert!(order.leq(1, 2));
        assert!(!order.leq(2, 0));
        assert!(order.leq(0, 0));
    }
}
