//! The W-graph extractor (§4.7): vertex labels are descent sets, edges come from non-zero mu
//! between pairs with differing descent sets.

use klv_block::Block;
use klv_poly::Coeff;
use klv_util::BitSet64;

use crate::row::KlStore;
use crate::support;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WGraphEdge {
    pub from: u32,
    pub to: u32,
    pub weight: Coeff,
}

/// The W-graph on a filled block: one descent-set label per vertex, plus directed weighted edges.
#[derive(Clone, Debug)]
pub struct WGraph {
    descent_sets: Vec<BitSet64>,
    edges: Vec<WGraphEdge>,
}

impl WGraph {
    /// Requires every `y` up to `block.size() - 1` to already be filled in `store`.
    pub fn build(block: &Block, store: &KlStore) -> Self {
        let n = block.size();
        let descent_sets: Vec<BitSet64> =
            (0..n as u32).map(|z| support::descent_set(block, z)).collect();
        let mut edges = Vec::new();

        for y in 0..n as u32 {
            let ds_y = descent_sets[y as usize];
            for &(x, mu) in store.mu_row(y) {
                let ds_x = descent_sets[x as usize];
                if ds_x == ds_y {
                    continue;
                }
                let lx = block.length(x);
                let ly = block.length(y);
                if ly - lx > 1 {
                    edges.push(WGraphEdge { from: x, to: y, weight: mu });
                } else {
                    if !ds_y.is_subset(&ds_x) {
                        edges.push(WGraphEdge { from: x, to: y, weight: mu });
                    }
                    if !ds_x.is_subset(&ds_y) {
                        edges.push(WGraphEdge { from: y, to: x, weight: mu });
                    }
                }
            }
        }

        WGraph { descent_sets, edges }
    }

    pub fn descent_set(&self, z: u32) -> BitSet64 {
        self.descent_sets[z as usize]
    }

    pub fn edges(&self) -> &[WGraphEdge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.descent_sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_block::{build_block, TableDualInvolutionMap};
    use klv_kgb::{fixtures, Kgb};

    #[test]
    fn type_i_wgraph_has_single_edge() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        let map = TableDualInvolutionMap::new(vec![
            (real.involution(0), dual.involution(0)),
            (real.involution(2), dual.involution(1)),
        ]);
        let block = build_block(&real, &dual, &map).unwrap();

        let mut store = KlStore::new(block.size());
        crate::recursion::fill(&mut store, &block, (block.size() - 1) as u32).unwrap();

        let wgraph = WGraph::build(&block, &store);
        // z0 and z1 share a descent set (both ImaginaryTypeI at s=0), so no edge between them.
        // z2's descent set differs from both, and mu(z0,z2) = mu(z1,z2) = 1 with length
        // difference 1, giving one edge each way that isn't excluded by the subset rule.
        assert!(wgraph.edges().len() >= 2);
        assert!(wgraph
            .edges()
            .iter()
            .any(|e| e.from == 0 && e.to == 2 && e.weight == 1));
    }
}
