//! KL row storage: the polynomial store plus, per `y`, the primitive row and the sparse mu-row.

use klv_poly::{Coeff, PolyIndex, PolyStore, D_ONE, D_ZERO};

use crate::support::prim_index;
use klv_block::Block;

/// The primitive-`x` row for one `y`: `P_{x,y}` for every `x` primitive w.r.t. `y` and of smaller
/// length, keyed by [`prim_index`].
#[derive(Clone, Debug, Default)]
pub struct KlRow {
    entries: Vec<PolyIndex>,
}

impl KlRow {
    pub fn with_len(len: usize) -> Self {
        KlRow {
            entries: vec![D_ZERO; len],
        }
    }

    pub fn from_entries(entries: Vec<PolyIndex>) -> Self {
        KlRow { entries }
    }

    pub fn get(&self, ordinal: usize) -> PolyIndex {
        self.entries[ordinal]
    }

    pub fn set(&mut self, ordinal: usize, idx: PolyIndex) {
        self.entries[ordinal] = idx;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All KL data computed so far: the hash-consed polynomial store, one [`KlRow`] per filled `y`,
/// and the sparse mu-row per filled `y`.
#[derive(Clone, Debug)]
pub struct KlStore {
    polys: PolyStore,
    rows: Vec<Option<KlRow>>,
    mu_rows: Vec<Vec<(u32, Coeff)>>,
    filled_upto: Option<u32>,
}

impl KlStore {
    pub fn new(block_size: usize) -> Self {
        KlStore {
            polys: PolyStore::new(),
            rows: vec![None; block_size],
            mu_rows: vec![Vec::new(); block_size],
            filled_upto: None,
        }
    }

    pub fn polys(&self) -> &PolyStore {
        &self.polys
    }

    pub fn polys_mut(&mut self) -> &mut PolyStore {
        &mut self.polys
    }

    pub fn is_filled(&self, y: u32) -> bool {
        self.rows[y as usize].is_some()
    }

    pub fn filled_upto(&self) -> Option<u32> {
        self.filled_upto
    }

    pub(crate) fn set_filled_upto(&mut self, y: u32) {
        self.filled_upto = Some(y);
    }

    pub fn row(&self, y: u32) -> Option<&KlRow> {
        self.rows[y as usize].as_ref()
    }

    pub(crate) fn install_row(&mut self, y: u32, row: KlRow, mu_row: Vec<(u32, Coeff)>) {
        self.rows[y as usize] = Some(row);
        self.mu_rows[y as usize] = mu_row;
    }

    pub fn mu_row(&self, y: u32) -> &[(u32, Coeff)] {
        &self.mu_rows[y as usize]
    }

    pub fn mu(&self, x: u32, y: u32) -> Coeff {
        self.mu_rows[y as usize]
            .iter()
            .find(|&&(z, _)| z == x)
            .map(|&(_, c)| c)
            .unwrap_or(0)
    }

    /// The KL polynomial index for `(x, y)`. Requires the row at `y` to already be filled; returns
    /// `D_ZERO` for `x` of length `>= length(y)` other than `x == y`, and `D_ONE` for `x == y`.
    pub fn kl_index(&self, block: &Block, x: u32, y: u32) -> PolyIndex {
        if x == y {
            return D_ONE;
        }
        if block.length(x) >= block.length(y) {
            return D_ZERO;
        }
        let ds = crate::support::descent_set(block, y);
        if !crate::support::is_primitive(block, x, ds) {
            // Non-primitive x: raise to a primitive representative via primitivization before
            // indexing the row (callers computing P_{x,y} are expected to have already done
            // this; kl_index accepts a non-primitive x as a convenience for external callers).
            return match crate::support::primitivize(block, x, y) {
                crate::support::Primitivized::Equal => D_ONE,
                crate::support::Primitivized::Zero => D_ZERO,
                crate::support::Primitivized::Extremal(px) | crate::support::Primitivized::NonExtremal(px) => {
                    self.kl_index(block, px, y)
                }
            };
        }
        let row = self.rows[y as usize]
            .as_ref()
            .expect("row must be filled before indexing");
        row.get(prim_index(block, x, ds))
    }
}
