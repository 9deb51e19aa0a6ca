use klv_kgb::Involution;

/// Maps a real-side involution to the dual-side involution it pairs with in a block.
///
/// Computing this map for a general root datum requires the same Weyl-group and root-datum
/// machinery that KGB construction does, and is likewise treated as an external collaborator: the
/// builder takes one of these rather than deriving it.
pub trait DualInvolutionMap {
    fn dual_of(&self, real: &Involution) -> Involution;
}

impl<F: Fn(&Involution) -> Involution> DualInvolutionMap for F {
    fn dual_of(&self, real: &Involution) -> Involution {
        self(real)
    }
}

/// A [`DualInvolutionMap`] built from an explicit, precomputed table, keyed by real involution id.
///
/// Convenient for tests and for small blocks where the pairing has already been tabulated
/// elsewhere.
#[derive(Clone, Debug, Default)]
pub struct TableDualInvolutionMap {
    table: Vec<(Involution, Involution)>,
}

impl TableDualInvolutionMap {
    pub fn new(table: Vec<(Involution, Involution)>) -> Self {
        TableDualInvolutionMap { table }
    }

    /// The same pairing read in the opposite direction, for building the dual block (real and
    /// dual sides swapped).
    pub fn reversed(&self) -> TableDualInvolutionMap {
        TableDualInvolutionMap {
            table: self.table.iter().map(|(r, d)| (d.clone(), r.clone())).collect(),
        }
    }
}

impl DualInvolutionMap for TableDualInvolutionMap {
    fn dual_of(&self, real: &Involution) -> Involution {
        self.table
            .iter()
            .find(|(r, _)| r == real)
            .map(|(_, d)| d.clone())
            .unwrap_or_else(|| panic!("no dual involution tabulated for {real:?}"))
    }
}
