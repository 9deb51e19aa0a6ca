#![deny(missing_debug_implementations)]

pub mod classify;
pub mod involution;
pub mod memory;
pub mod status;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;

pub use classify::{classify, DescentKind};
pub use involution::Involution;
pub use memory::{ElementData, InMemoryKgb};
pub use status::Status;
pub use view::{Kgb, UNDEF_KGB};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toy_rank1_type_i_classifies_as_expected() {
        let (real, dual) = fixtures::toy_rank1_type_i_pair();
        // z = (x0, y0): x0 ImaginaryNoncompact with cross(0, x0) = 1 != 0 -> ImaginaryTypeI.
        assert_eq!(classify(&real, &dual, 0, 0, 0), DescentKind::ImaginaryTypeI);
        // z = (x2, y1): x2 Real with is_descent true, y1 ImaginaryNoncompact, cross(0,y1)=1=y1 -> RealTypeI.
        assert_eq!(classify(&real, &dual, 0, 2, 1), DescentKind::RealTypeI);
    }

    #[test]
    fn toy_rank1_compact_classifies_as_imaginary_compact() {
        let (real, dual) = fixtures::toy_rank1_compact_pair();
        assert_eq!(
            classify(&real, &dual, 0, 0, 0),
            DescentKind::ImaginaryCompact
        );
    }
}
