//! Small, fully self-consistent KGB pairs used to exercise the block builder and KL engine.
//!
//! Building true KGB data for a named real form requires root-datum and Weyl-group machinery
//! that this system treats as an external collaborator (see the system overview). These fixtures
//! are hand-tabulated toy examples chosen to be internally consistent (cross is involutive,
//! Cayley and inverse-Cayley are reciprocal), not a reconstruction of any specific named real
//! form.

use crate::involution::Involution;
use crate::memory::{ElementData, InMemoryKgb};
use crate::status::Status;
use crate::view::UNDEF_KGB;

fn inv(id: u32, word: &[usize]) -> Involution {
    Involution::new(id, word.to_vec())
}

/// A rank-1 pair with a single generator, ImaginaryTypeI on the real side: `x0` and `x1` form a
/// 2-element cross orbit at the bottom stratum and share a single Cayley image `x2`; `x2` is
/// RealTypeI on the dual side, with both `x0` and `x1` as its two inverse-Cayley preimages.
/// Builds to a 3-element block: `z0=(x0,y0)`, `z1=(x1,y0)`, `z2=(x2,y1)`.
pub fn toy_rank1_type_i_pair() -> (InMemoryKgb, InMemoryKgb) {
    let e0 = inv(0, &[]);
    let e1 = inv(1, &[0]);

    let real = InMemoryKgb::new(
        1,
        vec![
            ElementData {
                length: 0,
                involution: e0.clone(),
                cartan_class: 0,
                per_generator: vec![(Status::ImaginaryNoncompact, 1, 2, false)],
            },
            ElementData {
                length: 0,
                involution: e0.clone(),
                cartan_class: 0,
                per_generator: vec![(Status::ImaginaryNoncompact, 0, 2, false)],
            },
            ElementData {
                length: 1,
                involution: e1.clone(),
                cartan_class: 1,
                per_generator: vec![(Status::Real, 2, UNDEF_KGB, true)],
            },
        ],
    );

    let dual = InMemoryKgb::new(
        1,
        vec![
            ElementData {
                length: 0,
                involution: e0,
                cartan_class: 0,
                per_generator: vec![(Status::Real, 0, UNDEF_KGB, true)],
            },
            ElementData {
                length: 1,
                involution: e1,
                cartan_class: 1,
                per_generator: vec![(Status::ImaginaryNoncompact, 1, 0, false)],
            },
        ],
    );

    (real, dual)
}

/// A rank-1 pair that is ImaginaryCompact on the real side and ImaginaryCompact on the dual side:
/// a single, isolated block element (the compact real form).
pub fn toy_rank1_compact_pair() -> (InMemoryKgb, InMemoryKgb) {
    let e0 = inv(0, &[]);
    let real = InMemoryKgb::new(
        1,
        vec![ElementData {
            length: 0,
            involution: e0.clone(),
            cartan_class: 0,
            per_generator: vec![(Status::ImaginaryCompact, 0, UNDEF_KGB, true)],
        }],
    );
    let dual = InMemoryKgb::new(
        1,
        vec![ElementData {
            length: 0,
            involution: e0,
            cartan_class: 0,
            per_generator: vec![(Status::ImaginaryCompact, 0, UNDEF_KGB, true)],
        }],
    );
    (real, dual)
}
