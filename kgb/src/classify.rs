use crate::status::Status;
use crate::view::Kgb;

/// One of the eight ways a simple generator can act on a block element `z = (x, y)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DescentKind {
    ComplexAscent = 0,
    ComplexDescent = 1,
    ImaginaryTypeI = 2,
    ImaginaryTypeII = 3,
    ImaginaryCompact = 4,
    RealTypeI = 5,
    RealTypeII = 6,
    RealNonparity = 7,
}

impl DescentKind {
    /// ComplexDescent, ImaginaryCompact, RealTypeI, RealTypeII.
    pub fn is_descent(self) -> bool {
        matches!(
            self,
            DescentKind::ComplexDescent
                | DescentKind::ImaginaryCompact
                | DescentKind::RealTypeI
                | DescentKind::RealTypeII
        )
    }

    /// `is_descent`, excluding ImaginaryCompact.
    pub fn is_strict_descent(self) -> bool {
        self.is_descent() && !matches!(self, DescentKind::ImaginaryCompact)
    }

    /// The 1-byte encoding used by the block-file dump format (§6.2).
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            0 => DescentKind::ComplexAscent,
            1 => DescentKind::ComplexDescent,
            2 => DescentKind::ImaginaryTypeI,
            3 => DescentKind::ImaginaryTypeII,
            4 => DescentKind::ImaginaryCompact,
            5 => DescentKind::RealTypeI,
            6 => DescentKind::RealTypeII,
            7 => DescentKind::RealNonparity,
            _ => return None,
        })
    }
}

/// Classifies the action of generator `s` on block element `(x, y)`, given the real-side view
/// `k` (for `x`) and the dual-side view `k_dual` (for `y`). Pure function of the two statuses and,
/// where needed, a cross action; only the eight combinations in the table below occur.
pub fn classify(k: &dyn Kgb, k_dual: &dyn Kgb, s: usize, x: u32, y: u32) -> DescentKind {
    match (k.status(s, x), k_dual.status(s, y)) {
        (Status::Complex, Status::Complex) => {
            if k.is_descent(s, x) {
                DescentKind::ComplexDescent
            } else {
                DescentKind::ComplexAscent
            }
        }
        (Status::ImaginaryNoncompact, Status::Real) => {
            if k.cross(s, x) != x {
                DescentKind::ImaginaryTypeI
            } else {
                DescentKind::ImaginaryTypeII
            }
        }
        (Status::Real, Status::ImaginaryNoncompact) => {
            if k_dual.cross(s, y) != y {
                DescentKind::RealTypeII
            } else {
                DescentKind::RealTypeI
            }
        }
        (Status::Real, Status::Real) => DescentKind::RealNonparity,
        (Status::ImaginaryCompact, Status::ImaginaryCompact) => DescentKind::ImaginaryCompact,
        (sx, sy) => unreachable!(
            "impossible KGB status pairing for a compatible block element: ({sx:?}, {sy:?})"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descent_predicates() {
        assert!(DescentKind::ComplexDescent.is_descent());
        assert!(DescentKind::ImaginaryCompact.is_descent());
        assert!(!DescentKind::ImaginaryCompact.is_strict_descent());
        assert!(DescentKind::RealTypeI.is_strict_descent());
        assert!(!DescentKind::ComplexAscent.is_descent());
        assert!(!DescentKind::ImaginaryTypeII.is_descent());
    }

    #[test]
    fn byte_round_trip() {
        for b in 0..8u8 {
            let kind = DescentKind::from_byte(b).unwrap();
            assert_eq!(kind.to_byte(), b);
        }
        assert!(DescentKind::from_byte(8).is_none());
    }
}
