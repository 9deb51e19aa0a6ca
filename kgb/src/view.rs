use std::ops::Range;

use crate::involution::Involution;
use crate::status::Status;

/// Sentinel KGB index marking an undefined cross/Cayley target.
pub const UNDEF_KGB: u32 = u32::MAX;

/// A read-only, functional view of one side (real or dual) of a block's parameter set.
///
/// Implementations are expected to be cheap to query repeatedly; the block builder and the KL
/// engine both hold two of these (one real-side, one dual-side) for the lifetime of a block.
pub trait Kgb {
    fn size(&self) -> usize;
    fn rank(&self) -> usize;

    fn length(&self, x: u32) -> u32;

    fn status(&self, s: usize, x: u32) -> Status;
    fn cross(&self, s: usize, x: u32) -> u32;

    /// Defined iff `status(s, x) == ImaginaryNoncompact`; returns [`UNDEF_KGB`] otherwise.
    fn cayley(&self, s: usize, x: u32) -> u32;

    /// Defined iff `status(s, x) == Real`; the second component is [`UNDEF_KGB`] unless `x` is a
    /// RealTypeI descent at `s` (two preimages).
    fn inverse_cayley(&self, s: usize, x: u32) -> (u32, u32);

    fn involution(&self, x: u32) -> Involution;
    fn cartan_class(&self, x: u32) -> u32;

    /// The contiguous range of indices sharing involution `inv`.
    fn tau_packet(&self, inv: &Involution) -> Range<u32>;

    /// By convention: always true on `Real`, always false on `Imaginary{Compact,Noncompact}`, and
    /// for `Complex` true iff the cross action at `s` strictly decreases length.
    fn is_descent(&self, s: usize, x: u32) -> bool;

    fn is_ascent(&self, s: usize, x: u32) -> bool {
        !self.is_descent(s, x)
    }

    fn nth_involution(&self, i: usize) -> Involution;
    fn nr_involutions(&self) -> usize;
    fn packet_size(&self, inv: &Involution) -> usize;
}
