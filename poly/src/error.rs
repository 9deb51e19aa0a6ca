use thiserror::Error;

/// Errors raised by polynomial-store arithmetic. Every one of these indicates that the recursion
/// that drove the call made a false assumption about the shape of the coefficients involved.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum PolyError {
    #[error("coefficient subtraction would go negative")]
    NumericUnderflow,
    #[error("coefficient arithmetic overflowed its fixed width")]
    NumericOverflow,
    #[error("exact division encountered a non-divisible coefficient")]
    NumericNondivisible,
}
