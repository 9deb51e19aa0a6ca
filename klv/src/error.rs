use klv_poly::PolyError;

/// Errors raised while filling KL rows.
///
/// `NumericUnderflow`/`NumericOverflow`/`NumericNondivisible` indicate that a recursion step made
/// a false assumption about the shape of the coefficients it combined — see
/// [`klv_poly::PolyError`]. `FillOverflow` is the only one a caller should expect to hit under
/// normal operation: it means the row at `y` could not be completed within the resource bound the
/// caller supplied, and the store has already been rolled back to its state before the call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum KlError {
    #[error("polynomial arithmetic failed at (x={x}, y={y}): {source}")]
    Poly {
        x: u32,
        y: u32,
        #[source]
        source: PolyError,
    },

    #[error("filling the KL row at y={y} exceeded the requested fill limit")]
    FillOverflow { y: u32 },
}

impl KlError {
    pub(crate) fn at(x: u32, y: u32, source: PolyError) -> Self {
        KlError::Poly { x, y, source }
    }
}
