//! A dense polynomial over non-negative machine integers, lowest-degree coefficient first.
//!
//! Coefficients are fixed-width (`u64`) and never negative; every arithmetic step that could
//! drive one below zero or past the width returns a [`PolyError`] instead of wrapping.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::PolyError;

pub type Coeff = u64;

/// Evaluation point used to hash polynomials for the hash-consing store. Chosen, as in the
/// original implementation, so that low-degree polynomials spread well: `2^21 + 2^13 + 2^8 + 2^5 + 1`.
const HASH_EVAL_POINT: u64 = 2_105_633;

/// `coeffs[i]` is the coefficient of `q^i`. The vector never carries a trailing zero; the zero
/// polynomial is the empty vector.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<Coeff>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial { coeffs: Vec::new() }
    }

    pub fn one() -> Self {
        Polynomial { coeffs: vec![1] }
    }

    pub fn constant(c: Coeff) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// Builds a polynomial from coefficients, trimming any trailing zeros.
    pub fn from_coeffs(mut coeffs: Vec<Coeff>) -> Self {
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Polynomial { coeffs }
    }

    pub fn coeffs(&self) -> &[Coeff] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Leading (highest-degree) coefficient, or 0 for the zero polynomial.
    pub fn lead(&self) -> Coeff {
        self.coeffs.last().copied().unwrap_or(0)
    }

    pub fn eval(&self, x: u64) -> Option<u64> {
        self.coeffs
            .iter()
            .rev()
            .try_fold(0u64, |acc, &c| acc.checked_mul(x)?.checked_add(c))
    }

    /// `self + other`, extending length on demand.
    pub fn add(&self, other: &Polynomial) -> Result<Polynomial, PolyError> {
        self.add_shift(other, 0)
    }

    /// `self + other * q^d`, extending length on demand.
    pub fn add_shift(&self, other: &Polynomial, d: usize) -> Result<Polynomial, PolyError> {
        if other.is_zero() {
            return Ok(self.clone());
        }
        let n = self.coeffs.len().max(other.coeffs.len() + d);
        let mut out = vec![0 as Coeff; n];
        out[..self.coeffs.len()].copy_from_slice(&self.coeffs);
        for (i, &c) in other.coeffs.iter().enumerate() {
            out[i + d] = out[i + d].checked_add(c).ok_or(PolyError::NumericOverflow)?;
        }
        Ok(Self::from_coeffs(out))
    }

    /// `self + mu * other * q^d`, extending length on demand. Overflow is fatal.
    pub fn add_shift_scale(
        &self,
        other: &Polynomial,
        d: usize,
        mu: Coeff,
    ) -> Result<Polynomial, PolyError> {
        if mu == 0 || other.is_zero() {
            return Ok(self.clone());
        }
        let n = self.coeffs.len().max(other.coeffs.len() + d);
        let mut out = vec![0 as Coeff; n];
        out[..self.coeffs.len()].copy_from_slice(&self.coeffs);
        for (i, &c) in other.coeffs.iter().enumerate() {
            let term = c.checked_mul(mu).ok_or(PolyError::NumericOverflow)?;
            out[i + d] = out[i + d]
                .checked_add(term)
                .ok_or(PolyError::NumericOverflow)?;
        }
        Ok(Self::from_coeffs(out))
    }

    /// `self - other * q^d`. Fails with [`PolyError::NumericUnderflow`] if any coefficient would
    /// go negative.
    pub fn sub_shift(&self, other: &Polynomial, d: usize) -> Result<Polynomial, PolyError> {
        if other.is_zero() {
            return Ok(self.clone());
        }
        let n = self.coeffs.len().max(other.coeffs.len() + d);
        let mut out = vec![0 as Coeff; n];
        out[..self.coeffs.len()].copy_from_slice(&self.coeffs);
        for (i, &c) in other.coeffs.iter().enumerate() {
            out[i + d] = out[i + d]
                .checked_sub(c)
                .ok_or(PolyError::NumericUnderflow)?;
        }
        Ok(Self::from_coeffs(out))
    }

    /// Exact division by a positive scalar. Fails with [`PolyError::NumericNondivisible`] if any
    /// coefficient is not a multiple of `c`.
    pub fn divide(&self, c: Coeff) -> Result<Polynomial, PolyError> {
        debug_assert!(c > 0);
        let mut out = Vec::with_capacity(self.coeffs.len());
        for &coeff in &self.coeffs {
            if coeff % c != 0 {
                return Err(PolyError::NumericNondivisible);
            }
            out.push(coeff / c);
        }
        Ok(Self::from_coeffs(out))
    }

    /// Divides `self` by `q + 1`, given that the quotient has degree at most
    /// `(len_bound - 1) / 2`. Implemented as the standard synthetic-division recurrence against
    /// the root `-1`; fails with [`PolyError::NumericUnderflow`] if the remainder is non-zero.
    pub fn quotient_by_plus_one(&self, len_bound: usize) -> Result<Polynomial, PolyError> {
        if self.is_zero() {
            return Ok(Polynomial::zero());
        }
        let p = &self.coeffs;
        let n = p.len() - 1; // degree of self
        if n == 0 {
            // A nonzero constant is never divisible by q + 1.
            return Err(PolyError::NumericUnderflow);
        }
        let mut q = vec![0 as Coeff; n]; // degree n - 1
        q[n - 1] = p[n];
        for k in (1..n).rev() {
            q[k - 1] = p[k].checked_sub(q[k]).ok_or(PolyError::NumericUnderflow)?;
        }
        if q[0] != p[0] {
            return Err(PolyError::NumericUnderflow);
        }
        let quotient = Self::from_coeffs(q);
        debug_assert!(quotient.degree().map_or(true, |d| d <= (len_bound.saturating_sub(1)) / 2));
        Ok(quotient)
    }
}

impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut acc: u64 = 0;
        for &c in self.coeffs.iter().rev() {
            acc = acc.wrapping_mul(HASH_EVAL_POINT).wrapping_add(c);
        }
        acc.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        let p = Polynomial::from_coeffs(vec![1, 2, 0, 0]);
        assert_eq!(p.coeffs(), &[1, 2]);
        assert_eq!(p.degree(), Some(1));
    }

    #[test]
    fn zero_poly_is_empty() {
        let z = Polynomial::zero();
        assert!(z.is_zero());
        assert_eq!(z.degree(), None);
        assert_eq!(z.lead(), 0);
    }

    #[test]
    fn add_and_shift() {
        let p = Polynomial::from_coeffs(vec![1, 1]); // 1 + q
        let one = Polynomial::one();
        let sum = p.add_shift(&one, 1).unwrap(); // (1 + q) + 1*q = 1 + 2q
        assert_eq!(sum.coeffs(), &[1, 2]);
    }

    #[test]
    fn sub_shift_underflows() {
        let p = Polynomial::one();
        let q = Polynomial::from_coeffs(vec![2]);
        assert_eq!(p.sub_shift(&q, 0), Err(PolyError::NumericUnderflow));
    }

    #[test]
    fn divide_exact_and_inexact() {
        let p = Polynomial::from_coeffs(vec![4, 6]);
        assert_eq!(p.divide(2).unwrap().coeffs(), &[2, 3]);
        assert_eq!(p.divide(4), Err(PolyError::NumericNondivisible));
    }

    #[test]
    fn quotient_by_plus_one_matches_factorization() {
        // (q+1) * (q+1) = q^2 + 2q + 1
        let p = Polynomial::from_coeffs(vec![1, 2, 1]);
        let quotient = p.quotient_by_plus_one(3).unwrap();
        assert_eq!(quotient.coeffs(), &[1, 1]);
    }

    #[test]
    fn quotient_by_plus_one_rejects_nonzero_remainder() {
        let p = Polynomial::from_coeffs(vec![1, 1, 1]); // q^2 + q + 1, not divisible by q+1
        assert_eq!(
            p.quotient_by_plus_one(3),
            Err(PolyError::NumericUnderflow)
        );
    }

    #[test]
    fn equal_polynomials_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        let a = Polynomial::from_coeffs(vec![1, 2, 3]);
        let b = Polynomial::from_coeffs(vec![1, 2, 3]);
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }
}
