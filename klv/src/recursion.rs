//! The KL engine: direct recursion (§4.6.2), the non-extremal primitive extension (§4.6.3), new
//! recursion (§4.6.4), mu-sum (§4.6.5), the down-set (§4.6.6), row storage (§4.6.7) and the fill
//! driver (§4.6.8).

use klv_block::Block;
use klv_kgb::DescentKind;
use klv_poly::{Coeff, PolyIndex, Polynomial, D_ONE, D_ZERO};
use klv_util::BitSet64;

use crate::error::KlError;
use crate::row::{KlRow, KlStore};
use crate::support::{self, Primitivized};

/// The recursion §4.6.1 selects for a given `y`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    /// Direct recursion (§4.6.2), driven by the descent `s` at `y`.
    Direct(usize),
    /// New recursion (§4.6.4): every descent of `y` is RealTypeII.
    New,
}

fn select_mode(block: &Block, y: u32) -> Mode {
    for s in 0..block.rank() {
        if matches!(
            block.descent(s, y),
            DescentKind::ComplexDescent | DescentKind::RealTypeI
        ) {
            return Mode::Direct(s);
        }
    }
    Mode::New
}

/// Elements reached from `y` by a single descent of kind ComplexDescent, RealTypeI (two outputs)
/// or RealTypeII; each contributes an implicit `mu = 1` (§4.6.6).
fn down_set(block: &Block, y: u32) -> Vec<u32> {
    let mut out = Vec::new();
    for s in 0..block.rank() {
        match block.descent(s, y) {
            DescentKind::ComplexDescent => out.push(block.cross(s, y)),
            DescentKind::RealTypeI => {
                let (a, b) = block.inverse_cayley(s, y);
                out.push(a);
                out.push(b);
            }
            DescentKind::RealTypeII => {
                let (a, _) = block.inverse_cayley(s, y);
                out.push(a);
            }
            _ => {}
        }
    }
    out
}

struct RowBuilder<'a> {
    block: &'a Block,
    store: &'a mut KlStore,
    y: u32,
    ds: BitSet64,
    mode: Mode,
    prims: Vec<u32>,
    row_vals: Vec<Option<PolyIndex>>,
    mu_acc: Vec<(u32, Coeff)>,
}

impl<'a> RowBuilder<'a> {
    fn ordinal(&self, x: u32) -> usize {
        self.prims.binary_search(&x).expect("x must be primitive w.r.t. y")
    }

    fn poly(&self, idx: PolyIndex) -> Polynomial {
        self.store.polys().get(idx).clone()
    }

    /// `P_{x, z}` for an already-filled row `z` (any `y' != self.y`), normalizing `x` through
    /// primitivization first.
    fn lookup(&self, x: u32, z: u32) -> PolyIndex {
        self.store.kl_index(self.block, x, z)
    }

    /// `P_{x, self.y}`, computing and memoizing it if necessary.
    fn fetch(&mut self, x: u32) -> Result<PolyIndex, KlError> {
        match support::primitivize(self.block, x, self.y) {
            Primitivized::Equal => Ok(D_ONE),
            Primitivized::Zero => Ok(D_ZERO),
            Primitivized::Extremal(px) | Primitivized::NonExtremal(px) => {
                let ord = self.ordinal(px);
                if let Some(idx) = self.row_vals[ord] {
                    return Ok(idx);
                }
                let extremal = support::is_extremal(self.block, px, self.ds);
                let idx = if extremal {
                    self.extremal_value(px)?
                } else {
                    self.non_extremal_value(px)?
                };
                self.row_vals[ord] = Some(idx);
                self.track_mu(px, idx);
                Ok(idx)
            }
        }
    }

    /// §4.6.3: `P_{x,y} = P_{c1,y} + P_{c2,y}` for the unique ImaginaryTypeII ascent of `x` that
    /// is a descent of `y`.
    fn non_extremal_value(&mut self, x: u32) -> Result<PolyIndex, KlError> {
        let s = self
            .ds
            .iter(self.block.rank())
            .find(|&s| self.block.descent(s, x) == DescentKind::ImaginaryTypeII)
            .expect("non-extremal x must have an ImaginaryTypeII ascent coinciding with a descent of y");
        let (c1, c2) = self.block.cayley(s, x);
        let p1 = self.fetch(c1)?;
        let p2 = self.fetch(c2)?;
        let sum = self
            .poly(p1)
            .add(&self.poly(p2))
            .map_err(|e| KlError::at(x, self.y, e))?;
        Ok(self.store.polys_mut().match_poly(sum))
    }

    fn extremal_value(&mut self, x: u32) -> Result<PolyIndex, KlError> {
        match self.mode {
            Mode::Direct(s) => self.direct_value(s, x),
            Mode::New => self.new_value(x),
        }
    }

    /// §4.6.2.
    fn direct_value(&mut self, s: usize, x: u32) -> Result<PolyIndex, KlError> {
        let y = self.y;
        let sy = match self.block.descent(s, y) {
            DescentKind::ComplexDescent => self.block.cross(s, y),
            DescentKind::RealTypeI => self.block.inverse_cayley(s, y).0,
            other => unreachable!("direct recursion selected a non-direct descent: {other:?}"),
        };

        let raw = match self.block.descent(s, x) {
            DescentKind::ImaginaryCompact => {
                let p = self.poly(self.lookup(x, sy));
                p.add_shift(&p, 1)
            }
            DescentKind::ComplexDescent => {
                let sx = self.block.cross(s, x);
                let p_sx = self.poly(self.lookup(sx, sy));
                let p_x = self.poly(self.lookup(x, sy));
                p_sx.add_shift(&p_x, 1)
            }
            DescentKind::RealTypeI => {
                let (x1, x2) = self.block.inverse_cayley(s, x);
                let p1 = self.poly(self.lookup(x1, sy));
                let p2 = self.poly(self.lookup(x2, sy));
                let p_x = self.poly(self.lookup(x, sy));
                p1.add(&p2)
                    .and_then(|p12| {
                        let zero = Polynomial::zero();
                        let qp = zero.add_shift(&p_x, 1)?;
                        let q_minus_one_p = qp.sub_shift(&p_x, 0)?;
                        p12.add(&q_minus_one_p)
                    })
            }
            DescentKind::RealTypeII => {
                let (x1, _) = self.block.inverse_cayley(s, x);
                let sx = self.block.cross(s, x);
                let p1 = self.poly(self.lookup(x1, sy));
                let p_x = self.poly(self.lookup(x, sy));
                let p_sx = self.poly(self.lookup(sx, sy));
                let zero = Polynomial::zero();
                zero.add_shift(&p_x, 1)
                    .and_then(|qp| p1.add(&qp))
                    .and_then(|sum| sum.sub_shift(&p_sx, 0))
            }
            other => unreachable!("extremal x has a non-descent status at s: {other:?}"),
        }
        .map_err(|e| KlError::at(x, y, e))?;

        let correction = self.mu_correction(s, sy, x)?;
        let final_poly = raw.sub_shift(&correction, 0).map_err(|e| KlError::at(x, y, e))?;
        Ok(self.store.polys_mut().match_poly(final_poly))
    }

    /// The correction term subtracted in §4.6.2: `sum_z mu(z,sy) q^{(l(y)-l(z))/2} P_{x,z}` over
    /// `z` in the mu-row of `sy` with `s` a descent of `z`.
    fn mu_correction(&self, s: usize, sy: u32, x: u32) -> Result<Polynomial, KlError> {
        let ly = self.block.length(self.y);
        let mut acc = Polynomial::zero();
        for &(z, mu) in self.store.mu_row(sy) {
            if !self.block.descent(s, z).is_descent() {
                continue;
            }
            let lz = self.block.length(z);
            if ly < lz || (ly - lz) % 2 != 0 {
                continue;
            }
            let d = (ly - lz) / 2;
            let p_x_z = self.poly(self.lookup(x, z));
            acc = acc
                .add_shift_scale(&p_x_z, d as usize, mu)
                .map_err(|e| KlError::at(x, self.y, e))?;
        }
        Ok(acc)
    }

    /// §4.6.5: `sum_z mu(z,y) q^d P_{x,z}` over `z` already accumulated in this row's mu-list
    /// with `s` a descent of `z` and `l(z) > l(x)`.
    fn mu_sum(&mut self, x: u32, s: usize) -> Result<Polynomial, KlError> {
        let ly = self.block.length(self.y);
        let lx = self.block.length(x);
        let entries = self.mu_acc.clone();
        let mut acc = Polynomial::zero();
        for (z, mu) in entries {
            let lz = self.block.length(z);
            if lz <= lx || !self.block.descent(s, z).is_descent() {
                continue;
            }
            let d = (ly - lz + 1) / 2;
            let p_x_z = self.fetch_or_lookup(x, z)?;
            let p_x_z = self.poly(p_x_z);
            acc = acc
                .add_shift_scale(&p_x_z, d as usize, mu)
                .map_err(|e| KlError::at(x, self.y, e))?;
        }
        Ok(acc)
    }

    fn fetch_or_lookup(&mut self, x: u32, z: u32) -> Result<PolyIndex, KlError> {
        if z == self.y {
            self.fetch(x)
        } else {
            Ok(self.lookup(x, z))
        }
    }

    /// §4.6.4: new recursion for an extremal `x` (every descent of `y` is RealTypeII).
    fn new_value(&mut self, x: u32) -> Result<PolyIndex, KlError> {
        let y = self.y;
        if let Some(s) = self.nice_and_real(x) {
            let poly = match self.block.descent(s, x) {
                DescentKind::ComplexAscent => {
                    let sx = self.block.cross(s, x);
                    let p_sx = self.fetch(sx)?;
                    let p_sx = self.poly(p_sx);
                    let mu = self.mu_sum(x, s)?;
                    let zero = Polynomial::zero();
                    zero.add_shift(&p_sx, 1)
                        .and_then(|qp| mu.sub_shift(&qp, 0))
                }
                DescentKind::ImaginaryTypeII => {
                    let (x1, x2) = self.block.cayley(s, x);
                    let p1 = self.fetch(x1)?;
                    let p2 = self.fetch(x2)?;
                    let sum = self.poly(p1).add(&self.poly(p2));
                    let mu = self.mu_sum(x, s)?;
                    sum.and_then(|sum| {
                        let zero = Polynomial::zero();
                        let q_sum = zero.add_shift(&sum, 1)?;
                        let numerator = mu.add(&sum)?.sub_shift(&q_sum, 0)?;
                        numerator.divide(2)
                    })
                }
                DescentKind::ImaginaryCompact => {
                    let mu = self.mu_sum(x, s)?;
                    let len_bound = (self.block.length(y) - self.block.length(x)) as usize;
                    mu.quotient_by_plus_one(len_bound)
                }
                other => unreachable!("nice_and_real returned an unexpected x-kind: {other:?}"),
            }
            .map_err(|e| KlError::at(x, y, e))?;
            return Ok(self.store.polys_mut().match_poly(poly));
        }

        if let Some((s, _t)) = self.endgame_pair(x) {
            let sx = self.block.cross(s, x);
            let p_sx_y = self.fetch(sx)?;
            let p_sx_y = self.poly(p_sx_y);
            let x_prime = self.block.cayley(s, x).0;
            let p_xp = self.fetch(x_prime)?;
            let p_xp = self.poly(p_xp);
            let mu = self.mu_sum(x, s)?;
            let zero = Polynomial::zero();
            let poly = zero
                .add_shift(&p_xp, 1)
                .and_then(|qxp| p_xp.sub_shift(&qxp, 0))
                .and_then(|one_minus_q_xp| mu.add(&one_minus_q_xp))
                .and_then(|sum| sum.sub_shift(&p_sx_y, 0))
                .map_err(|e| KlError::at(x, y, e))?;
            return Ok(self.store.polys_mut().match_poly(poly));
        }

        Ok(D_ZERO)
    }

    /// §4.6.4 step 2: `s` is RealNonparity for `y` and one of ComplexAscent / ImaginaryTypeII /
    /// ImaginaryCompact for `x`.
    fn nice_and_real(&self, x: u32) -> Option<usize> {
        (0..self.block.rank()).find(|&s| {
            self.block.descent(s, self.y) == DescentKind::RealNonparity
                && matches!(
                    self.block.descent(s, x),
                    DescentKind::ComplexAscent
                        | DescentKind::ImaginaryTypeII
                        | DescentKind::ImaginaryCompact
                )
        })
    }

    /// §4.6.4 step 3: `s` is RealNonparity for `y` and ImaginaryTypeI for `x`; `t` is RealTypeII
    /// for `y` and ImaginaryTypeI/II for `cross(s, x)`.
    fn endgame_pair(&self, x: u32) -> Option<(usize, usize)> {
        for s in 0..self.block.rank() {
            if self.block.descent(s, self.y) != DescentKind::RealNonparity {
                continue;
            }
            if self.block.descent(s, x) != DescentKind::ImaginaryTypeI {
                continue;
            }
            let sx = self.block.cross(s, x);
            for t in 0..self.block.rank() {
                if self.block.descent(t, self.y) != DescentKind::RealTypeII {
                    continue;
                }
                if matches!(
                    self.block.descent(t, sx),
                    DescentKind::ImaginaryTypeI | DescentKind::ImaginaryTypeII
                ) {
                    return Some((s, t));
                }
            }
        }
        None
    }

    /// Appends `(x, mu)` to the running mu-list whenever the length difference is odd and the
    /// coefficient at the maximal allowed degree is non-zero (§3's general mu definition).
    fn track_mu(&mut self, x: u32, idx: PolyIndex) {
        let ly = self.block.length(self.y);
        let lx = self.block.length(x);
        if ly <= lx || (ly - lx) % 2 == 0 {
            return;
        }
        let d = ((ly - lx - 1) / 2) as usize;
        let poly = self.store.polys().get(idx);
        if let Some(&c) = poly.coeffs().get(d) {
            if c > 0 {
                self.mu_acc.push((x, c));
            }
        }
    }
}

/// Fills the KL row at `y`, assuming every `y' < y` is already filled.
fn fill_row(store: &mut KlStore, block: &Block, y: u32) -> Result<(), KlError> {
    let ds = support::descent_set(block, y);
    let prims = support::primitive_row(block, y);
    let mode = select_mode(block, y);
    let len = prims.len();

    let mut builder = RowBuilder {
        block,
        store,
        y,
        ds,
        mode,
        prims,
        row_vals: vec![None; len],
        mu_acc: Vec::new(),
    };

    for ord in (0..len).rev() {
        if builder.row_vals[ord].is_none() {
            let x = builder.prims[ord];
            builder.fetch(x)?;
        }
    }

    let mut mu_row = builder.mu_acc;
    for z in down_set(block, y) {
        if z == klv_block::UNDEF_BLOCK {
            continue;
        }
        if !mu_row.iter().any(|&(x, _)| x == z) {
            mu_row.push((z, 1));
        }
    }
    mu_row.sort_by_key(|&(x, _)| x);
    mu_row.dedup_by_key(|&mut (x, _)| x);

    let entries: Vec<PolyIndex> = builder
        .row_vals
        .into_iter()
        .map(|v| v.expect("every primitive ordinal must be filled"))
        .collect();
    let row = KlRow::from_entries(entries);

    builder.store.install_row(y, row, mu_row);
    Ok(())
}

/// Fills rows `0..=fill_limit`, rolling the store back to its pre-call state on any error
/// (§4.6.8, §5, §9: commit-or-rollback).
pub fn fill(store: &mut KlStore, block: &Block, fill_limit: u32) -> Result<(), KlError> {
    let mut tentative = store.clone();
    let mut last_len = None;
    let mut rows_in_stratum = 0usize;

    for y in 0..=fill_limit.min(block.size() as u32 - 1) {
        if tentative.is_filled(y) {
            continue;
        }
        let len = block.length(y);
        if last_len != Some(len) {
            if let Some(l) = last_len {
                log::info!(
                    "length {l}: {rows_in_stratum} rows, {} distinct polynomials so far",
                    tentative.polys().len()
                );
            }
            last_len = Some(len);
            rows_in_stratum = 0;
        }
        fill_row(&mut tentative, block, y)?;
        tentative.set_filled_upto(y);
        rows_in_stratum += 1;
        log::debug!("filled row y={y} (length {len})");
    }
    if let Some(l) = last_len {
        log::info!(
            "length {l}: {rows_in_stratum} rows, {} distinct polynomials so far",
            tentative.polys().len()
        );
    }

    *store = tentative;
    Ok(())
}
