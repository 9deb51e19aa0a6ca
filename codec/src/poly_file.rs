//! The KL-polynomial-store file (§6.4): an 8-byte count, a 1-byte coefficient width chosen as the
//! narrowest that fits every coefficient in the store, then per polynomial a 1-byte degree and
//! `degree + 1` coefficients of that width. The zero polynomial is written as degree 0 with a
//! single zero coefficient (the format has no other way to represent "no coefficients").

use std::io::{Read, Write};

use klv_poly::PolyStore;

use crate::error::CodecError;
use crate::wire::{read_u64, read_u8, read_var_bytes, width_for, write_u64, write_u8, write_var_bytes};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolyStoreDump {
    /// `entries[i]` is the coefficient list of the `i`th polynomial, lowest degree first, always
    /// non-empty.
    pub entries: Vec<Vec<u64>>,
}

impl PolyStoreDump {
    pub fn from_store(store: &PolyStore) -> Self {
        let entries = store
            .iter()
            .map(|p| {
                if p.is_zero() {
                    vec![0u64]
                } else {
                    p.coeffs().to_vec()
                }
            })
            .collect();
        PolyStoreDump { entries }
    }

    pub fn write(&self, w: &mut impl Write) -> Result<(), CodecError> {
        write_u64(w, self.entries.len() as u64)?;
        let width = width_for(self.entries.iter().flat_map(|e| e.iter().copied()));
        write_u8(w, width)?;
        for e in &self.entries {
            write_u8(w, (e.len() - 1) as u8)?;
            for &c in e {
                write_var_bytes(w, width, c)?;
            }
        }
        Ok(())
    }

    pub fn read(r: &mut impl Read) -> Result<Self, CodecError> {
        let count = read_u64(r)?;
        let width = read_u8(r)?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let degree = read_u8(r)?;
            let mut coeffs = Vec::with_capacity(degree as usize + 1);
            for _ in 0..=degree {
                coeffs.push(read_var_bytes(r, width)?);
            }
            entries.push(coeffs);
        }
        Ok(PolyStoreDump { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_poly::Polynomial;

    #[test]
    fn round_trips_mixed_widths() {
        let mut store = PolyStore::new();
        store.match_poly(Polynomial::from_coeffs(vec![1, 300, 70_000]));
        let dump = PolyStoreDump::from_store(&store);

        let mut bytes = Vec::new();
        dump.write(&mut bytes).unwrap();
        let reloaded = PolyStoreDump::read(&mut bytes.as_slice()).unwrap();
        assert_eq!(dump, reloaded);
    }

    #[test]
    fn zero_polynomial_round_trips() {
        let store = PolyStore::new();
        let dump = PolyStoreDump::from_store(&store);
        assert_eq!(dump.entries[0], vec![0]);

        let mut bytes = Vec::new();
        dump.write(&mut bytes).unwrap();
        let reloaded = PolyStoreDump::read(&mut bytes.as_slice()).unwrap();
        assert_eq!(dump, reloaded);
    }
}
