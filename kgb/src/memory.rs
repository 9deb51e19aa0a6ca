use std::ops::Range;

use crate::involution::Involution;
use crate::status::Status;
use crate::view::Kgb;

/// Per-element, per-generator data backing an [`InMemoryKgb`].
#[derive(Clone, Debug)]
pub struct ElementData {
    pub length: u32,
    pub involution: Involution,
    pub cartan_class: u32,
    /// One entry per generator: `(status, cross, cayley_or_undef, is_descent)`.
    pub per_generator: Vec<(Status, u32, u32, bool)>,
}

/// A fully tabulated, in-memory [`Kgb`] view, built from explicit per-element data.
///
/// This is a test/demonstration fixture, not a reimplementation of root-datum or KGB
/// construction (both are external collaborators per the system's scope): every field is
/// supplied directly by the caller rather than derived from a root system.
#[derive(Clone, Debug)]
pub struct InMemoryKgb {
    rank: usize,
    elements: Vec<ElementData>,
}

impl InMemoryKgb {
    pub fn new(rank: usize, elements: Vec<ElementData>) -> Self {
        InMemoryKgb { rank, elements }
    }

    fn inverse_cayley_preimages(&self, s: usize, x: u32) -> (u32, u32) {
        let mut preimages = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.per_generator[s].2 == x)
            .map(|(i, _)| i as u32);
        let first = preimages.next().unwrap_or(crate::view::UNDEF_KGB);
        let second = preimages.next().unwrap_or(crate::view::UNDEF_KGB);
        (first, second)
    }
}

impl Kgb for InMemoryKgb {
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn length(&self, x: u32) -> u32 {
        self.elements[x as usize].length
    }

    fn status(&self, s: usize, x: u32) -> Status {
        self.elements[x as usize].per_generator[s].0
    }

    fn cross(&self, s: usize, x: u32) -> u32 {
        self.elements[x as usize].per_generator[s].1
    }

    fn cayley(&self, s: usize, x: u32) -> u32 {
        match self.status(s, x) {
            Status::ImaginaryNoncompact => self.elements[x as usize].per_generator[s].2,
            _ => crate::view::UNDEF_KGB,
        }
    }

    fn inverse_cayley(&self, s: usize, x: u32) -> (u32, u32) {
        match self.status(s, x) {
            Status::Real => self.inverse_cayley_preimages(s, x),
            _ => (crate::view::UNDEF_KGB, crate::view::UNDEF_KGB),
        }
    }

    fn involution(&self, x: u32) -> Involution {
        self.elements[x as usize].involution.clone()
    }

    fn cartan_class(&self, x: u32) -> u32 {
        self.elements[x as usize].cartan_class
    }

    fn tau_packet(&self, inv: &Involution) -> Range<u32> {
        let first = self
            .elements
            .iter()
            .position(|e| &e.involution == inv)
            .map(|i| i as u32)
            .unwrap_or(self.elements.len() as u32);
        let count = self.elements.iter().filter(|e| &e.involution == inv).count() as u32;
        first..(first + count)
    }

    fn is_descent(&self, s: usize, x: u32) -> bool {
        self.elements[x as usize].per_generator[s].3
    }

    fn nth_involution(&self, i: usize) -> Involution {
        let mut seen = Vec::new();
        for e in &self.elements {
            if !seen.contains(&e.involution) {
                seen.push(e.involution.clone());
            }
        }
        seen[i].clone()
    }

    fn nr_involutions(&self) -> usize {
        let mut seen: Vec<Involution> = Vec::new();
        for e in &self.elements {
            if !seen.contains(&e.involution) {
                seen.push(e.involution.clone());
            }
        }
        seen.len()
    }

    fn packet_size(&self, inv: &Involution) -> usize {
        self.tau_packet(inv).len()
    }
}
