#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod error;
pub mod polynomial;
pub mod store;

pub use error::PolyError;
pub use polynomial::{Coeff, Polynomial};
pub use store::{PolyIndex, PolyStore, D_ONE, D_ZERO};
