//! KL support, the direct/new recursion KL engine, the mu-coefficient store, the W-graph
//! extractor and the Bruhat order over a [`klv_block::Block`].

pub mod bruhat;
pub mod error;
pub mod recursion;
pub mod row;
pub mod support;
pub mod wgraph;

pub use error::KlError;
pub use recursion::fill;
pub use row::{KlRow, KlStore};
pub use support::{
    descent_set, extremal_row, is_extremal, is_primitive, prim_index, primitive_row, primitivize,
    self_index, Primitivized,
};
pub use wgraph::{WGraph, WGraphEdge};
pub use bruhat::BruhatOrder;
