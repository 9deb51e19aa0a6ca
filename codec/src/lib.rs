//! Binary dump codec for the block file, KL-matrix file and KL-polynomial-store file (§6.2-6.4).

pub mod block_file;
pub mod error;
pub mod matrix_file;
pub mod poly_file;
mod wire;

pub use block_file::{BlockDump, MAGIC, NO_GOOD_ASCENT};
pub use error::CodecError;
pub use matrix_file::MatrixDump;
pub use poly_file::PolyStoreDump;
