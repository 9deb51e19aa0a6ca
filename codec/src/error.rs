/// Errors raised while reading or writing the binary dump files (§6.2-6.4).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad magic number: expected {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("unknown descent-kind byte {0}")]
    BadDescentByte(u8),

    #[error("coefficient width {width} bytes cannot hold a {bits}-bit value")]
    CoeffTooWide { width: u8, bits: u32 },
}
