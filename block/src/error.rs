/// Errors raised while assembling a block from a pair of KGB views.
///
/// Every one of these indicates that the two views passed to the builder are not a compatible
/// pair (their ranks disagree, or a stratum's real and dual packets cannot be reconciled).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BlockError {
    #[error("real-side rank {real} does not match dual-side rank {dual}")]
    RankMismatch { real: usize, dual: usize },

    #[error("dual-side packet for stratum {stratum} is empty")]
    EmptyDualPacket { stratum: usize },

    #[error(
        "generator {s} on block element {z} resolved to classify-incompatible KGB statuses"
    )]
    IncompatibleStatus { s: usize, z: u32 },
}
