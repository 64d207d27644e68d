use satnet_common::SatId;
use thiserror::Error;

/// A broken structural invariant, as reported by [`SatNet::validate`](super::SatNet::validate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("satellite {child} is on the wrong side of {parent}")]
    OutOfOrder { parent: SatId, child: SatId },

    #[error("satellite {id} caches height {cached}, actual height is {actual}")]
    HeightMismatch {
        id: SatId,
        cached: usize,
        actual: usize,
    },

    #[error("satellite {id} has balance factor {balance}")]
    Unbalanced { id: SatId, balance: isize },

    #[error("registry reports {cached} satellites but holds {actual}")]
    LengthMismatch { cached: usize, actual: usize },
}
