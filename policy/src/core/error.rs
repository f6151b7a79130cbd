use gasprice_common::{block::BlockHeight, crypto::Hash};
use thiserror::Error;

// Errors returned by a chain reader
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("No block found on disk")]
    NoTopBlock,

    #[error("Block {} not found in storage", _0)]
    BlockNotFound(Hash),

    #[error("Block height for {} not found", _0)]
    BlockHeightNotFound(Hash),

    #[error("Block {} was found at height {} but {} was requested", _0, _1, _2)]
    BlockHeightMismatch(Hash, BlockHeight, BlockHeight),

    #[error("Corrupted data: {}", _0)]
    CorruptedData(String),

    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

// Reasons the history of a destination could not be read
//
// Each variant carries its own fallback decision: an unavailable chain
// grants the fixed price, an unreadable block inside the window denies it
#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("Chain head is unavailable: {}", _0)]
    ChainUnavailable(BlockchainError),

    #[error("Block {} at height {} is unreadable: {}", hash, height, source)]
    BlockUnreadable {
        hash: Hash,
        height: BlockHeight,
        source: BlockchainError,
    },
}

impl EligibilityError {
    // Decision to take when the history can't be read
    pub fn fallback_decision(&self) -> bool {
        match self {
            // Empty or new chain: no history can be over the limit
            Self::ChainUnavailable(_) => true,
            // History exists but is corrupted
            Self::BlockUnreadable { .. } => false,
        }
    }
}
