mod memory;

pub use self::memory::MemoryStorage;

use crate::core::error::BlockchainError;
use async_trait::async_trait;
use gasprice_common::{
    block::{Block, BlockHeight},
    crypto::Hash,
};
use std::sync::Arc;

// Read-only view over the chain database used by the fee policy
//
// Implementations are synchronized by their owner, the policy never
// writes through this trait
#[async_trait]
pub trait ChainReader: Send + Sync {
    // Hash of the canonical top block
    // Returns the zero hash when no block was stored yet
    async fn get_top_block_hash(&self) -> Result<Hash, BlockchainError>;

    // Height of the block with the given hash
    async fn get_height_for_block_hash(&self, hash: &Hash) -> Result<BlockHeight, BlockchainError>;

    // Load a block with its transactions
    async fn get_block(&self, hash: &Hash, height: BlockHeight) -> Result<Arc<Block>, BlockchainError>;
}

#[async_trait]
impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    async fn get_top_block_hash(&self) -> Result<Hash, BlockchainError> {
        (**self).get_top_block_hash().await
    }

    async fn get_height_for_block_hash(&self, hash: &Hash) -> Result<BlockHeight, BlockchainError> {
        (**self).get_height_for_block_hash(hash).await
    }

    async fn get_block(&self, hash: &Hash, height: BlockHeight) -> Result<Arc<Block>, BlockchainError> {
        (**self).get_block(hash, height).await
    }
}
