use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use gasprice_common::{
    block::{Block, BlockHeight},
    crypto::{Hash, Hashable},
};
use log::{debug, trace};

use crate::core::{error::BlockchainError, storage::ChainReader};

// In-memory chain storage
//
// Block heights and block bodies are indexed separately so a body can be
// dropped while its height is still known, like a partially written database
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blocks: HashMap<Hash, Arc<Block>>,
    heights: HashMap<Hash, BlockHeight>,
    top_block_hash: Option<Hash>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // Store a block and make it the new top of the chain
    pub fn add_block(&mut self, block: Block) -> Hash {
        let hash = block.hash();
        if log::log_enabled!(log::Level::Debug) {
            debug!("Storing new {} with hash: {}", block, hash);
        }

        self.heights.insert(hash.clone(), block.get_height());
        self.blocks.insert(hash.clone(), Arc::new(block));
        self.top_block_hash = Some(hash.clone());
        hash
    }

    // Drop the body of a block, its height stays indexed
    pub fn delete_block_body(&mut self, hash: &Hash) -> Option<Arc<Block>> {
        if log::log_enabled!(log::Level::Debug) {
            debug!("Deleting block body {}", hash);
        }
        self.blocks.remove(hash)
    }

    // Forget the height of a block, its body stays stored
    pub fn delete_block_height(&mut self, hash: &Hash) -> Option<BlockHeight> {
        self.heights.remove(hash)
    }

    pub fn has_block_with_hash(&self, hash: &Hash) -> bool {
        self.blocks.contains_key(hash)
    }

    pub fn count_blocks(&self) -> usize {
        self.blocks.len()
    }
}

#[async_trait]
impl ChainReader for MemoryStorage {
    async fn get_top_block_hash(&self) -> Result<Hash, BlockchainError> {
        trace!("get top block hash");
        Ok(self.top_block_hash.clone().unwrap_or_else(Hash::zero))
    }

    async fn get_height_for_block_hash(&self, hash: &Hash) -> Result<BlockHeight, BlockchainError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get height for block hash {}", hash);
        }
        self.heights
            .get(hash)
            .copied()
            .ok_or_else(|| BlockchainError::BlockHeightNotFound(hash.clone()))
    }

    async fn get_block(&self, hash: &Hash, height: BlockHeight) -> Result<Arc<Block>, BlockchainError> {
        if log::log_enabled!(log::Level::Trace) {
            trace!("get block {} at height {}", hash, height);
        }
        let block = self
            .blocks
            .get(hash)
            .ok_or_else(|| BlockchainError::BlockNotFound(hash.clone()))?;

        if block.get_height() != height {
            return Err(BlockchainError::BlockHeightMismatch(
                hash.clone(),
                block.get_height(),
                height,
            ));
        }

        Ok(block.clone())
    }
}
