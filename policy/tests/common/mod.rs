// Common test utilities for the gas price policy tests
//
// Builds synthetic linear chains in memory and wraps readers to observe or
// break the reads issued by the policy.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use gasprice_common::{
    block::{Block, BlockHeight},
    crypto::{Address, Hash, ADDRESS_SIZE},
    time::TimestampSeconds,
    transaction::{GasPrice, Transaction},
};
use gasprice_policy::{
    config::GasPriceConfig,
    core::{
        clock::{Clock, FixedClock},
        error::BlockchainError,
        gas_price::EligibilityEngine,
        storage::{ChainReader, MemoryStorage},
    },
};

pub const GAS_CEILING: u64 = 100_000;
pub const DAILY_LIMIT: u64 = 3;
pub const MARKET_PRICE: u64 = 1_000;

/// Install the test logger, safe to call from every test
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 2024-06-10T15:30:00Z
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 15, 30, 0).unwrap()
}

/// 2024-06-10T00:00:00Z as seconds
pub fn window_start() -> TimestampSeconds {
    Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0)
        .unwrap()
        .timestamp() as TimestampSeconds
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(now()))
}

pub fn config() -> GasPriceConfig {
    GasPriceConfig::new(0, GAS_CEILING, DAILY_LIMIT)
}

pub fn engine<S: ChainReader + ?Sized>(storage: &S) -> EligibilityEngine<'_, S> {
    EligibilityEngine::new(config(), storage, clock())
}

pub fn address(byte: u8) -> Address {
    Address::new([byte; ADDRESS_SIZE])
}

pub fn transaction(nonce: u64, to: Address, gas: u64) -> Arc<Transaction> {
    Arc::new(Transaction::new(
        nonce,
        Some(to),
        gas,
        GasPrice::from(MARKET_PRICE),
    ))
}

/// Linear chain builder, each pushed block becomes the new top
pub struct ChainBuilder {
    storage: MemoryStorage,
    top: Hash,
    next_height: BlockHeight,
    next_nonce: u64,
    hashes: Vec<Hash>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            storage: MemoryStorage::new(),
            top: Hash::zero(),
            next_height: 0,
            next_nonce: 0,
            hashes: Vec::new(),
        }
    }

    /// Push a block containing the given (destination, gas) transactions
    pub fn push(&mut self, timestamp: TimestampSeconds, txs: &[(Address, u64)]) -> Hash {
        let transactions = txs
            .iter()
            .map(|(to, gas)| {
                let tx = transaction(self.next_nonce, *to, *gas);
                self.next_nonce += 1;
                tx
            })
            .collect();

        let block = Block::with_transactions(self.top.clone(), self.next_height, timestamp, transactions);
        let hash = self.storage.add_block(block);
        self.top = hash.clone();
        self.next_height += 1;
        self.hashes.push(hash.clone());
        hash
    }

    /// Push `count` blocks with one qualifying transaction each
    pub fn push_qualifying(&mut self, count: usize, to: Address, timestamp: TimestampSeconds) {
        for _ in 0..count {
            self.push(timestamp, &[(to, GAS_CEILING)]);
        }
    }

    /// Hashes of the pushed blocks, genesis first
    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }

    pub fn storage_mut(&mut self) -> &mut MemoryStorage {
        &mut self.storage
    }

    pub fn build(self) -> MemoryStorage {
        self.storage
    }
}

/// Reader counting the blocks loaded through it
pub struct CountingReader<S> {
    inner: S,
    blocks_read: AtomicUsize,
}

impl<S> CountingReader<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            blocks_read: AtomicUsize::new(0),
        }
    }

    pub fn blocks_read(&self) -> usize {
        self.blocks_read.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: ChainReader> ChainReader for CountingReader<S> {
    async fn get_top_block_hash(&self) -> Result<Hash, BlockchainError> {
        self.inner.get_top_block_hash().await
    }

    async fn get_height_for_block_hash(&self, hash: &Hash) -> Result<BlockHeight, BlockchainError> {
        self.inner.get_height_for_block_hash(hash).await
    }

    async fn get_block(&self, hash: &Hash, height: BlockHeight) -> Result<Arc<Block>, BlockchainError> {
        self.blocks_read.fetch_add(1, Ordering::SeqCst);
        self.inner.get_block(hash, height).await
    }
}

/// Reader whose database can't even resolve its top block
pub struct BrokenHeadReader;

#[async_trait]
impl ChainReader for BrokenHeadReader {
    async fn get_top_block_hash(&self) -> Result<Hash, BlockchainError> {
        Err(BlockchainError::CorruptedData("top block pointer".to_string()))
    }

    async fn get_height_for_block_hash(&self, hash: &Hash) -> Result<BlockHeight, BlockchainError> {
        Err(BlockchainError::BlockHeightNotFound(hash.clone()))
    }

    async fn get_block(&self, hash: &Hash, _height: BlockHeight) -> Result<Arc<Block>, BlockchainError> {
        Err(BlockchainError::BlockNotFound(hash.clone()))
    }
}
