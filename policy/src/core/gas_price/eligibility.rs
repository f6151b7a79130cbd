use std::sync::Arc;

use gasprice_common::{
    block::Block,
    crypto::{Address, Hash},
    time::{get_start_of_utc_day_in_seconds, TimestampSeconds},
    transaction::Transaction,
};
use log::{debug, trace, warn};

use crate::{
    config::GasPriceConfig,
    core::{
        clock::{Clock, SystemClock},
        error::{BlockchainError, EligibilityError},
        storage::ChainReader,
    },
};

// Check if a past transaction is counted as a fixed price transaction for `to`
//
// Blocks don't record which transactions paid the fixed price, so any
// transaction to the destination using at most `gas_ceiling` gas is counted.
// This is an approximation: a transaction with a low gas usage that paid the
// market price is a false positive and consumes quota.
// TODO: count only transactions flagged as fixed price once blocks store the flag
pub fn is_fixed_price_candidate(tx: &Transaction, to: &Address, gas_ceiling: u64) -> bool {
    tx.get_gas() <= gas_ceiling && tx.get_to() == Some(to)
}

// Count the fixed price candidates of a block for the destination
fn count_fixed_price_candidates(block: &Block, to: &Address, gas_ceiling: u64) -> u64 {
    block
        .get_transactions()
        .iter()
        .filter(|tx| is_fixed_price_candidate(tx, to, gas_ceiling))
        .count() as u64
}

// Decides if a transaction is eligible to the fixed gas price
//
// A destination receives at most `daily_limit_per_destination` fixed price
// transactions per UTC day. The history is recomputed from the chain on
// every call, nothing is cached or written.
pub struct EligibilityEngine<'a, S: ChainReader + ?Sized> {
    config: GasPriceConfig,
    storage: &'a S,
    clock: Arc<dyn Clock>,
}

impl<'a, S: ChainReader + ?Sized> EligibilityEngine<'a, S> {
    pub fn new(config: GasPriceConfig, storage: &'a S, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            storage,
            clock,
        }
    }

    // Engine reading the real wall clock
    pub fn with_system_clock(config: GasPriceConfig, storage: &'a S) -> Self {
        Self::new(config, storage, Arc::new(SystemClock))
    }

    pub fn get_config(&self) -> &GasPriceConfig {
        &self.config
    }

    // Start of the current quota window: midnight UTC today
    pub fn get_window_start(&self) -> TimestampSeconds {
        get_start_of_utc_day_in_seconds(&self.clock.now())
    }

    // Returns true if a transaction to `to` using `gas_used` gas pays the fixed price
    //
    // Failures never reach the caller, they are resolved with the fallback
    // decision of the error
    pub async fn evaluate(&self, to: Option<&Address>, gas_used: u64) -> bool {
        if gas_used > self.config.gas_ceiling {
            if log::log_enabled!(log::Level::Trace) {
                trace!(
                    "Gas used {} is above the fixed price gas ceiling {}",
                    gas_used,
                    self.config.gas_ceiling
                );
            }
            return false;
        }

        // Contract creation has no destination to account the quota on
        let Some(to) = to else {
            trace!("Contract creation is not eligible to the fixed price");
            return false;
        };

        let window_start = self.get_window_start();
        match self.count_fixed_price_transactions(to, window_start).await {
            Ok(count) => {
                let eligible = count <= self.config.daily_limit_per_destination;
                if log::log_enabled!(log::Level::Debug) {
                    debug!(
                        "Destination {} has {} fixed price transactions since {} (limit {}), eligible: {}",
                        to, count, window_start, self.config.daily_limit_per_destination, eligible
                    );
                }
                eligible
            }
            Err(e) => {
                let decision = e.fallback_decision();
                if log::log_enabled!(log::Level::Warn) {
                    match &e {
                        EligibilityError::ChainUnavailable(_) => warn!(
                            "{}, gas considered as below the limit to apply the fixed price",
                            e
                        ),
                        EligibilityError::BlockUnreadable { .. } => warn!(
                            "{}, gas considered as over the limit to apply the fixed price",
                            e
                        ),
                    }
                }
                decision
            }
        }
    }

    // Walk the chain backward from the top block and count the fixed price
    // candidates sent to `to` in blocks not older than `window_start`
    //
    // The walk stops at the first block older than the window, at genesis,
    // or as soon as the count is above the daily limit
    pub async fn count_fixed_price_transactions(
        &self,
        to: &Address,
        window_start: TimestampSeconds,
    ) -> Result<u64, EligibilityError> {
        let mut hash = self
            .storage
            .get_top_block_hash()
            .await
            .map_err(EligibilityError::ChainUnavailable)?;
        if hash.is_zero() {
            return Err(EligibilityError::ChainUnavailable(BlockchainError::NoTopBlock));
        }

        let mut height = self
            .storage
            .get_height_for_block_hash(&hash)
            .await
            .map_err(EligibilityError::ChainUnavailable)?;

        let limit = self.config.daily_limit_per_destination;
        let mut count: u64 = 0;
        loop {
            let block = self.storage.get_block(&hash, height).await.map_err(|source| {
                EligibilityError::BlockUnreadable {
                    hash: hash.clone(),
                    height,
                    source,
                }
            })?;

            if block.get_timestamp() < window_start {
                if log::log_enabled!(log::Level::Trace) {
                    trace!(
                        "Block {} at height {} is older than {}, stopping",
                        hash,
                        height,
                        window_start
                    );
                }
                break;
            }

            let found = count_fixed_price_candidates(&block, to, self.config.gas_ceiling);
            count = count.saturating_add(found);
            if log::log_enabled!(log::Level::Trace) {
                trace!(
                    "Block {} at height {}: {} fixed price candidates, total {}",
                    hash,
                    height,
                    found,
                    count
                );
            }

            if count > limit {
                break;
            }

            let parent: Hash = block.get_parent().clone();
            if parent.is_zero() {
                break;
            }

            height = height.checked_sub(1).ok_or_else(|| EligibilityError::BlockUnreadable {
                hash: parent.clone(),
                height,
                source: BlockchainError::CorruptedData(format!(
                    "block {} at height 0 has parent {}",
                    hash, parent
                )),
            })?;
            hash = parent;
        }

        Ok(count)
    }
}
