use gasprice_common::{
    crypto::Address,
    transaction::{GasPrice, Transaction},
};
use log::debug;

use crate::{
    config::GasPriceConfig,
    core::{gas_price::EligibilityEngine, storage::ChainReader},
};

// Gas price retained for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDecision {
    pub effective_price: GasPrice,
    pub fixed_price_applied: bool,
}

// Picks between the market gas price and the fixed gas price
pub struct GasPriceSelector<'a, S: ChainReader + ?Sized> {
    engine: EligibilityEngine<'a, S>,
}

impl<'a, S: ChainReader + ?Sized> GasPriceSelector<'a, S> {
    pub fn new(engine: EligibilityEngine<'a, S>) -> Self {
        Self { engine }
    }

    pub async fn select_price(
        &self,
        to: Option<&Address>,
        gas_used: u64,
        market_price: &GasPrice,
    ) -> PriceDecision {
        if self.engine.evaluate(to, gas_used).await {
            PriceDecision {
                effective_price: self.engine.get_config().get_discounted_price(),
                fixed_price_applied: true,
            }
        } else {
            PriceDecision {
                effective_price: *market_price,
                fixed_price_applied: false,
            }
        }
    }

    // Compute the gas price of the transaction and record it as its expected gas price
    pub async fn apply_expected_gas_price(&self, tx: &mut Transaction) -> PriceDecision {
        let decision = self
            .select_price(tx.get_to(), tx.get_gas(), tx.get_gas_price())
            .await;
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "Expected gas price for {}: {} (fixed price: {})",
                tx, decision.effective_price, decision.fixed_price_applied
            );
        }
        tx.set_expected_gas_price(decision.effective_price);
        decision
    }
}

// Set the expected gas price of a transaction using the default policy
// and the system clock
pub async fn set_expected_gas_price<S: ChainReader + ?Sized>(
    storage: &S,
    tx: &mut Transaction,
) -> PriceDecision {
    let engine = EligibilityEngine::with_system_clock(GasPriceConfig::default(), storage);
    GasPriceSelector::new(engine)
        .apply_expected_gas_price(tx)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        clock::{Clock, FixedClock},
        storage::MemoryStorage,
    };
    use chrono::{TimeZone, Utc};
    use gasprice_common::{
        block::Block,
        crypto::{Hash, ADDRESS_SIZE},
    };
    use std::sync::Arc;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_select_price_uses_fixed_price_when_eligible() {
        let storage = MemoryStorage::new();
        let config = GasPriceConfig::new(3, 100_000, 10);
        let selector = GasPriceSelector::new(EligibilityEngine::new(config, &storage, clock()));
        let to = Address::new([1; ADDRESS_SIZE]);

        let decision = selector
            .select_price(Some(&to), 21_000, &GasPrice::from(50u64))
            .await;
        assert_eq!(
            decision,
            PriceDecision {
                effective_price: GasPrice::from(3u64),
                fixed_price_applied: true,
            }
        );
    }

    #[tokio::test]
    async fn test_select_price_keeps_market_price_above_ceiling() {
        let storage = MemoryStorage::new();
        let config = GasPriceConfig::new(3, 100_000, 10);
        let selector = GasPriceSelector::new(EligibilityEngine::new(config, &storage, clock()));
        let to = Address::new([1; ADDRESS_SIZE]);

        let decision = selector
            .select_price(Some(&to), 100_001, &GasPrice::from(50u64))
            .await;
        assert_eq!(decision.effective_price, GasPrice::from(50u64));
        assert!(!decision.fixed_price_applied);
    }

    #[tokio::test]
    async fn test_apply_expected_gas_price_writes_back() {
        let to = Address::new([1; ADDRESS_SIZE]);
        let mut storage = MemoryStorage::new();
        let today = Utc.with_ymd_and_hms(2024, 6, 10, 1, 0, 0).unwrap().timestamp() as u64;
        let history = (0..2)
            .map(|nonce| Arc::new(Transaction::new(nonce, Some(to), 21_000, GasPrice::from(1u64))))
            .collect();
        storage.add_block(Block::with_transactions(Hash::zero(), 0, today, history));

        // Limit of 1 already exceeded by the 2 transactions of today
        let config = GasPriceConfig::new(0, 100_000, 1);
        let selector = GasPriceSelector::new(EligibilityEngine::new(config, &storage, clock()));

        let mut tx = Transaction::new(2, Some(to), 21_000, GasPrice::from(42u64));
        let decision = selector.apply_expected_gas_price(&mut tx).await;
        assert!(!decision.fixed_price_applied);
        assert_eq!(tx.get_expected_gas_price(), Some(&GasPrice::from(42u64)));
    }

    #[tokio::test]
    async fn test_set_expected_gas_price_on_empty_chain() {
        let storage = MemoryStorage::new();
        let to = Address::new([5; ADDRESS_SIZE]);
        let mut tx = Transaction::new(0, Some(to), 21_000, GasPrice::from(42u64));

        let decision = set_expected_gas_price(&storage, &mut tx).await;
        assert!(decision.fixed_price_applied);
        assert_eq!(tx.get_expected_gas_price(), Some(&GasPrice::zero()));
    }
}
