use crate::transaction::GasPrice;

// ===== FIXED GAS PRICE POLICY =====
//
// Transactions using at most FIXED_PRICE_GAS_LIMIT gas pay FIXED_GAS_PRICE
// instead of the market gas price, as long as their destination contract
// has not received more than FIXED_PRICE_TX_COUNT_PER_CONTRACT_LIMIT such
// transactions since the start of the current UTC day.

// Gas price applied to eligible transactions
pub const FIXED_GAS_PRICE: u64 = 0;
// Max gas a transaction may use to be eligible for the fixed price
pub const FIXED_PRICE_GAS_LIMIT: u64 = 100_000;
// Allowed fixed price transactions per destination contract per day
pub const FIXED_PRICE_TX_COUNT_PER_CONTRACT_LIMIT: u64 = 10_000;

// Seconds in one UTC calendar day
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

// Fixed gas price expressed in the transaction price unit
pub fn fixed_gas_price() -> GasPrice {
    GasPrice::from(FIXED_GAS_PRICE)
}
