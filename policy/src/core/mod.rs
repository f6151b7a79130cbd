pub mod clock;
pub mod error;
pub mod gas_price;
pub mod storage;
