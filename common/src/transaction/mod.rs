use crate::crypto::{Address, Hashable};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

// Price paid per unit of gas
pub type GasPrice = U256;

pub type Nonce = u64;

// Transaction as seen by the fee policy
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// nonce must be equal to the one on chain account
    nonce: Nonce,
    /// Destination contract or account
    /// None for contract creation
    to: Option<Address>,
    /// Gas used by the transaction
    gas: u64,
    /// Gas price quoted by the sender
    gas_price: GasPrice,
    /// Gas price expected by the node once the fee policy has been applied
    /// Local annotation only, not part of the transaction hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_gas_price: Option<GasPrice>,
}

impl Transaction {
    // Create a new transaction
    #[inline(always)]
    pub fn new(nonce: Nonce, to: Option<Address>, gas: u64, gas_price: GasPrice) -> Self {
        Self {
            nonce,
            to,
            gas,
            gas_price,
            expected_gas_price: None,
        }
    }

    pub fn get_nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn get_to(&self) -> Option<&Address> {
        self.to.as_ref()
    }

    // Contract creation has no destination
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub fn get_gas(&self) -> u64 {
        self.gas
    }

    pub fn get_gas_price(&self) -> &GasPrice {
        &self.gas_price
    }

    pub fn get_expected_gas_price(&self) -> Option<&GasPrice> {
        self.expected_gas_price.as_ref()
    }

    pub fn set_expected_gas_price(&mut self, gas_price: GasPrice) {
        self.expected_gas_price = Some(gas_price);
    }
}

impl Hashable for Transaction {
    fn to_hashable_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + 1 + 20 + 8 + 32);
        bytes.extend_from_slice(&self.nonce.to_be_bytes());
        match &self.to {
            Some(address) => {
                bytes.push(1);
                bytes.extend_from_slice(address.as_bytes());
            }
            None => bytes.push(0),
        }
        bytes.extend_from_slice(&self.gas.to_be_bytes());
        bytes.extend_from_slice(&self.gas_price.to_big_endian());
        bytes
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match &self.to {
            Some(to) => write!(
                f,
                "Transaction[nonce: {}, to: {}, gas: {}, gas price: {}]",
                self.nonce, to, self.gas, self.gas_price
            ),
            None => write!(
                f,
                "Transaction[nonce: {}, contract creation, gas: {}, gas price: {}]",
                self.nonce, self.gas, self.gas_price
            ),
        }
    }
}
