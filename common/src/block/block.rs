use super::{BlockHeader, BlockHeight};
use crate::{
    crypto::{Hash, Hashable},
    time::TimestampSeconds,
    transaction::Transaction,
};
use std::{
    fmt::Error,
    fmt::{Display, Formatter},
    ops::Deref,
    sync::Arc,
};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct Block {
    #[serde(flatten)]
    header: Arc<BlockHeader>,
    transactions: Vec<Arc<Transaction>>,
}

impl Block {
    pub fn new(header: Arc<BlockHeader>, transactions: Vec<Arc<Transaction>>) -> Self {
        Block {
            header,
            transactions,
        }
    }

    // Build a block on top of `parent`, the header commits to the transactions hashes
    pub fn with_transactions(
        parent: Hash,
        height: BlockHeight,
        timestamp: TimestampSeconds,
        transactions: Vec<Arc<Transaction>>,
    ) -> Self {
        let txs_hashes = transactions.iter().map(|tx| tx.hash()).collect();
        let header = BlockHeader::new(parent, height, timestamp, txs_hashes);
        Self::new(Arc::new(header), transactions)
    }

    pub fn get_header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn get_txs_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn get_transactions(&self) -> &Vec<Arc<Transaction>> {
        &self.transactions
    }
}

impl Hashable for Block {
    fn to_hashable_bytes(&self) -> Vec<u8> {
        self.header.to_hashable_bytes()
    }
}

impl Deref for Block {
    type Target = BlockHeader;

    fn deref(&self) -> &Self::Target {
        self.get_header()
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "Block[height: {}, parent: {}, timestamp: {}, txs: {}]",
            self.height,
            self.parent,
            self.timestamp,
            self.transactions.len()
        )
    }
}
