use std::fmt::{Display, Error as FmtError, Formatter};

use crate::{
    crypto::{Hash, Hashable, HASH_SIZE},
    time::TimestampSeconds,
};

use super::BlockHeight;

// Linear chain block header
//
// `parent` is the zero hash for the genesis block
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub parent: Hash,
    pub height: BlockHeight,
    // Seconds since UNIX epoch (UTC)
    pub timestamp: TimestampSeconds,
    pub txs_hashes: Vec<Hash>,
}

impl BlockHeader {
    pub fn new(
        parent: Hash,
        height: BlockHeight,
        timestamp: TimestampSeconds,
        txs_hashes: Vec<Hash>,
    ) -> Self {
        Self {
            parent,
            height,
            timestamp,
            txs_hashes,
        }
    }

    pub fn get_parent(&self) -> &Hash {
        &self.parent
    }

    pub fn get_height(&self) -> BlockHeight {
        self.height
    }

    pub fn get_timestamp(&self) -> TimestampSeconds {
        self.timestamp
    }

    pub fn get_txs_count(&self) -> usize {
        self.txs_hashes.len()
    }

    pub fn is_genesis(&self) -> bool {
        self.parent.is_zero()
    }
}

impl Hashable for BlockHeader {
    fn to_hashable_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HASH_SIZE + 8 + 8 + self.txs_hashes.len() * HASH_SIZE);
        bytes.extend_from_slice(self.parent.as_bytes());
        bytes.extend_from_slice(&self.height.to_be_bytes());
        bytes.extend_from_slice(&self.timestamp.to_be_bytes());
        for tx_hash in &self.txs_hashes {
            bytes.extend_from_slice(tx_hash.as_bytes());
        }
        bytes
    }
}

impl Display for BlockHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "BlockHeader[height: {}, parent: {}, timestamp: {}, txs: {}]",
            self.height,
            self.parent,
            self.timestamp,
            self.txs_hashes.len()
        )
    }
}
