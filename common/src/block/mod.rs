mod block;
mod header;

pub use block::Block;
pub use header::BlockHeader;

// Height of a block in the chain, genesis is at height 0
pub type BlockHeight = u64;
