// Fixed gas price policy
//
// The selector asks the eligibility engine, which reads the chain history
// of the destination through a `ChainReader`.

mod eligibility;
mod selector;

pub use eligibility::*;
pub use selector::*;
