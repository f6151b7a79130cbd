// Allow some clippy lints for legacy code - to be fixed gradually
#![allow(clippy::module_inception)]

pub mod block;
pub mod config;
pub mod crypto;
pub mod time;
pub mod transaction;
