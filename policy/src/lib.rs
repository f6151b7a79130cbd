// Fixed gas price policy library
// Decides whether a transaction pays the fixed gas price or the market one

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::uninlined_format_args)]

extern crate log;

pub mod config;
pub mod core;
