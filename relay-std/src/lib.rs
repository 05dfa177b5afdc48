//! # relay-std
//!
//! Standard implementations for the Relay middleware chain.
//!
//! This crate provides:
//! - **Reusable stacks**: [`Stack`], [`StackBuilder`]
//! - **Standard handlers**: Logging, Traced, When/Branch, Respond
//! - **Testing utilities**: counting and recording handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use relay_core;

// Modules
pub mod handlers;
pub mod stack;
pub mod testing;

pub use stack::{SharedResolver, Stack, StackBuilder};
