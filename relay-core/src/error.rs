//! Error types for Relay.
//!
//! - [`DispatchError`] - Everything that can abort a dispatch
//! - [`BoxError`] - The error type handlers return

use crate::key::Key;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a dispatch.
///
/// None of these are recovered by the dispatcher: the first one raised stops
/// the chain and is returned from [`dispatch`](crate::dispatch).
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The entry at `key` is not invocable after optional resolution.
    #[error("middleware at key {key} is not callable")]
    InvalidHandler {
        /// Key of the offending queue entry.
        key: Key,
    },

    /// The handler at `key` did not return a response.
    #[error("middleware at key {key} did not return a response")]
    ContractViolation {
        /// Key of the offending queue entry.
        key: Key,
    },

    /// An error raised by a handler itself.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Turn an error returned by a handler back into a `DispatchError`.
    ///
    /// Handlers propagate the result of [`Next::run`](crate::Next::run) with
    /// `?`, which boxes any `DispatchError` raised further down the chain.
    /// Those are unboxed here so they reach the caller unchanged; anything
    /// else is the handler's own error.
    pub fn from_handler(err: BoxError) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(inner) => *inner,
            Err(err) => DispatchError::Handler(err),
        }
    }

    /// The key of the entry that broke the handler contract, if any.
    pub fn key(&self) -> Option<&Key> {
        match self {
            DispatchError::InvalidHandler { key } | DispatchError::ContractViolation { key } => {
                Some(key)
            }
            DispatchError::Handler(_) => None,
        }
    }

    /// Returns the handler's own error, if this is one.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            DispatchError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::from_handler(err)
    }
}
