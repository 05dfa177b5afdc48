//! # relay-core
//!
//! Core types for the Relay middleware chain.
//!
//! Relay runs a request and a response through an ordered queue of
//! handlers. Each handler may change the response, hand it on to the rest
//! of the queue through its continuation, or stop the chain by returning
//! without doing so.
//!
//! # Building Blocks
//!
//! - [`Handler`] / [`DynHandler`] - One link of the chain
//! - [`Queue`] / [`Entry`] / [`Key`] - The ordered, keyed handler entries
//! - [`Dispatcher`] / [`dispatch`] - Per-call state and the entry point
//! - [`Next`] - The continuation passed to every handler
//! - [`Attributes`] - Scratch space shared by the handlers of one dispatch
//! - [`Response`] / [`IntoResponse`] - What handlers must return
//!
//! # Example
//!
//! ```rust,ignore
//! let queue = Queue::new()
//!     .handler_fn(|req, res: HttpResponse, next| {
//!         Ok(next.run(req, res.with_status(201))?)
//!     })
//!     .handler_fn(|_, res: HttpResponse, _| Ok(res.with_header("x-done", "1")));
//!
//! let res = dispatch(&req, HttpResponse::default(), queue, None)?;
//! ```
//!
//! # Error Types
//!
//! - [`DispatchError`] - Invalid entries, contract violations, handler errors
//! - [`BoxError`] - The error type handlers return

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod attributes;
mod dispatcher;
mod error;
mod handler;
mod key;
mod queue;
mod response;

// Re-exports
pub use attributes::Attributes;
pub use dispatcher::{Dispatcher, Next, Resolver, State, dispatch};
pub use error::{BoxError, DispatchError};
pub use handler::{BoxHandler, DynHandler, FnHandler, Handler, from_fn};
pub use key::Key;
pub use queue::{Entry, IntoQueue, Queue};
pub use response::{IntoResponse, Response};
