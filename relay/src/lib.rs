//! # relay - Sequential Middleware Dispatch
//!
//! `relay` runs a request and a response through an ordered queue of
//! handlers. Every handler gets a continuation: calling it runs the rest of
//! the queue, not calling it stops the chain. The response returned by the
//! first handler is the response of the dispatch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay::prelude::*;
//!
//! let queue = Queue::new()
//!     .handler(LoggingHandler::new())
//!     .handler_fn(|req: &Request, res: Response, next: &mut Next<'_, _, _>| {
//!         Ok(next.run(req, res.with_status(201))?)
//!     });
//!
//! let res = dispatch(&req, Response::default(), queue, None)?;
//! ```
//!
//! ## Reusable Stacks
//!
//! A [`Queue`] is consumed by one dispatch. Build a [`Stack`] to dispatch
//! the same chain many times, from many threads:
//!
//! ```rust,ignore
//! let stack = StackBuilder::new()
//!     .value("auth".to_string())
//!     .resolver(|entry, _key| container.resolve(entry))
//!     .build();
//!
//! let res = stack.dispatch(&req, Response::default())?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use relay_core::{
    // Dispatch-scoped state
    Attributes,
    // Error types
    BoxError,
    // Handler
    BoxHandler,
    DispatchError,
    // Dispatch
    Dispatcher,
    DynHandler,
    // Queue
    Entry,
    FnHandler,
    Handler,
    IntoQueue,
    // Response
    IntoResponse,
    Key,
    Next,
    Queue,
    Resolver,
    Response,
    State,
    dispatch,
    from_fn,
};

// Reusable stacks
pub use relay_std::stack::{SharedResolver, Stack, StackBuilder};

/// Standard handler implementations.
pub mod handlers {
    pub use relay_std::handlers::{Branch, LoggingHandler, Respond, Traced, When};
}

/// Testing utilities.
pub mod testing {
    pub use relay_std::testing::{CountingHandler, NoResponse, Passthrough, RecordingHandler};
}

/// Prelude module - common imports for Relay.
///
/// # Usage
///
/// ```rust,ignore
/// use relay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        DispatchError,
        // Queue
        Entry,
        // Core traits
        Handler,
        IntoResponse,
        Key,
        Next,
        Queue,
        Response,
        // Stacks
        Stack,
        StackBuilder,
        dispatch,
        from_fn,
        // Standard handlers
        handlers::{LoggingHandler, Respond},
    };
}
