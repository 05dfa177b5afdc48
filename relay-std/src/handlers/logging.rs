//! Logging Handler - Observability for the chain.

use relay_core::{BoxError, Handler, Next, Response};
use std::fmt::Debug;

/// A handler that logs each request and hands it on.
///
/// Logs go through `tracing` when the `tracing` feature is enabled;
/// otherwise the handler is a plain passthrough.
///
/// # Example
///
/// ```rust,ignore
/// use relay::{StackBuilder, handlers::LoggingHandler};
///
/// let stack = StackBuilder::new()
///     .handler(LoggingHandler::named("api"))
///     .handler(Authenticate)
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHandler {
    name: &'static str,
}

impl LoggingHandler {
    /// Create a new `LoggingHandler` with a default name.
    pub fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a new `LoggingHandler` with a custom name.
    ///
    /// The name is used in log messages to identify the chain.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> Handler<Req, Res> for LoggingHandler
where
    Req: Debug + 'static,
    Res: Response + 'static,
{
    type Output = Res;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            name = %self.name,
            request = ?req,
            remaining = next.remaining(),
            "handling request"
        );

        let res = next.run(req, res);

        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &res {
                tracing::debug!(name = %self.name, error = %err, "chain failed");
            }
        }

        Ok(res?)
    }
}
