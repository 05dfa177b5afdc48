//! Span instrumentation for handlers.

use relay_core::{BoxError, Handler, Next};

/// A handler wrapper that runs the inner handler inside a `tracing` span.
///
/// Everything the inner handler does, including the rest of the chain it
/// runs through `next`, is recorded inside the span. Without the `tracing`
/// feature the wrapper simply delegates.
pub struct Traced<H> {
    inner: H,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    name: &'static str,
}

impl<H> Traced<H> {
    /// Wrap `inner` in a span called `name`.
    pub const fn new(inner: H, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Clone> Clone for Traced<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<H: Copy> Copy for Traced<H> {}

impl<Req, Res, H> Handler<Req, Res> for Traced<H>
where
    H: Handler<Req, Res>,
{
    type Output = H::Output;

    fn call(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<H::Output, BoxError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "handler",
            handler = %self.name,
            remaining = next.remaining()
        );
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        self.inner.call(req, res, next)
    }
}
