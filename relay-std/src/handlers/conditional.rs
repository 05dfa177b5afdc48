//! Conditional Handlers - Run handlers based on the request.

use relay_core::{BoxError, Handler, IntoResponse, Next, Response};

/// A handler that runs an inner handler only when a condition holds.
///
/// When `condition(req)` is `false` the request skips the inner handler and
/// goes straight on to the rest of the chain.
///
/// # Example
///
/// ```rust,ignore
/// use relay::handlers::When;
///
/// // Only authenticate requests under /admin
/// let admin_only = When::new(
///     |req: &Request| req.path().starts_with("/admin"),
///     Authenticate,
/// );
/// ```
pub struct When<C, H> {
    condition: C,
    inner: H,
}

impl<C, H> When<C, H> {
    /// Create a new `When`.
    ///
    /// The inner handler will only be executed when `condition(req)` returns `true`.
    pub fn new(condition: C, inner: H) -> Self {
        Self { condition, inner }
    }
}

impl<Req, Res, C, H> Handler<Req, Res> for When<C, H>
where
    Req: 'static,
    Res: Response + 'static,
    C: Fn(&Req) -> bool + Send + Sync + 'static,
    H: Handler<Req, Res>,
{
    type Output = Option<Res>;

    fn call(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<Option<Res>, BoxError> {
        if (self.condition)(req) {
            Ok(self.inner.call(req, res, next)?.into_response())
        } else {
            Ok(Some(next.run(req, res)?))
        }
    }
}

/// A handler that runs one of two inner handlers based on a condition.
///
/// When the condition is `true`, `then_handler` runs; otherwise
/// `else_handler` does. Either one decides whether the chain continues.
///
/// # Example
///
/// ```rust,ignore
/// use relay::handlers::{Branch, Respond};
///
/// let maintenance = Branch::new(
///     |_: &Request| MAINTENANCE.load(Ordering::Relaxed),
///     Respond::new(Response::status(503)),
///     Passthrough,
/// );
/// ```
pub struct Branch<C, T, E> {
    condition: C,
    then_handler: T,
    else_handler: E,
}

impl<C, T, E> Branch<C, T, E> {
    /// Create a new `Branch`.
    pub fn new(condition: C, then_handler: T, else_handler: E) -> Self {
        Self {
            condition,
            then_handler,
            else_handler,
        }
    }
}

impl<Req, Res, C, T, E> Handler<Req, Res> for Branch<C, T, E>
where
    Res: Response,
    C: Fn(&Req) -> bool + Send + Sync + 'static,
    T: Handler<Req, Res>,
    E: Handler<Req, Res>,
{
    type Output = Option<Res>;

    fn call(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<Option<Res>, BoxError> {
        if (self.condition)(req) {
            Ok(self.then_handler.call(req, res, next)?.into_response())
        } else {
            Ok(self.else_handler.call(req, res, next)?.into_response())
        }
    }
}
