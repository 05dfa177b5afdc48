//! # Handlers
//!
//! A handler is one link of the chain. It receives the request, the current
//! response and the continuation ([`Next`]) and returns the response the
//! chain should carry on with. Calling `next.run(req, res)` hands control to
//! the rest of the chain; returning without calling it short-circuits.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] carries an associated output type and is what you implement.
//! Queues store handlers as [`BoxHandler`], an `Arc` of the object-safe
//! [`DynHandler`] which every `Handler` implements automatically.

use crate::{dispatcher::Next, error::BoxError, response::IntoResponse};
use std::{fmt, marker::PhantomData, sync::Arc};

/// A unit of request/response processing.
///
/// # Example
///
/// ```rust,ignore
/// struct RequireToken;
///
/// impl Handler<Request, Response> for RequireToken {
///     type Output = Response;
///
///     fn call(
///         &self,
///         req: &Request,
///         res: Response,
///         next: &mut Next<'_, Request, Response>,
///     ) -> Result<Response, BoxError> {
///         if req.header("authorization").is_none() {
///             return Ok(res.with_status(403));
///         }
///         Ok(next.run(req, res)?)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a handler for `{Req}` / `{Res}`",
    label = "missing `Handler` implementation",
    note = "Implement `Handler<{Req}, {Res}>` or wrap a closure with `from_fn`."
)]
pub trait Handler<Req, Res>: Send + Sync + 'static {
    /// What the handler returns; must convert into a response.
    type Output: IntoResponse<Res>;

    /// Process the request. May call `next` to run the rest of the chain.
    fn call(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<Self::Output, BoxError>;
}

/// Object-safe version of [`Handler`].
///
/// The output is already converted: `Ok(None)` means the handler returned
/// something that is not a response.
pub trait DynHandler<Req, Res>: Send + Sync + 'static {
    /// Process the request (dynamic dispatch version).
    fn call_dyn(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<Option<Res>, BoxError>;
}

// Blanket implementation: any Handler is a DynHandler.
impl<Req, Res, H> DynHandler<Req, Res> for H
where
    H: Handler<Req, Res>,
{
    fn call_dyn(
        &self,
        req: &Req,
        res: Res,
        next: &mut Next<'_, Req, Res>,
    ) -> Result<Option<Res>, BoxError> {
        self.call(req, res, next).map(IntoResponse::into_response)
    }
}

/// A shared, type-erased handler as stored in queues.
pub type BoxHandler<Req, Res> = Arc<dyn DynHandler<Req, Res>>;

/// A handler built from a closure. See [`from_fn`].
pub struct FnHandler<F, Req, Res> {
    func: F,
    _marker: PhantomData<fn(&Req, Res) -> Res>,
}

/// Wrap a closure as a [`Handler`].
///
/// ```rust,ignore
/// let set_created = from_fn(|req: &Request, res: Response, next: &mut Next<'_, _, _>| {
///     Ok(next.run(req, res.with_status(201))?)
/// });
/// ```
pub fn from_fn<F, O, Req, Res>(func: F) -> FnHandler<F, Req, Res>
where
    F: Fn(&Req, Res, &mut Next<'_, Req, Res>) -> Result<O, BoxError>,
    O: IntoResponse<Res>,
{
    FnHandler {
        func,
        _marker: PhantomData,
    }
}

impl<F, O, Req, Res> Handler<Req, Res> for FnHandler<F, Req, Res>
where
    F: Fn(&Req, Res, &mut Next<'_, Req, Res>) -> Result<O, BoxError> + Send + Sync + 'static,
    O: IntoResponse<Res>,
    Req: 'static,
    Res: 'static,
{
    type Output = O;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<O, BoxError> {
        (self.func)(req, res, next)
    }
}

impl<F: Clone, Req, Res> Clone for FnHandler<F, Req, Res> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F, Req, Res> fmt::Debug for FnHandler<F, Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}
