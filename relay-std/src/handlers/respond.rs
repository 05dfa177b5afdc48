//! Fixed-response handler.

use relay_core::{BoxError, Handler, Next, Response};

/// A handler that answers with a fixed response and stops the chain.
///
/// The incoming response is discarded and nothing after this handler runs.
/// Useful as a fallback at the end of a chain or behind a [`When`].
///
/// [`When`]: crate::handlers::When
#[derive(Debug, Clone)]
pub struct Respond<Res> {
    response: Res,
}

impl<Res> Respond<Res> {
    /// Answer every request with a clone of `response`.
    pub fn new(response: Res) -> Self {
        Self { response }
    }
}

impl<Req, Res> Handler<Req, Res> for Respond<Res>
where
    Res: Response + Clone + Send + Sync + 'static,
{
    type Output = Res;

    fn call(&self, _req: &Req, _res: Res, _next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        Ok(self.response.clone())
    }
}
