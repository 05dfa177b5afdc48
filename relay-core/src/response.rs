//! Response capability.

/// Marker for values that can travel through the chain as a response.
///
/// The dispatcher never inspects a response. The only thing it asks is
/// whether the value a handler returned [`conforms`](Response::conforms);
/// response types that can hold values which must not leave a handler
/// (an unset status, a half-built body) override it.
///
/// # Example
///
/// ```rust,ignore
/// struct HttpResponse { status: u16 }
///
/// impl Response for HttpResponse {
///     fn conforms(&self) -> bool {
///         (100..600).contains(&self.status)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Response",
    label = "missing `Response` implementation",
    note = "Add `impl Response for {Self} {{}}` to pass it through a chain."
)]
pub trait Response {
    /// Whether this value satisfies the response contract.
    fn conforms(&self) -> bool {
        true
    }
}

impl Response for () {}
impl Response for String {}
impl Response for &'static str {}
impl<T> Response for Vec<T> {}

impl<T: Response> Response for Box<T> {
    fn conforms(&self) -> bool {
        (**self).conforms()
    }
}

/// Conversion of a handler's output into the response it stands for.
///
/// `None` means the output is not a response, which the dispatcher reports
/// as a [`ContractViolation`](crate::DispatchError::ContractViolation).
///
/// # Default Implementations
///
/// - `R` → `Some(R)` if it conforms
/// - `Option<R>` → the inner response if present and conforming
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler producing `{Res}`",
    label = "missing `IntoResponse<{Res}>` implementation"
)]
pub trait IntoResponse<Res> {
    /// Convert the output into a response, if it is one.
    fn into_response(self) -> Option<Res>;
}

impl<R: Response> IntoResponse<R> for R {
    fn into_response(self) -> Option<R> {
        self.conforms().then_some(self)
    }
}

impl<R: Response> IntoResponse<R> for Option<R> {
    fn into_response(self) -> Option<R> {
        self.filter(Response::conforms)
    }
}
