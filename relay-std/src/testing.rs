//! Testing utilities for Relay.
//!
//! This module provides utilities to make testing handlers and chains easier.
//!
//! # Features
//!
//! - [`CountingHandler`]: A handler that counts invocations and passes through
//! - [`RecordingHandler`]: A handler that records every request it receives
//! - [`Passthrough`]: A handler that only calls the continuation
//! - [`NoResponse`]: A handler that breaks the response contract

use relay_core::{BoxError, Handler, Next, Response};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and then continues the chain.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let queue = Queue::new().handler(counter.clone());
///
/// dispatch(&req, res, queue, None)?;
///
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<Req: 'static, Res: Response + 'static> Handler<Req, Res> for CountingHandler {
    type Output = Res;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(next.run(req, res)?)
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all requests it receives, then continues the chain.
///
/// Useful for verifying what reached a given position of a chain.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<MyRequest>::new();
/// let queue = Queue::new().handler(recorder.clone());
///
/// dispatch(&req, res, queue, None)?;
///
/// assert_eq!(recorder.requests().len(), 1);
/// ```
pub struct RecordingHandler<Req> {
    requests: Arc<Mutex<Vec<Req>>>,
}

impl<Req: Clone> RecordingHandler<Req> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded requests.
    pub fn requests(&self) -> Vec<Req> {
        self.lock().clone()
    }

    /// Get the number of recorded requests.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Clear all recorded requests.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<Req> RecordingHandler<Req> {
    // Poisoning only means another test thread panicked mid-push.
    fn lock(&self) -> MutexGuard<'_, Vec<Req>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Req: Clone> Default for RecordingHandler<Req> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req> Clone for RecordingHandler<Req> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
        }
    }
}

impl<Req, Res> Handler<Req, Res> for RecordingHandler<Req>
where
    Req: Clone + Send + 'static,
    Res: Response + 'static,
{
    type Output = Res;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        self.lock().push(req.clone());
        Ok(next.run(req, res)?)
    }
}

// ============================================================================
// Passthrough / NoResponse
// ============================================================================

/// A handler that hands the request straight on to the rest of the chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl<Req: 'static, Res: Response + 'static> Handler<Req, Res> for Passthrough {
    type Output = Res;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        Ok(next.run(req, res)?)
    }
}

/// A handler that returns no response at all.
///
/// Dispatching it always fails with
/// [`ContractViolation`](relay_core::DispatchError::ContractViolation).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResponse;

impl<Req, Res: Response> Handler<Req, Res> for NoResponse {
    type Output = Option<Res>;

    fn call(
        &self,
        _req: &Req,
        _res: Res,
        _next: &mut Next<'_, Req, Res>,
    ) -> Result<Option<Res>, BoxError> {
        Ok(None)
    }
}
