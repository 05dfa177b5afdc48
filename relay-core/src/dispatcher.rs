//! # Dispatcher
//!
//! The dispatcher owns the mutable state of one dispatch call: the remaining
//! queue, the optional resolver and the attribute bag. Handlers never see
//! the dispatcher directly. They receive a [`Next`], a continuation bound to
//! that state, and calling [`Next::run`] advances the chain by exactly one
//! entry.
//!
//! ```text
//! dispatch(req, res, [a, b, c])
//!   └─ next.run(req, res)          pops `a`, calls a(req, res, next)
//!        └─ next.run(req, res')    pops `b`, calls b(req, res', next)
//!             └─ next.run(...)     pops `c`, ...
//!                  └─ next.run(..) queue empty: returns the response as is
//! ```
//!
//! Every dispatch call builds its own state, so nested dispatches (a handler
//! dispatching a sub-chain) and dispatches on other threads never interfere.

use crate::{
    attributes::Attributes,
    error::DispatchError,
    handler::BoxHandler,
    key::Key,
    queue::{Entry, IntoQueue, Queue},
};

/// Resolver signature: turns a queue entry into an invocable one.
///
/// Called once per entry, when the entry is reached, whether or not it is
/// already a handler.
pub type Resolver<'r, Req, Res, V = String> =
    dyn Fn(Entry<Req, Res, V>, &Key) -> Entry<Req, Res, V> + 'r;

/// Whether a continuation still has entries to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// At least one entry is left.
    Pending,
    /// The queue is exhausted; the continuation passes responses through.
    Terminal,
}

/// Per-call dispatch state.
///
/// # Example
///
/// ```rust,ignore
/// let res = Dispatcher::new(queue)
///     .with_resolver(&|entry, key| container.resolve(entry, key))
///     .run(&req, res)?;
/// ```
pub struct Dispatcher<'r, Req, Res, V = String> {
    queue: Queue<Req, Res, V>,
    resolver: Option<&'r Resolver<'r, Req, Res, V>>,
    attributes: Attributes,
}

impl<'r, Req, Res, V> Dispatcher<'r, Req, Res, V> {
    /// Create the dispatch state for `queue`, without a resolver.
    pub fn new(queue: impl IntoQueue<Req, Res, V>) -> Self {
        Self {
            queue: queue.into_queue(),
            resolver: None,
            attributes: Attributes::new(),
        }
    }

    /// Resolve every entry through `resolver` before invoking it.
    pub fn with_resolver(mut self, resolver: &'r Resolver<'r, Req, Res, V>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Run the chain from the first entry and return its response.
    pub fn run(mut self, req: &Req, res: Res) -> Result<Res, DispatchError>
    where
        Req: 'static,
        Res: 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!(entries = self.queue.len(), "dispatch started");

        Next { chain: &mut self }.run(req, res)
    }
}

/// Dispatch `req`/`res` through `queue`.
///
/// Returns the response produced by the first handler, which is the
/// response of the whole chain. An empty queue returns `res` unchanged.
///
/// # Errors
///
/// - [`DispatchError::InvalidHandler`] if an entry is not a handler after
///   optional resolution
/// - [`DispatchError::ContractViolation`] if a handler's output is not a
///   response
/// - [`DispatchError::Handler`] with the error a handler returned
pub fn dispatch<Req, Res, V>(
    req: &Req,
    res: Res,
    queue: impl IntoQueue<Req, Res, V>,
    resolver: Option<&Resolver<'_, Req, Res, V>>,
) -> Result<Res, DispatchError>
where
    Req: 'static,
    Res: 'static,
{
    let dispatcher = Dispatcher::new(queue);
    match resolver {
        Some(resolver) => dispatcher.with_resolver(resolver).run(req, res),
        None => dispatcher.run(req, res),
    }
}

/// The dispatch state as seen from a continuation.
trait Chain<Req, Res> {
    /// Pop and resolve the front entry. `None` once the queue is empty.
    fn advance(&mut self) -> Option<Result<(Key, BoxHandler<Req, Res>), DispatchError>>;

    fn remaining(&self) -> usize;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;
}

impl<Req, Res, V> Chain<Req, Res> for Dispatcher<'_, Req, Res, V> {
    fn advance(&mut self) -> Option<Result<(Key, BoxHandler<Req, Res>), DispatchError>> {
        let (key, mut entry) = self.queue.pop_front()?;

        if let Some(resolver) = self.resolver {
            entry = resolver(entry, &key);
        }

        match entry {
            Entry::Handler(handler) => Some(Ok((key, handler))),
            Entry::Value(_) | Entry::Vacant => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%key, "entry is not callable");

                Some(Err(DispatchError::InvalidHandler { key }))
            }
        }
    }

    fn remaining(&self) -> usize {
        self.queue.len()
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

/// The continuation handed to every handler.
///
/// All handlers of one dispatch share the same underlying state: the queue
/// a handler sees through `next` is the queue minus everything already
/// consumed, and the [`Attributes`] are the same instance throughout.
///
/// Calling [`run`](Next::run) more than once from the same handler is
/// allowed but rarely what you want: each call consumes further entries of
/// the already shortened queue.
pub struct Next<'a, Req, Res> {
    chain: &'a mut dyn Chain<Req, Res>,
}

impl<Req: 'static, Res: 'static> Next<'_, Req, Res> {
    /// Run the next entry of the chain and return its response.
    ///
    /// Once the queue is exhausted this returns `res` unchanged, however
    /// often it is called.
    pub fn run(&mut self, req: &Req, res: Res) -> Result<Res, DispatchError> {
        let (key, handler) = match self.chain.advance() {
            None => return Ok(res),
            Some(step) => step?,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(%key, remaining = self.chain.remaining(), "invoking handler");

        match handler.call_dyn(req, res, self) {
            Ok(Some(res)) => Ok(res),
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%key, "handler did not return a response");

                Err(DispatchError::ContractViolation { key })
            }
            Err(err) => Err(DispatchError::from_handler(err)),
        }
    }

    /// Current state of the chain.
    pub fn state(&self) -> State {
        if self.chain.remaining() == 0 {
            State::Terminal
        } else {
            State::Pending
        }
    }

    /// Number of entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.chain.remaining()
    }

    /// The attribute bag of this dispatch.
    pub fn attributes(&self) -> &Attributes {
        self.chain.attributes()
    }

    /// Mutable access to the attribute bag of this dispatch.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        self.chain.attributes_mut()
    }
}
