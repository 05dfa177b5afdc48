//! Reusable handler stacks.
//!
//! A [`Queue`] is consumed by the dispatch it is handed to. A [`Stack`] is
//! built once with a [`StackBuilder`], can be shared across threads, and
//! gives every dispatch its own copy of the queue and its own attribute
//! bag.

use relay_core::{
    BoxError, DispatchError, Dispatcher, Entry, Handler, IntoResponse, Key, Next, Queue, Response,
};
use std::{fmt, sync::Arc};

/// A resolver that can be stored in a [`Stack`].
pub type SharedResolver<Req, Res, V = String> =
    Arc<dyn Fn(Entry<Req, Res, V>, &Key) -> Entry<Req, Res, V> + Send + Sync>;

// ============================================================================
// StackBuilder - for constructing stacks
// ============================================================================

/// Builder for constructing a [`Stack`].
///
/// # Example
/// ```ignore
/// let stack = StackBuilder::new()
///     .handler(LoggingHandler::new())
///     .named("auth", Entry::value("auth".to_string()))
///     .resolver(|entry, key| container.resolve(entry, key))
///     .build();
/// ```
pub struct StackBuilder<Req, Res, V = String> {
    queue: Queue<Req, Res, V>,
    resolver: Option<SharedResolver<Req, Res, V>>,
}

impl<Req, Res> StackBuilder<Req, Res> {
    /// Create a new empty builder whose opaque entries are strings.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Req, Res, V> StackBuilder<Req, Res, V> {
    /// Append a handler.
    pub fn handler<H: Handler<Req, Res>>(mut self, handler: H) -> Self {
        self.queue.push(Entry::handler(handler));
        self
    }

    /// Append a closure handler.
    pub fn handler_fn<F, O>(mut self, func: F) -> Self
    where
        F: Fn(&Req, Res, &mut Next<'_, Req, Res>) -> Result<O, BoxError>
            + Send
            + Sync
            + 'static,
        O: IntoResponse<Res>,
        Req: 'static,
        Res: 'static,
    {
        self.queue.push(Entry::from_fn(func));
        self
    }

    /// Append an opaque value for the resolver.
    pub fn value(mut self, value: V) -> Self {
        self.queue.push(Entry::Value(value));
        self
    }

    /// Append an entry under the next integer key.
    pub fn entry(mut self, entry: Entry<Req, Res, V>) -> Self {
        self.queue.push(entry);
        self
    }

    /// Append an entry under `key`, replacing any entry already there.
    pub fn named(mut self, key: impl Into<Key>, entry: Entry<Req, Res, V>) -> Self {
        self.queue.insert(key, entry);
        self
    }

    /// Resolve every entry through `resolver` before invoking it.
    pub fn resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(Entry<Req, Res, V>, &Key) -> Entry<Req, Res, V> + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Build the immutable stack.
    pub fn build(self) -> Stack<Req, Res, V> {
        Stack {
            queue: self.queue,
            resolver: self.resolver,
        }
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the builder has no entries.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<Req, Res, V> Default for StackBuilder<Req, Res, V> {
    fn default() -> Self {
        Self {
            queue: Queue::default(),
            resolver: None,
        }
    }
}

impl<Req, Res, V> From<Queue<Req, Res, V>> for StackBuilder<Req, Res, V> {
    fn from(queue: Queue<Req, Res, V>) -> Self {
        Self {
            queue,
            resolver: None,
        }
    }
}

// ============================================================================
// Stack - immutable, shareable handler chain
// ============================================================================

/// An immutable, shareable chain of handler entries.
///
/// Created by calling [`StackBuilder::build`]. Each call to
/// [`dispatch`](Stack::dispatch) works on a fresh copy of the queue, so one
/// stack can serve any number of concurrent or nested dispatches.
///
/// A stack is itself a [`Handler`]: mounted inside another chain it runs as
/// a sub-chain with its own attribute bag, and its response is handed on to
/// the outer chain's continuation.
pub struct Stack<Req, Res, V = String> {
    queue: Queue<Req, Res, V>,
    resolver: Option<SharedResolver<Req, Res, V>>,
}

impl<Req, Res, V: Clone> Stack<Req, Res, V> {
    /// Run `req`/`res` through the stack.
    ///
    /// # Errors
    ///
    /// See [`relay_core::dispatch`].
    pub fn dispatch(&self, req: &Req, res: Res) -> Result<Res, DispatchError>
    where
        Req: 'static,
        Res: 'static,
    {
        let dispatcher = Dispatcher::new(self.queue.clone());
        match &self.resolver {
            Some(resolver) => dispatcher.with_resolver(&**resolver).run(req, res),
            None => dispatcher.run(req, res),
        }
    }
}

impl<Req, Res, V> Stack<Req, Res, V> {
    /// Keys in dispatch order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.queue.keys()
    }

    /// Whether entries go through a resolver.
    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<Req, Res, V: Clone> Clone for Stack<Req, Res, V> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            resolver: self.resolver.clone(),
        }
    }
}

impl<Req, Res, V: fmt::Debug> fmt::Debug for Stack<Req, Res, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("queue", &self.queue)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl<Req, Res, V> Handler<Req, Res> for Stack<Req, Res, V>
where
    Req: 'static,
    Res: Response + 'static,
    V: Clone + Send + Sync + 'static,
{
    type Output = Res;

    fn call(&self, req: &Req, res: Res, next: &mut Next<'_, Req, Res>) -> Result<Res, BoxError> {
        let res = self.dispatch(req, res)?;
        Ok(next.run(req, res)?)
    }
}
