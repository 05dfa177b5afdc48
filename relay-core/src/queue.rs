//! Handler queues and their entries.

use crate::{
    dispatcher::Next,
    error::BoxError,
    handler::{BoxHandler, FnHandler, Handler, from_fn},
    key::Key,
    response::IntoResponse,
};
use std::{collections::VecDeque, fmt, sync::Arc};

/// One element of a [`Queue`].
///
/// Only [`Entry::Handler`] can be invoked. A [`Entry::Value`] names a
/// handler that a resolver is expected to produce, and [`Entry::Vacant`] is
/// an explicit placeholder. Whatever the entry is after resolution, if it
/// is not a handler the dispatch fails with
/// [`InvalidHandler`](crate::DispatchError::InvalidHandler).
pub enum Entry<Req, Res, V = String> {
    /// A directly invocable handler.
    Handler(BoxHandler<Req, Res>),
    /// An opaque value for the resolver to turn into a handler.
    Value(V),
    /// Nothing to call.
    Vacant,
}

impl<Req, Res, V> Entry<Req, Res, V> {
    /// Create an entry from a handler.
    pub fn handler<H: Handler<Req, Res>>(handler: H) -> Self {
        Entry::Handler(Arc::new(handler))
    }

    /// Create an entry from a closure. See [`from_fn`].
    pub fn from_fn<F, O>(func: F) -> Self
    where
        F: Fn(&Req, Res, &mut Next<'_, Req, Res>) -> Result<O, BoxError>
            + Send
            + Sync
            + 'static,
        O: IntoResponse<Res>,
        Req: 'static,
        Res: 'static,
    {
        Entry::handler(from_fn(func))
    }

    /// Create an entry holding an opaque value.
    pub fn value(value: V) -> Self {
        Entry::Value(value)
    }

    /// Whether this entry can be invoked as is.
    pub fn is_handler(&self) -> bool {
        matches!(self, Entry::Handler(_))
    }

    /// The opaque value, if this is one.
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Entry::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<Req, Res, V: Clone> Clone for Entry<Req, Res, V> {
    fn clone(&self) -> Self {
        match self {
            Entry::Handler(handler) => Entry::Handler(Arc::clone(handler)),
            Entry::Value(value) => Entry::Value(value.clone()),
            Entry::Vacant => Entry::Vacant,
        }
    }
}

impl<Req, Res, V: fmt::Debug> fmt::Debug for Entry<Req, Res, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Handler(_) => f.write_str("Handler(..)"),
            Entry::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Entry::Vacant => f.write_str("Vacant"),
        }
    }
}

/// An ordered collection of keyed handler entries.
///
/// Keys follow array semantics: [`push`](Queue::push) appends under the
/// next free integer index, [`insert`](Queue::insert) appends under an
/// explicit key or replaces the entry already stored under it, keeping its
/// position.
///
/// # Example
///
/// ```rust,ignore
/// let queue = Queue::new()
///     .handler(Cors)
///     .named("auth", Entry::value("auth".to_string()))
///     .handler_fn(|req, res, next| Ok(next.run(req, res)?));
/// ```
pub struct Queue<Req, Res, V = String> {
    entries: VecDeque<(Key, Entry<Req, Res, V>)>,
    next_index: usize,
}

impl<Req, Res> Queue<Req, Res> {
    /// Create an empty queue whose opaque entries are strings.
    ///
    /// Use [`Queue::default`] for any other value type.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Req, Res, V> Queue<Req, Res, V> {
    /// Append an entry under the next integer index, returning that key.
    pub fn push(&mut self, entry: Entry<Req, Res, V>) -> Key {
        let key = Key::Index(self.next_index);
        self.insert(key.clone(), entry);
        key
    }

    /// Append an entry under `key`, or replace the entry already there.
    ///
    /// Automatic indices saturate at `usize::MAX`: once that index is taken,
    /// [`push`](Queue::push) replaces the entry stored under it.
    pub fn insert(&mut self, key: impl Into<Key>, entry: Entry<Req, Res, V>) {
        let key = key.into();
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index.saturating_add(1));
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push_back((key, entry)),
        }
    }

    /// Append a handler.
    pub fn handler<H: Handler<Req, Res>>(mut self, handler: H) -> Self {
        self.push(Entry::handler(handler));
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
        self.push(Entry::from_fn(func));
        self
    }

    /// Append an opaque value for the resolver.
    pub fn value(mut self, value: V) -> Self {
        self.push(Entry::Value(value));
        self
    }

    /// Append an entry under `key`.
    pub fn named(mut self, key: impl Into<Key>, entry: Entry<Req, Res, V>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in queue order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Entry<Req, Res, V>)> {
        self.entries.iter().map(|(key, entry)| (key, entry))
    }

    /// Remove the front entry.
    pub(crate) fn pop_front(&mut self) -> Option<(Key, Entry<Req, Res, V>)> {
        self.entries.pop_front()
    }
}

impl<Req, Res, V> Default for Queue<Req, Res, V> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            next_index: 0,
        }
    }
}

impl<Req, Res, V: Clone> Clone for Queue<Req, Res, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_index: self.next_index,
        }
    }
}

impl<Req, Res, V: fmt::Debug> fmt::Debug for Queue<Req, Res, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<Req, Res, V> FromIterator<Entry<Req, Res, V>> for Queue<Req, Res, V> {
    fn from_iter<I: IntoIterator<Item = Entry<Req, Res, V>>>(iter: I) -> Self {
        let mut queue = Queue::default();
        for entry in iter {
            queue.push(entry);
        }
        queue
    }
}

impl<K, Req, Res, V> FromIterator<(K, Entry<Req, Res, V>)> for Queue<Req, Res, V>
where
    K: Into<Key>,
{
    fn from_iter<I: IntoIterator<Item = (K, Entry<Req, Res, V>)>>(iter: I) -> Self {
        let mut queue = Queue::default();
        for (key, entry) in iter {
            queue.insert(key, entry);
        }
        queue
    }
}

/// Anything that can be dispatched as a queue.
///
/// A lone handler or entry becomes a one-element queue under key `0`.
pub trait IntoQueue<Req, Res, V = String> {
    /// Convert into a queue.
    fn into_queue(self) -> Queue<Req, Res, V>;
}

impl<Req, Res, V> IntoQueue<Req, Res, V> for Queue<Req, Res, V> {
    fn into_queue(self) -> Queue<Req, Res, V> {
        self
    }
}

impl<Req, Res, V> IntoQueue<Req, Res, V> for Entry<Req, Res, V> {
    fn into_queue(self) -> Queue<Req, Res, V> {
        std::iter::once(self).collect()
    }
}

impl<F, Req, Res> IntoQueue<Req, Res> for FnHandler<F, Req, Res>
where
    FnHandler<F, Req, Res>: Handler<Req, Res>,
{
    fn into_queue(self) -> Queue<Req, Res> {
        Queue::new().handler(self)
    }
}

impl<Req, Res, V> IntoQueue<Req, Res, V> for Vec<Entry<Req, Res, V>> {
    fn into_queue(self) -> Queue<Req, Res, V> {
        self.into_iter().collect()
    }
}

impl<Req, Res, V, const N: usize> IntoQueue<Req, Res, V> for [Entry<Req, Res, V>; N] {
    fn into_queue(self) -> Queue<Req, Res, V> {
        self.into_iter().collect()
    }
}

impl<K, Req, Res, V> IntoQueue<Req, Res, V> for Vec<(K, Entry<Req, Res, V>)>
where
    K: Into<Key>,
{
    fn into_queue(self) -> Queue<Req, Res, V> {
        self.into_iter().collect()
    }
}
