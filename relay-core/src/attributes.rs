//! Per-dispatch attribute bag.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Shared scratch space for the handlers of one dispatch.
///
/// A fresh, empty bag is created for every dispatch call and handed to each
/// handler through [`Next::attributes`](crate::Next::attributes) and
/// [`Next::attributes_mut`](crate::Next::attributes_mut). Values are stored
/// by name and retrieved by name and type.
///
/// ```rust,ignore
/// // in an authentication handler
/// next.attributes_mut().insert("user_id", 42u64);
///
/// // in a later handler
/// let user_id = next.attributes().get::<u64>("user_id");
/// ```
#[derive(Default)]
pub struct Attributes {
    values: HashMap<String, Box<dyn Any>>,
}

impl Attributes {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, returning the previous value if it had
    /// the same type.
    pub fn insert<T: Any>(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        self.values
            .insert(name.into(), Box::new(value))
            .and_then(|prev| prev.downcast::<T>().ok())
            .map(|prev| *prev)
    }

    /// Get a reference to the value stored under `name` if it is a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name)?.downcast_ref()
    }

    /// Get a mutable reference to the value stored under `name` if it is a `T`.
    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.values.get_mut(name)?.downcast_mut()
    }

    /// Remove and return the value stored under `name` if it is a `T`.
    ///
    /// A value of another type is left in place.
    pub fn remove<T: Any>(&mut self, name: &str) -> Option<T> {
        if !self.values.get(name)?.is::<T>() {
            return None;
        }
        self.values
            .remove(name)
            .and_then(|value| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    /// Whether anything is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names of all stored values, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut attrs = Attributes::new();
        assert!(attrs.is_empty());

        assert_eq!(attrs.insert("user", String::from("alice")), None);
        assert_eq!(attrs.get::<String>("user").map(String::as_str), Some("alice"));
        assert_eq!(attrs.get::<u32>("user"), None);
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_insert_returns_previous_of_same_type() {
        let mut attrs = Attributes::new();
        attrs.insert("hits", 1u32);
        assert_eq!(attrs.insert("hits", 2u32), Some(1));
        // Different type: previous value is dropped, nothing returned.
        assert_eq!(attrs.insert("hits", "two"), None);
        assert_eq!(attrs.get::<&str>("hits"), Some(&"two"));
    }

    #[test]
    fn test_get_mut() {
        let mut attrs = Attributes::new();
        attrs.insert("trail", vec![1]);
        attrs.get_mut::<Vec<i32>>("trail").unwrap().push(2);
        assert_eq!(attrs.get::<Vec<i32>>("trail"), Some(&vec![1, 2]));
    }

    #[test]
    fn test_remove_checks_type() {
        let mut attrs = Attributes::new();
        attrs.insert("id", 7u64);

        assert_eq!(attrs.remove::<u32>("id"), None);
        assert!(attrs.contains("id"));

        assert_eq!(attrs.remove::<u64>("id"), Some(7));
        assert!(!attrs.contains("id"));
        assert_eq!(attrs.remove::<u64>("missing"), None);
    }

    #[test]
    fn test_names() {
        let mut attrs = Attributes::new();
        attrs.insert("a", 1);
        attrs.insert("b", 2);
        let mut names: Vec<_> = attrs.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b"]);
    }
}
