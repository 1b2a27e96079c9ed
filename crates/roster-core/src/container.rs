use roster_types::MAX_USERS;
use tracing::debug;

/// An insertion-ordered sequence that never grows past its capacity.
///
/// Insertion past capacity is refused rather than evicting anything; there is
/// no removal.
#[derive(Debug, Clone)]
pub struct BoundedContainer<T> {
    items: Vec<T>,
    max_size: usize,
}

impl<T> BoundedContainer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size: capacity,
        }
    }

    /// Appends `item` if there is room. Returns `false` (and drops `item`)
    /// when the container is full.
    #[must_use]
    pub fn add(&mut self, item: T) -> bool {
        if self.items.len() < self.max_size {
            self.items.push(item);
            true
        } else {
            debug!(capacity = self.max_size, "container full, rejecting item");
            false
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_size
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        for item in &self.items {
            visitor(item);
        }
    }

    /// Clones out every element matching `predicate`, in insertion order.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for BoundedContainer<T> {
    fn default() -> Self {
        Self::new(MAX_USERS)
    }
}

impl<'a, T> IntoIterator for &'a BoundedContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
