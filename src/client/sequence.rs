use std::fmt;

/// Returned when an index does not name an element of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for {} inputs", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// Ordered list of form inputs. Position is the only ordering; every
/// operation either applies fully or leaves the sequence untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSequence<T> {
    items: Vec<T>,
}

impl<T> Default for InputSequence<T> {
    fn default() -> Self {
        InputSequence { items: Vec::new() }
    }
}

impl<T> InputSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Append and hand back the stored element.
    pub fn push(&mut self, item: T) -> &T {
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Swap in a new value at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, item: T) -> Result<T, OutOfRange> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.check(index)?;
        Ok(self.items.remove(index))
    }

    /// Take the element at `from` out and reinsert it at `to`.
    ///
    /// `to` is an index into the sequence as it looks after the move, which is
    /// the drag-and-drop contract: dropping onto slot `to` puts the item there.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), OutOfRange> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    fn check(&self, index: usize) -> Result<(), OutOfRange> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<T> From<Vec<T>> for InputSequence<T> {
    fn from(items: Vec<T>) -> Self {
        InputSequence { items }
    }
}

impl<T> IntoIterator for InputSequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a InputSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
