use std::collections::HashSet;
use std::hash::Hash;

/// Open accordion sections, tracked by id membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandSet<T: Eq + Hash> {
    open: HashSet<T>,
}

impl<T: Eq + Hash> Default for ExpandSet<T> {
    fn default() -> Self {
        Self {
            open: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> ExpandSet<T> {
    pub fn with_open(ids: impl IntoIterator<Item = T>) -> Self {
        Self {
            open: ids.into_iter().collect(),
        }
    }

    /// Flip one section. Returns whether it is now open.
    pub fn toggle(&mut self, id: T) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: &T) -> bool {
        self.open.contains(id)
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.open.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_membership() {
        let mut set = ExpandSet::with_open([0usize]);
        assert!(set.is_expanded(&0));

        assert!(!set.toggle(0));
        assert!(set.toggle(2));
        assert!(set.toggle(1));
        assert!(!set.is_expanded(&0));
        assert_eq!(set.len(), 2);

        // insertion order is irrelevant
        assert_eq!(set, ExpandSet::with_open([1, 2]));
    }

    #[test]
    fn test_clear() {
        let mut set = ExpandSet::with_open(["1".to_string(), "3".to_string()]);
        set.clear();
        assert!(set.is_empty());
    }
}
