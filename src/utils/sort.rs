use std::cmp::Ordering;

/// Bounded best-k buffer
/// - Keeps at most `k` items sorted by `cmp` (`Less` = better)
/// - A candidate is inserted only if it beats the current worst, which is then evicted
///
/// Complexity: O(log k) search + O(k) shift per insertion
pub struct TopK<T, F> {
    items: Vec<T>,
    k: usize,
    cmp: F,
}

impl<T, F> TopK<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(k: usize, cmp: F) -> Self {
        Self {
            items: Vec::with_capacity(k),
            k,
            cmp,
        }
    }

    /// Offer a candidate, returns whether it was kept
    pub fn push(&mut self, item: T) -> bool {
        if self.k == 0 {
            return false;
        }
        if self.items.len() == self.k {
            match self.items.last() {
                Some(worst) if (self.cmp)(&item, worst) == Ordering::Less => {}
                _ => return false,
            }
            self.items.pop();
        }
        let pos = self
            .items
            .partition_point(|kept| (self.cmp)(kept, &item) != Ordering::Greater);
        self.items.insert(pos, item);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// best first
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.items
    }
}
