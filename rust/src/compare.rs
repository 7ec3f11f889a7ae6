//! Comparators: the strict weak order a tree sorts its elements by.

use std::cmp::Ordering;

/// A strict weak order over `T`.
///
/// `less` must be irreflexive and transitive. Two elements are equivalent,
/// and therefore the same key, when neither is less than the other.
pub trait Compare<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;

    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Three-way form of `less`, used by the descent loops.
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders elements by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }

    #[inline]
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
