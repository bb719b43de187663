//! Owning iteration.
//!
//! Borrowing iteration uses the slice iterators directly ([`Iter`],
//! [`IterMut`]); they borrow the array, so the compiler rejects any
//! structural mutation while one is alive.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use crate::raw::RawBuf;

/// Shared iterator over the live elements.
pub type Iter<'a, T> = slice::Iter<'a, T>;

/// Mutable iterator over the live elements.
pub type IterMut<'a, T> = slice::IterMut<'a, T>;

/// Owning iterator returned by `DynArray::into_iter`.
///
/// Yields the elements by value. Elements not consumed are dropped with the
/// iterator, which then releases the block.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    /// Live elements are `start..end`.
    start: usize,
    end: usize,
}

// SAFETY: `IntoIter` owns its elements exactly like `DynArray` does.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access only hands out `&T` via `as_slice`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(buf: RawBuf<T>, len: usize) -> Self {
        Self {
            buf,
            start: 0,
            end: len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `start..end` are live and within the block.
        unsafe { slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is live; advancing `start` hands ownership out.
        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: `end` was live before the decrement.
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        // SAFETY: `start..start + remaining` were live and are no longer
        // reachable through `self`. `RawBuf::drop` frees the block afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.slot(start), remaining));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
