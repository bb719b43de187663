//! Positional views over the live range of a [`DynArray`](crate::DynArray).
//!
//! A [`Cursor`] is a position in `0..=len` over a borrowed array: it can be
//! dereferenced, stepped forwards and backwards, offset by a count and
//! compared with other cursors. Because it borrows the array, any operation
//! that could reallocate or change the length is rejected by the compiler
//! while a cursor is alive.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr;

use crate::DynArray;

/// A random-access position over a borrowed array.
///
/// The end position (`len`) is valid to hold and compare but dereferences
/// to `None`. Two cursors compare equal only if they borrow the same array
/// and sit at the same position.
pub struct Cursor<'a, T> {
    array: &'a DynArray<T>,
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(array: &'a DynArray<T>, pos: usize) -> Self {
        debug_assert!(pos <= array.len());
        Self { array, pos }
    }

    /// Index this cursor points at.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` at the one-past-the-end position.
    pub fn is_end(&self) -> bool {
        self.pos == self.array.len()
    }

    /// The element under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        let array: &'a DynArray<T> = self.array;
        array.as_slice().get(self.pos)
    }

    /// Advance one position (pre-increment).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end position.
    pub fn move_next(&mut self) -> &mut Self {
        assert!(!self.is_end(), "cursor advanced past the end");
        self.pos += 1;
        self
    }

    /// Step back one position (pre-decrement).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at position 0.
    pub fn move_prev(&mut self) -> &mut Self {
        assert!(self.pos > 0, "cursor moved before the start");
        self.pos -= 1;
        self
    }

    /// Advance one position, returning the cursor as it was before
    /// (post-increment).
    pub fn post_next(&mut self) -> Self {
        let before = *self;
        self.move_next();
        before
    }

    /// Step back one position, returning the cursor as it was before
    /// (post-decrement).
    pub fn post_prev(&mut self) -> Self {
        let before = *self;
        self.move_prev();
        before
    }

    /// The cursor `delta` positions away, if that is still within `0..=len`.
    pub fn offset(self, delta: isize) -> Option<Self> {
        let pos = self.pos.checked_add_signed(delta)?;
        (pos <= self.array.len()).then_some(Self {
            array: self.array,
            pos,
        })
    }

    /// Signed number of steps from `self` to `other`.
    pub fn distance_to(&self, other: &Self) -> isize {
        other.pos as isize - self.pos as isize
    }

    fn same_array(&self, other: &Self) -> bool {
        ptr::eq(self.array, other.array)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_array(other) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Positions are ordered only within the same array.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_array(other).then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the result lies past the end position.
    fn add(self, count: usize) -> Self {
        let pos = self
            .pos
            .checked_add(count)
            .filter(|&p| p <= self.array.len())
            .unwrap_or_else(|| panic!("cursor offset out of range: {} + {count}", self.pos));
        Self { pos, ..self }
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the result lies before position 0.
    fn sub(self, count: usize) -> Self {
        let pos = self
            .pos
            .checked_sub(count)
            .unwrap_or_else(|| panic!("cursor offset out of range: {} - {count}", self.pos));
        Self { pos, ..self }
    }
}

impl<T> AddAssign<usize> for Cursor<'_, T> {
    fn add_assign(&mut self, count: usize) {
        *self = *self + count;
    }
}

impl<T> SubAssign<usize> for Cursor<'_, T> {
    fn sub_assign(&mut self, count: usize) {
        *self = *self - count;
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.array.len())
            .field("current", &self.get())
            .finish()
    }
}
