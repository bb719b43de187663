//! The growable array.
//!
//! [`DynArray`] owns one [`RawBuf`] and a count of live elements at its
//! front. Every reallocation follows the same order: allocate the new block,
//! build anything that can fail into it, relocate the live elements, and only
//! then release the old block. A failure before the last step frees the new
//! block and leaves the array untouched.

#![allow(unsafe_code)]

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use dynarr_core::{AllocError, ArrayError, TryClone};

use crate::config::GrowthPolicy;
use crate::cursor::Cursor;
use crate::guard::{PartialBlock, TailFill};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::RawBuf;

/// A contiguous, growable array over a manually managed allocation.
///
/// # Failure guarantees
///
/// | operation | on failure |
/// |-----------|------------|
/// | construction, [`try_clone`](Self::try_clone) | no array is produced; everything built is dropped |
/// | [`try_reserve`](Self::try_reserve), growth-triggered append | array unchanged (same block, length, capacity, values) |
/// | append into spare capacity | array unchanged |
/// | [`try_resize`](Self::try_resize) growing | elements appended so far remain |
/// | [`try_clone_from`](Self::try_clone_from) | array left empty |
///
/// A panicking element constructor or clone leaves the array in the same
/// state as the corresponding `Err` would, and no element is leaked or
/// dropped twice while the panic unwinds.
///
/// # Views
///
/// Slices, iterators, cursors and element references all borrow the array,
/// so anything that may reallocate or change the length cannot be called
/// while one of them is alive.
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
    growth: GrowthPolicy,
}

// SAFETY: `DynArray<T>` owns its elements; sending it sends them.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// An empty, unallocated array with the default doubling policy.
    pub const fn new() -> Self {
        Self::with_growth(GrowthPolicy::DOUBLING)
    }

    /// An empty, unallocated array growing according to `growth`.
    pub const fn with_growth(growth: GrowthPolicy) -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            growth,
        }
    }

    /// An empty array with exactly `capacity` slots allocated.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.handle())
    }

    /// Fallible [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuf::try_allocate(capacity)?,
            len: 0,
            growth: GrowthPolicy::DOUBLING,
        })
    }

    /// Build `count` elements with `f(index)`, in index order.
    ///
    /// If `f` fails after `k` elements, those `k` are dropped, the block is
    /// freed and the error is returned.
    pub fn try_from_fn<E, F>(count: usize, mut f: F) -> Result<Self, ArrayError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        Self::build(count, |index| f(index).map_err(ArrayError::Element))
    }

    /// Build `count` elements with `f(index)`, in index order.
    pub fn from_fn<F>(count: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::build::<AllocError>(count, |index| Ok(f(index))).unwrap_or_else(|e| e.handle())
    }

    fn build<E>(count: usize, mut f: impl FnMut(usize) -> Result<T, E>) -> Result<Self, E>
    where
        E: From<AllocError>,
    {
        let mut block = PartialBlock::allocate(count)?;
        for index in 0..count {
            block.push(f(index)?);
        }
        let (buf, len) = block.finish();
        Ok(Self {
            buf,
            len,
            growth: GrowthPolicy::DOUBLING,
        })
    }

    /// Move the contents out, leaving `self` empty and unallocated.
    ///
    /// Constant time; no element is touched.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Move assignment: drop the current contents and adopt `source`'s
    /// block, length, capacity and growth policy. `source` is left empty and
    /// unallocated.
    pub fn move_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    /// Exchange contents with `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // ---------------------------------------------------------------------
    // Capacity
    // ---------------------------------------------------------------------

    /// Ensure a total capacity of at least `new_capacity` slots.
    ///
    /// Allocates exactly `new_capacity` slots when growing.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn reserve(&mut self, new_capacity: usize) {
        self.try_reserve(new_capacity).unwrap_or_else(|e| e.handle());
    }

    /// Ensure a total capacity of at least `new_capacity` slots.
    ///
    /// No-op if the capacity is already sufficient. Otherwise a block of
    /// exactly `new_capacity` slots is allocated and the live elements are
    /// moved into it.
    ///
    /// # Errors
    ///
    /// On failure the array is unchanged: same block, length, capacity and
    /// element values.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.buf.capacity() {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Ensure room for `additional` more elements beyond the current length.
    pub fn try_reserve_additional(&mut self, additional: usize) -> Result<(), AllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.try_reserve(required)
    }

    /// Panicking [`try_reserve_additional`](Self::try_reserve_additional).
    pub fn reserve_additional(&mut self, additional: usize) {
        self.try_reserve_additional(additional)
            .unwrap_or_else(|e| e.handle());
    }

    /// Reallocate to exactly `len` slots, releasing the block entirely when
    /// the array is empty.
    pub fn shrink_to_fit(&mut self) {
        if self.buf.capacity() > self.len {
            self.reallocate(self.len).unwrap_or_else(|e| e.handle());
        }
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        debug_assert!(new_capacity >= self.len);
        let mut fresh: RawBuf<T> = RawBuf::try_allocate(new_capacity)?;
        // SAFETY: slots `0..len` are live in the old block and `fresh` is a
        // distinct, uninitialized block with room for them. The old block is
        // released without dropping anything when it is replaced.
        unsafe { self.buf.relocate_into(&mut fresh, self.len) };
        self.buf = fresh;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Tail insertion and removal
    // ---------------------------------------------------------------------

    /// Append `value`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts through `handle_alloc_error` if
    /// the allocator fails.
    pub fn push(&mut self, value: T) {
        self.push_with(|| Ok::<T, AllocError>(value))
            .unwrap_or_else(|e| e.handle());
    }

    /// Append `value`, reporting allocation failure instead of aborting.
    ///
    /// On failure the array is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        self.push_with(|| Ok(value))
    }

    /// Append the value produced by `f`.
    ///
    /// If the array is full, the grown block is allocated first and `f`'s
    /// value is built straight into it; the live elements are moved over only
    /// once that succeeded. If `f` (or the allocation) fails, the array is
    /// unchanged.
    pub fn try_push_with<E, F>(&mut self, f: F) -> Result<(), ArrayError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.push_with(|| f().map_err(ArrayError::Element))
    }

    fn push_with<E>(&mut self, build: impl FnOnce() -> Result<T, E>) -> Result<(), E>
    where
        E: From<AllocError>,
    {
        if self.len < self.buf.capacity() {
            let value = build()?;
            // SAFETY: `len < capacity` and the slot at `len` is uninitialized.
            unsafe { self.buf.slot(self.len).write(value) };
            self.len += 1;
            return Ok(());
        }

        let required = self.len.checked_add(1).ok_or(AllocError::CapacityOverflow {
            requested: usize::MAX,
        })?;
        let new_capacity = self.growth.next_capacity(self.buf.capacity(), required);
        let mut fresh: RawBuf<T> = RawBuf::try_allocate(new_capacity)?;
        // `fresh` is released on an early return or unwind; `self` is not
        // touched until the new value exists.
        let value = build()?;
        // SAFETY: `new_capacity > len`, so slot `len` of `fresh` exists, and
        // slots `0..len` of `fresh` are uninitialized for the relocation.
        unsafe {
            fresh.slot(self.len).write(value);
            self.buf.relocate_into(&mut fresh, self.len);
        }
        self.buf = fresh;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last element, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is live and is no longer
        // counted, so ownership moves to the caller.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Drop the elements at `new_len..len`. No-op if `new_len >= len`.
    ///
    /// Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shrink the live range first so a panicking destructor cannot
        // expose already dropped slots.
        self.len = new_len;
        // SAFETY: slots `new_len..new_len + tail_len` were live and are no
        // longer counted.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(new_len),
                tail_len,
            ));
        }
    }

    /// Drop all elements in index order. Capacity is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    // ---------------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------------

    /// Checked access.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        self.as_slice().get(index).ok_or(ArrayError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Unchecked access: the zero-overhead fast path.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Anything else is undefined behavior.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "get_unchecked: index {index} >= len {}", self.len);
        // SAFETY: the caller guarantees `index` is live.
        unsafe { &*self.buf.slot(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index < self.len()`. Anything else is undefined behavior.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "get_unchecked_mut: index {index} >= len {}", self.len);
        // SAFETY: the caller guarantees `index` is live.
        unsafe { &mut *self.buf.slot(index) }
    }

    /// First element, or `None` if empty.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutable first element, or `None` if empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, or `None` if empty.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable last element, or `None` if empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Pointer to the first slot, or null while no block is allocated.
    ///
    /// Invalidated by any operation that reallocates.
    pub fn as_ptr(&self) -> *const T {
        if self.buf.is_allocated() {
            self.buf.as_ptr()
        } else {
            ptr::null()
        }
    }

    /// Mutable pointer to the first slot, or null while no block is
    /// allocated.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.buf.is_allocated() {
            self.buf.as_ptr()
        } else {
            ptr::null_mut()
        }
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `0..len` are live; the base pointer is non-null and
        // aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if a block is currently held (`capacity() > 0`).
    pub fn is_allocated(&self) -> bool {
        self.buf.is_allocated()
    }

    /// The growth policy applied when an append finds the array full.
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    // ---------------------------------------------------------------------
    // Iteration
    // ---------------------------------------------------------------------

    /// Iterate over the live elements.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the live elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Cursor at the first element (or at the end if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Cursor at the one-past-the-end position.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len)
    }

    // ---------------------------------------------------------------------
    // Resize and bulk fill
    // ---------------------------------------------------------------------

    /// Resize to `new_len`, building new elements with `f`.
    ///
    /// Shrinking drops the tail and cannot fail. Growing first reserves
    /// exactly `new_len` slots if needed (array unchanged if that fails),
    /// then appends one element at a time. If `f` fails midway, the
    /// elements appended so far remain and the error is returned.
    pub fn try_resize_with<E, F>(&mut self, new_len: usize, mut f: F) -> Result<(), ArrayError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.resize_fill(new_len, || f().map_err(ArrayError::Element))
    }

    /// Resize to `new_len`, building new elements with `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        self.resize_fill::<AllocError>(new_len, || Ok(f()))
            .unwrap_or_else(|e| e.handle());
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    fn resize_fill<E>(&mut self, new_len: usize, mut f: impl FnMut() -> Result<T, E>) -> Result<(), E>
    where
        E: From<AllocError>,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.try_reserve(new_len)?;
        let mut fill = TailFill::new(&self.buf, &mut self.len);
        while fill.len() < new_len {
            fill.write(f()?);
        }
        Ok(())
    }

    /// Copy assignment core: empty the array, reserve `count` slots, then
    /// build each element in order. Any failure, `Err` or panic, leaves the
    /// array empty.
    fn assign_fill<E>(&mut self, count: usize, mut f: impl FnMut(usize) -> Result<T, E>) -> Result<(), E>
    where
        E: From<AllocError>,
    {
        self.clear();
        self.try_reserve(count)?;
        let mut fill = TailFill::all_or_nothing(&self.buf, &mut self.len);
        for index in 0..count {
            fill.write(f(index)?);
        }
        fill.commit();
        Ok(())
    }

    fn extend_fill<E>(&mut self, count: usize, mut f: impl FnMut(usize) -> Result<T, E>) -> Result<(), E>
    where
        E: From<AllocError>,
    {
        self.try_reserve_additional(count)?;
        let mut fill = TailFill::new(&self.buf, &mut self.len);
        (0..count).try_for_each(|index| f(index).map(|value| fill.write(value)))
    }
}

impl<T: TryClone> DynArray<T> {
    /// `count` clones of `value`.
    ///
    /// If a clone fails after `k` successes, the `k` clones are dropped, the
    /// block is freed and the error is returned.
    pub fn try_from_elem(count: usize, value: &T) -> Result<Self, ArrayError<T::Error>> {
        Self::try_from_fn(count, |_| value.try_clone())
    }

    /// Copy construction: an independent array with clones of every element,
    /// in index order, in a block of exactly `len` slots.
    ///
    /// On failure no array is produced and `self` is untouched.
    pub fn try_clone(&self) -> Result<Self, ArrayError<T::Error>> {
        let mut copy = Self::try_from_fn(self.len, |index| self.as_slice()[index].try_clone())?;
        copy.growth = self.growth;
        Ok(copy)
    }

    /// Copy assignment.
    ///
    /// Drops every current element, reserves room for `source.len()` and
    /// clones `source`'s elements in order.
    ///
    /// # Errors
    ///
    /// If a clone fails or panics (or the reservation fails), the clones
    /// made so far are
    /// dropped and `self` is left **empty**: its previous contents are
    /// already gone at that point and are not restored. This is weaker than
    /// [`try_clone`](Self::try_clone); callers that need the old contents
    /// back on failure should `try_clone` and then [`move_from`](Self::move_from).
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), ArrayError<T::Error>> {
        let items = source.as_slice();
        self.assign_fill(items.len(), |index| {
            items[index].try_clone().map_err(ArrayError::Element)
        })
    }

    /// Append a clone of `value`, with the same guarantees as
    /// [`try_push_with`](Self::try_push_with).
    pub fn push_cloned(&mut self, value: &T) -> Result<(), ArrayError<T::Error>> {
        self.push_with(|| value.try_clone().map_err(ArrayError::Element))
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    ///
    /// See [`try_resize_with`](Self::try_resize_with) for the failure policy.
    pub fn try_resize(&mut self, new_len: usize, value: &T) -> Result<(), ArrayError<T::Error>> {
        self.resize_fill(new_len, || value.try_clone().map_err(ArrayError::Element))
    }

    /// Append clones of every element of `items`.
    ///
    /// Reserves room for all of them first (array unchanged if that fails).
    /// If a clone fails midway, the clones appended so far remain.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), ArrayError<T::Error>> {
        self.extend_fill(items.len(), |index| {
            items[index].try_clone().map_err(ArrayError::Element)
        })
    }
}

impl<T: Clone> DynArray<T> {
    /// `count` clones of `value`.
    pub fn from_elem(count: usize, value: T) -> Self {
        Self::from_fn(count, |_| value.clone())
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_fill::<AllocError>(new_len, || Ok(value.clone()))
            .unwrap_or_else(|e| e.handle());
    }

    /// Append clones of every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        self.extend_fill::<AllocError>(items.len(), |index| Ok(items[index].clone()))
            .unwrap_or_else(|e| e.handle());
    }
}

impl<T: Default> DynArray<T> {
    /// `count` default-constructed elements.
    pub fn with_len_default(count: usize) -> Self {
        Self::from_fn(count, |_| T::default())
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // Elements first, in index order; `RawBuf::drop` then frees the block.
        self.clear();
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let items = self.as_slice();
        let mut copy = Self::from_fn(items.len(), |index| items[index].clone());
        copy.growth = self.growth;
        copy
    }

    /// Copy assignment; see [`DynArray::try_clone_from`] for the failure
    /// policy. A panicking clone leaves `self` empty.
    fn clone_from(&mut self, source: &Self) {
        let items = source.as_slice();
        self.assign_fill::<AllocError>(items.len(), |index| Ok(items[index].clone()))
            .unwrap_or_else(|e| e.handle());
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for DynArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for DynArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<DynArray<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<Vec<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialOrd> PartialOrd for DynArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.buf.capacity() - self.len {
            let target = self.len.saturating_add(lower);
            self.reserve(self.growth.next_capacity(self.buf.capacity(), target));
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    /// Reserves exactly `N` slots, then appends the values in order.
    fn from(values: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        for value in values {
            arr.push(value);
        }
        arr
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    fn from(values: Vec<T>) -> Self {
        let mut arr = Self::with_capacity(values.len());
        for value in values {
            arr.push(value);
        }
        arr
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_fn(items.len(), |index| items[index].clone())
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut this = ManuallyDrop::new(self);
        let buf = mem::replace(&mut this.buf, RawBuf::new());
        IntoIter::new(buf, this.len)
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
